use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use grader_core::{LastOutcome, UploadSlot};

mod platform;

use platform::app::{run_app, RunOptions};

#[derive(Parser)]
#[command(name = "grader")]
#[command(version, about = "Submit a project to the grading service", long_about = None)]
struct Cli {
    /// Grading rubric (.xlsx, .xls, .csv)
    #[arg(long, value_name = "FILE")]
    rubric: Option<PathBuf>,

    /// Project archive (.zip)
    #[arg(long, value_name = "FILE")]
    project: Option<PathBuf>,

    /// Requirements document (.docx, .pdf, .pptx)
    #[arg(long, value_name = "FILE")]
    requirements: Option<PathBuf>,

    /// Base URL of the analysis service
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Client configuration file (RON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Download the report into this directory after a successful analysis
    #[arg(long, value_name = "DIR")]
    save_report: Option<PathBuf>,
}

impl Cli {
    fn into_options(self) -> RunOptions {
        let uploads = [
            (UploadSlot::Rubric, self.rubric),
            (UploadSlot::ProjectArchive, self.project),
            (UploadSlot::Requirements, self.requirements),
        ]
        .into_iter()
        .filter_map(|(slot, path)| path.map(|path| (slot, path)))
        .collect();

        RunOptions {
            config: self.config,
            endpoint: self.endpoint,
            uploads,
            save_report: self.save_report,
        }
    }
}

fn main() -> ExitCode {
    let options = Cli::parse().into_options();
    match run_app(options) {
        Ok(summary) => {
            print!("{}", summary.page);
            if let Some(path) = &summary.saved_report {
                println!("Report written to {}", path.display());
            }
            match summary.outcome {
                Some(LastOutcome::Rendered) => ExitCode::SUCCESS,
                _ => ExitCode::from(2),
            }
        }
        Err(err) => {
            eprintln!("grader: {err:#}");
            ExitCode::FAILURE
        }
    }
}
