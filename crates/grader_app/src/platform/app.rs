use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{anyhow, Context};
use grader_core::{update, AppState, LastOutcome, Msg, ReportDownload, SelectedFile, UploadSlot};
use grader_logging::{grader_info, grader_warn};

use super::config::{load_config, ClientConfig, ConfigError};
use super::effects::EffectRunner;
use super::logging;
use super::ui::layout::initial_commands;
use super::ui::page::{Page, PageError};
use super::ui::render::render;

/// One command-line invocation: files to submit plus overrides for the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub uploads: Vec<(UploadSlot, PathBuf)>,
    pub save_report: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: Option<LastOutcome>,
    pub saved_report: Option<PathBuf>,
    pub page: String,
}

pub fn run_app(options: RunOptions) -> anyhow::Result<RunSummary> {
    let (mut config, config_warning) = match load_config(options.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err @ ConfigError::Parse { .. }) => (ClientConfig::default(), Some(err)),
        Err(err) => return Err(err.into()),
    };
    if let Some(endpoint) = &options.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(dir) = &options.save_report {
        config.report_dir = dir.clone();
    }

    logging::initialize(config.log_destination, config.level_filter(), &config.log_file);
    if let Some(err) = config_warning {
        grader_warn!("{}; using default configuration", err);
    }
    grader_info!(
        "Starting grader client endpoint={} report_dir={:?}",
        config.endpoint,
        config.report_dir
    );

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config.to_client_settings(), msg_tx);
    let mut page = Page::default();
    page.apply_all(initial_commands())?;
    let controller = SubmissionController::init(page, runner)?;

    drive(controller, &msg_rx, &options.uploads, options.save_report.is_some())
}

/// Selects the files, submits once, and optionally saves the report.
fn drive(
    mut controller: SubmissionController,
    msg_rx: &mpsc::Receiver<Msg>,
    uploads: &[(UploadSlot, PathBuf)],
    save_report: bool,
) -> anyhow::Result<RunSummary> {
    for (slot, path) in uploads {
        controller.dispatch(Msg::FileChosen {
            slot: *slot,
            file: Some(SelectedFile::from_path(path.clone())),
        })?;
    }

    controller.dispatch(Msg::SubmitClicked)?;
    controller.run_until(msg_rx, |state| !state.is_busy())?;

    if save_report && controller.state.view().result.is_some() {
        controller.dispatch(Msg::DownloadClicked)?;
        controller.run_until(msg_rx, |state| {
            !matches!(state.view().download, ReportDownload::InFlight(_))
        })?;
    }

    let view = controller.state.view();
    let saved_report = match view.download {
        ReportDownload::Saved(path) => Some(path),
        _ => None,
    };
    Ok(RunSummary {
        outcome: view.last_outcome,
        saved_report,
        page: controller.page().describe(),
    })
}

/// Owns the page for its whole lifetime; created once, never torn down.
pub struct SubmissionController {
    state: AppState,
    page: Page,
    runner: EffectRunner,
}

impl SubmissionController {
    /// Captures the label texts present in the markup, then renders the idle state.
    pub fn init(mut page: Page, runner: EffectRunner) -> Result<Self, PageError> {
        let mut state = AppState::with_label_defaults(&page.label_defaults());
        state.consume_dirty();
        page.apply_all(render(&state.view()))?;
        Ok(Self {
            state,
            page,
            runner,
        })
    }

    /// Renders before running effects: the busy page is up before the request leaves.
    /// A render error is returned only after the state is stored and the effects have run.
    pub fn dispatch(&mut self, msg: Msg) -> Result<(), PageError> {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        let rendered = if self.state.consume_dirty() {
            self.page.apply_all(render(&self.state.view()))
        } else {
            Ok(())
        };
        self.runner.enqueue(effects);
        rendered
    }

    fn run_until(
        &mut self,
        msg_rx: &mpsc::Receiver<Msg>,
        done: impl Fn(&AppState) -> bool,
    ) -> anyhow::Result<()> {
        while !done(&self.state) {
            let msg = msg_rx.recv().map_err(|_| anyhow!("engine channel closed"))?;
            self.dispatch(msg).context("render failed")?;
        }
        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
