use grader_core::IDLE_SUBMIT_LABEL;

use super::constants::*;
use super::page::PageCommand;

fn create(id: ElementId, text: &str, visible: bool) -> PageCommand {
    PageCommand::CreateElement {
        id,
        text: text.to_string(),
        visible,
    }
}

/// Static markup of the upload page, before any controller runs.
pub fn initial_commands() -> Vec<PageCommand> {
    vec![
        create(UPLOAD_FORM, "", true),
        create(INPUT_RUBRIC, "", true),
        create(LABEL_RUBRIC, "Choose rubric (.xlsx, .xls, .csv)...", true),
        create(INPUT_PROJECT, "", true),
        create(LABEL_PROJECT, "Choose project archive (.zip)...", true),
        create(INPUT_REQUIREMENTS, "", true),
        create(LABEL_REQUIREMENTS, "Choose requirements (.docx, .pdf, .pptx)...", true),
        create(ANALYZE_BTN, IDLE_SUBMIT_LABEL, true),
        create(LOADING_OVERLAY, "Analyzing project...", false),
        create(MESSAGES, "", true),
        create(RESULTS_CONTAINER, "", false),
        create(DATAFRAME_OUTPUT, "", true),
        create(DOWNLOAD_REPORT_BTN, "Download Report", false),
    ]
}
