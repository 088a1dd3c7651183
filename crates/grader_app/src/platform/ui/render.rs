use grader_core::AppViewModel;

use super::constants::*;
use super::page::{MessageNode, PageCommand};

pub fn render(view: &AppViewModel) -> Vec<PageCommand> {
    let mut cmds = Vec::new();

    for label in &view.file_labels {
        cmds.push(PageCommand::SetText {
            id: file_label(label.slot),
            text: label.text.clone(),
        });
    }

    cmds.push(PageCommand::SetEnabled {
        id: ANALYZE_BTN,
        enabled: view.submit.enabled,
    });
    cmds.push(PageCommand::SetText {
        id: ANALYZE_BTN,
        text: view.submit.label.to_string(),
    });
    cmds.push(PageCommand::SetVisible {
        id: LOADING_OVERLAY,
        visible: view.overlay_visible,
    });
    cmds.push(PageCommand::SetBodyClass {
        class: LOADING_ACTIVE_CLASS,
        active: view.scroll_locked,
    });

    cmds.push(PageCommand::ReplaceMessages {
        id: MESSAGES,
        items: view
            .messages
            .iter()
            .map(|message| MessageNode {
                flash: message.id,
                text: message.text.clone(),
                severity: message.severity,
            })
            .collect(),
    });

    // Result markup is injected verbatim; an absent result clears it.
    let (html, href) = match &view.result {
        Some(result) => (result.table_markup.clone(), Some(result.download_url.clone())),
        None => (String::new(), None),
    };
    let has_result = view.result.is_some();
    cmds.push(PageCommand::SetInnerHtml {
        id: DATAFRAME_OUTPUT,
        html,
    });
    cmds.push(PageCommand::SetVisible {
        id: RESULTS_CONTAINER,
        visible: has_result,
    });
    cmds.push(PageCommand::SetHref {
        id: DOWNLOAD_REPORT_BTN,
        href,
    });
    cmds.push(PageCommand::SetVisible {
        id: DOWNLOAD_REPORT_BTN,
        visible: has_result,
    });

    cmds
}
