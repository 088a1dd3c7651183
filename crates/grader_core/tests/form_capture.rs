use grader_core::{
    update, AppState, LabelDefaults, Msg, SelectedFile, UploadSlot, FALLBACK_LABEL_TEXT,
};

fn defaults() -> LabelDefaults {
    LabelDefaults {
        rubric: Some("Choose rubric (.xlsx, .csv)".to_string()),
        project_archive: Some("Choose project .zip".to_string()),
        requirements: None,
    }
}

fn choose(state: AppState, slot: UploadSlot, file: Option<SelectedFile>) -> AppState {
    update(state, Msg::FileChosen { slot, file }).0
}

#[test]
fn selecting_a_file_shows_its_name() {
    let state = AppState::with_label_defaults(&defaults());
    let state = choose(
        state,
        UploadSlot::ProjectArchive,
        Some(SelectedFile::new("project.zip", "/data/project.zip")),
    );
    let view = state.view();

    assert_eq!(view.label_text(UploadSlot::ProjectArchive), Some("project.zip"));
    assert_eq!(
        view.label_text(UploadSlot::Rubric),
        Some("Choose rubric (.xlsx, .csv)")
    );
    assert_eq!(
        view.label_text(UploadSlot::Requirements),
        Some(FALLBACK_LABEL_TEXT)
    );
}

#[test]
fn clearing_reverts_to_captured_default_for_each_pair() {
    let mut state = AppState::with_label_defaults(&defaults());
    for slot in UploadSlot::ALL {
        state = choose(
            state,
            slot,
            Some(SelectedFile::new(format!("{}.bin", slot.field_name()), "/x")),
        );
    }
    for slot in UploadSlot::ALL {
        state = choose(state, slot, None);
    }
    let view = state.view();

    assert_eq!(
        view.label_text(UploadSlot::Rubric),
        Some("Choose rubric (.xlsx, .csv)")
    );
    assert_eq!(
        view.label_text(UploadSlot::ProjectArchive),
        Some("Choose project .zip")
    );
    assert_eq!(
        view.label_text(UploadSlot::Requirements),
        Some(FALLBACK_LABEL_TEXT)
    );
}

#[test]
fn empty_original_label_falls_back() {
    let state = AppState::with_label_defaults(&LabelDefaults {
        rubric: Some(String::new()),
        ..LabelDefaults::default()
    });
    assert_eq!(
        state.view().label_text(UploadSlot::Rubric),
        Some(FALLBACK_LABEL_TEXT)
    );
}

#[test]
fn original_label_text_is_kept_as_written() {
    let state = AppState::with_label_defaults(&LabelDefaults {
        rubric: Some("  Choose rubric...\n".to_string()),
        project_archive: Some("   ".to_string()),
        ..LabelDefaults::default()
    });
    let (state, _) = update(
        state,
        Msg::FileChosen {
            slot: UploadSlot::Rubric,
            file: Some(SelectedFile::new("rubric.csv", "/data/rubric.csv")),
        },
    );
    let (state, _) = update(
        state,
        Msg::FileChosen {
            slot: UploadSlot::Rubric,
            file: None,
        },
    );

    let view = state.view();
    assert_eq!(
        view.label_text(UploadSlot::Rubric),
        Some("  Choose rubric...\n")
    );
    assert_eq!(view.label_text(UploadSlot::ProjectArchive), Some("   "));
}

#[test]
fn repeated_identical_change_is_idempotent() {
    let file = SelectedFile::new("req.docx", "/data/req.docx");
    let (mut state, _) = update(
        AppState::new(),
        Msg::FileChosen {
            slot: UploadSlot::Requirements,
            file: Some(file.clone()),
        },
    );
    assert!(state.consume_dirty());
    let before = state.view();

    let (mut state, effects) = update(
        state,
        Msg::FileChosen {
            slot: UploadSlot::Requirements,
            file: Some(file),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.view(), before);
}

#[test]
fn selection_uses_path_file_name() {
    let file = SelectedFile::from_path("/home/me/Grading Rubric.xlsx");
    assert_eq!(file.name, "Grading Rubric.xlsx");
}

#[test]
fn submit_carries_selected_files_in_form_order() {
    let state = choose(
        AppState::new(),
        UploadSlot::Requirements,
        Some(SelectedFile::new("req.pdf", "/r/req.pdf")),
    );
    let state = choose(
        state,
        UploadSlot::Rubric,
        Some(SelectedFile::new("rubric.csv", "/r/rubric.csv")),
    );
    let (_state, effects) = update(state, Msg::SubmitClicked);
    let upload = match effects.as_slice() {
        [grader_core::Effect::SubmitAnalysis { upload, .. }] => upload.clone(),
        other => panic!("unexpected effects {other:?}"),
    };
    let fields: Vec<_> = upload
        .present()
        .map(|(slot, file)| (slot.field_name(), file.name.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![("rubricFile", "rubric.csv"), ("requirementsFile", "req.pdf")]
    );
}
