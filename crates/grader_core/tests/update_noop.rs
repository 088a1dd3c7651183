use grader_core::{update, AppState, Msg};

#[test]
fn dismissing_unknown_flash_is_noop() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::FlashDismissed { flash: 99 });

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(state, next);
}

#[test]
fn download_without_result_does_nothing() {
    let (mut next, effects) = update(AppState::new(), Msg::DownloadClicked);

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
