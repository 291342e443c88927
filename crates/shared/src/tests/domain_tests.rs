use super::*;

#[test]
fn percent_rounds_to_nearest_integer() {
    assert_eq!(ProgressSnapshot::new(50, 200).percent(), Some(25));
    assert_eq!(ProgressSnapshot::new(1, 3).percent(), Some(33));
    assert_eq!(ProgressSnapshot::new(2, 3).percent(), Some(67));
    assert_eq!(ProgressSnapshot::new(0, 10).percent(), Some(0));
    assert_eq!(ProgressSnapshot::new(10, 10).percent(), Some(100));
}

#[test]
fn percent_rounds_half_away_from_zero() {
    assert_eq!(ProgressSnapshot::new(1, 200).percent(), Some(1));
    assert_eq!(ProgressSnapshot::new(5, 1000).percent(), Some(1));
    assert_eq!(ProgressSnapshot::new(4, 1000).percent(), Some(0));
}

#[test]
fn percent_is_capped_when_loaded_exceeds_total() {
    assert_eq!(ProgressSnapshot::new(300, 200).percent(), Some(100));
}

#[test]
fn percent_handles_counters_near_u64_max() {
    assert_eq!(ProgressSnapshot::new(u64::MAX, u64::MAX).percent(), Some(100));
    assert_eq!(ProgressSnapshot::new(u64::MAX / 2, u64::MAX).percent(), Some(50));
}

#[test]
fn zero_total_is_indeterminate() {
    let snapshot = ProgressSnapshot::new(42, 0);
    assert_eq!(snapshot.percent(), None);
    assert_eq!(snapshot.progress_text(), "Uploading...");
}

#[test]
fn progress_text_includes_percentage() {
    assert_eq!(
        ProgressSnapshot::new(50, 200).progress_text(),
        "Uploading... 25%"
    );
}

#[test]
fn only_ready_shows_upload_button() {
    assert!(UploadState::Ready.shows_upload_button());
    assert!(!UploadState::Uploading.shows_upload_button());
    assert!(!UploadState::Done.shows_upload_button());
}

#[test]
fn upload_state_uses_snake_case_names() {
    assert_eq!(
        serde_json::to_string(&UploadState::Uploading).expect("serialize"),
        "\"uploading\""
    );
    assert_eq!(UploadState::Done.to_string(), "done");
}

#[test]
fn transfer_ids_are_unique() {
    assert_ne!(TransferId::new(), TransferId::new());
}
