use chrono::NaiveDate;
use futures::executor::block_on;
use hostel_ui::components::date_picker_state::{DateBounds, DatePickerModel};
use hostel_ui::components::overlay_state::{self, CloseReason, OverlayConfig};
use hostel_ui::components::{scroll_lock, select_state};
use hostel_ui::form::{FieldErrors, FieldKey, SubmitError, SubmitGuard, date_range, required};
use hostel_ui::views::{
    ChannelFeed, ComplaintBoard, ComplaintStatus, FeedMessage, FeedSubscription, ReadyState,
};

const COMPLAINTS: &str = r#"[
    {
        "_id": "c1",
        "title": "Leaking tap",
        "status": "Pending",
        "priority": "high",
        "room": "B-14",
        "createdAt": "2024-03-01T09:00:00Z"
    },
    {
        "_id": "c2",
        "title": "Broken fan",
        "status": "In Progress",
        "room": "A-02",
        "createdAt": "2024-03-02T09:00:00Z"
    },
    {
        "_id": "c3",
        "title": "No hot water",
        "status": "Resolved",
        "room": "C-07",
        "createdAt": "2024-03-03T09:00:00Z"
    }
]"#;

fn board() -> ComplaintBoard {
    ComplaintBoard::new(serde_json::from_str(COMPLAINTS).expect("fixture parses"))
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn status_filter_narrows_and_clearing_restores_the_list() {
    let mut board = board();
    assert_eq!(board.visible().len(), 3);

    board.set_status_filter(Some(ComplaintStatus::Resolved));
    let visible = board.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "c3");

    board.clear_filter();
    assert_eq!(board.visible().len(), 3);
}

#[test]
fn feed_frames_merge_into_the_board() {
    let mut board = board();
    let (sender, feed) = ChannelFeed::pair();
    let mut subscription = FeedSubscription::new(feed);
    assert!(subscription.drain_into(&mut board).is_err());

    sender.open();
    let mut updated = board.get("c1").cloned().expect("c1 present");
    updated.status = ComplaintStatus::InProgress;
    sender
        .send_message(&FeedMessage::ComplaintUpdated { complaint: updated })
        .expect("queued");
    sender
        .send(
            r#"{"type":"new_complaint","complaint":{"_id":"c4","title":"Door jammed",
            "status":"pending","createdAt":"2024-03-04T09:00:00Z"}}"#,
        )
        .expect("queued");
    sender.send("not json").expect("queued");

    let report = subscription.drain_into(&mut board).expect("open feed drains");
    assert_eq!((report.inserted, report.updated, report.rejected), (1, 1, 1));
    assert_eq!(board.complaints().len(), 4);
    assert_eq!(
        board.get("c1").map(|complaint| complaint.status),
        Some(ComplaintStatus::InProgress)
    );

    drop(subscription);
    assert_eq!(sender.ready_state(), ReadyState::Closed);
    assert!(sender.send("late").is_err());
}

#[test]
fn picking_an_option_then_rerendering_with_it_shows_it_selected() {
    let options = select_state::normalize_options(["A", "B"]);
    assert_eq!(select_state::selected_label(&options, None), None);

    let event = select_state::commit(&options, "B").expect("B is enabled");
    assert_eq!(event, select_state::SelectChangeEvent::new("B"));
    let rerendered = select_state::selected_label(&options, Some(event.target.value.as_ref()));
    assert_eq!(rerendered.as_deref().map(|v| &**v), Some("B"));
}

#[test]
fn select_commit_reports_the_picked_value() {
    let mut options = vec![select_state::placeholder_option(&"Status".into(), true)];
    options.extend(select_state::normalize_options(
        ComplaintStatus::ALL.map(ComplaintStatus::as_str),
    ));

    let event = select_state::commit(&options, "Resolved").expect("enabled option");
    assert_eq!(event.target.value.as_ref(), "Resolved");
    assert_eq!(select_state::commit(&options, ""), None);
    assert_eq!(select_state::commit(&options, "Escalated"), None);
}

#[test]
fn date_picker_rejects_days_outside_its_bounds() {
    let bounds = DateBounds::from_iso(Some("2024-03-01"), Some("2024-03-31"));
    let mut picker = DatePickerModel::new("", bounds, date(2024, 3, 15));
    picker.toggle();

    assert_eq!(picker.select(date(2024, 4, 1)), None);
    assert!(picker.opened);
    assert_eq!(picker.select(date(2024, 3, 31)).as_deref(), Some("2024-03-31"));
    assert!(!picker.opened);

    let page = picker.page(date(2024, 3, 15));
    assert!(page.cells.iter().filter(|cell| !cell.in_month).all(|cell| cell.disabled));
}

#[test]
fn drawer_unlocks_scrolling_on_every_dismissal() {
    for reason in [
        CloseReason::CloseButton,
        CloseReason::EscapeKey,
        CloseReason::OutsideClick,
    ] {
        assert!(overlay_state::sync("flow-drawer", true, OverlayConfig::drawer()));
        assert_eq!(scroll_lock::body_overflow(), "hidden");
        assert!(overlay_state::request_close("flow-drawer", reason));
        assert_eq!(scroll_lock::body_overflow(), "", "{reason:?}");
    }

    let mounted = overlay_state::mount("flow-drawer");
    assert!(overlay_state::sync("flow-drawer", true, OverlayConfig::drawer()));
    assert_eq!(scroll_lock::body_overflow(), "hidden");
    drop(mounted);
    assert_eq!(scroll_lock::body_overflow(), "");
}

#[test]
fn invalid_forms_never_reach_the_network() {
    let guard = SubmitGuard::new();
    let mut errors = FieldErrors::new();
    errors.check(required(FieldKey::new("title"), ""));
    errors.check(date_range(
        FieldKey::new("from"),
        "2024-03-10",
        FieldKey::new("to"),
        "2024-03-09",
    ));

    let result: Result<(), SubmitError<&str>> =
        block_on(guard.run(&errors, || async { Err("should not run") }));
    assert!(matches!(result, Err(SubmitError::Invalid(2))));
    assert!(!guard.is_in_flight());

    errors.clear();
    let result: Result<u32, SubmitError<&str>> = block_on(guard.run(&errors, || async { Ok(7) }));
    assert!(matches!(result, Ok(7)));
}
