use chrono::NaiveDate;
use gpui::{IntoElement, div};

fn into_any(element: impl IntoElement) -> gpui::AnyElement {
    element.into_any_element()
}

fn assert_render_once<T: gpui::RenderOnce>() {}

#[test]
fn widgets_facade_exports_render_components() {
    assert_render_once::<crate::widgets::form::Button>();
    assert_render_once::<crate::widgets::form::IconButton>();
    assert_render_once::<crate::widgets::form::ButtonGroup>();
    assert_render_once::<crate::widgets::form::ToggleButtonGroup>();
    assert_render_once::<crate::widgets::form::Select>();
    assert_render_once::<crate::widgets::form::DatePicker>();
    assert_render_once::<crate::widgets::overlay::Modal>();
    assert_render_once::<crate::widgets::overlay::Drawer>();
    assert_render_once::<crate::widgets::overlay::Popover>();
    assert_render_once::<crate::widgets::overlay::Tooltip>();
    assert_render_once::<crate::widgets::display::Badge>();
    assert_render_once::<crate::widgets::display::Banner>();
    assert_render_once::<crate::widgets::data::StatGrid>();
    assert_render_once::<crate::widgets::data::ComplaintBoardView>();
    assert_render_once::<crate::widgets::data::RemoteView>();
}

#[test]
fn prelude_smoke_builds_core_widgets() {
    use crate::prelude::*;

    let _ = into_any(Button::new("Submit").variant(Variant::Primary).size(Size::Medium));
    let _ = into_any(IconButton::new(div()).aria_label("Refresh"));
    let _ = into_any(
        ButtonGroup::new()
            .child(Button::new("Day"))
            .child(Button::new("Week"))
            .attached(true),
    );
    let _ = into_any(
        ToggleButtonGroup::new()
            .options([ToggleOption::new("all", "All"), ToggleOption::new("open", "Open")])
            .value("all"),
    );
    let _ = into_any(
        Select::new()
            .placeholder("Choose a room")
            .option(SelectOption::labeled("b-14", "B-14"))
            .required(true),
    );
    let _ = into_any(
        DatePicker::new()
            .min("2024-01-01")
            .max("2024-12-31")
            .today(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap_or_default()),
    );
    let _ = into_any(Modal::new().title("Confirm").body("Close this complaint?"));
    let _ = into_any(Drawer::new("Details").placement(DrawerPlacement::Left));
    let _ = into_any(Popover::new().trigger(div()).content(div()));
    let _ = into_any(Tooltip::new("Copy").trigger(div()));
    let _ = into_any(ComplaintBoardView::new(ComplaintBoard::new(Vec::new())));
    let _ = into_any(RemoteView::new(&Remote::<u32>::Loading, |_| div().into_any_element()));
}

#[test]
fn form_public_api_smoke_compiles() {
    use crate::form::{FieldErrors, FieldKey, SubmitGuard, date_range, required};

    let title = FieldKey::new("title");
    let mut errors = FieldErrors::new();
    errors.check(required(title, " "));
    errors.check(date_range(
        FieldKey::new("from"),
        "2024-03-10",
        FieldKey::new("to"),
        "2024-03-01",
    ));
    assert_eq!(errors.len(), 2);

    let guard = SubmitGuard::new();
    assert!(guard.try_submit::<()>(&errors).is_err());
    errors.clear();
    let ticket = guard.try_submit::<()>(&errors);
    assert!(ticket.is_ok());
    assert!(guard.is_in_flight());
}
