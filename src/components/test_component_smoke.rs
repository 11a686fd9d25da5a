use super::*;
use crate::style::{Orientation, Shape, Size, Variant};
use chrono::NaiveDate;
use gpui::{AnyElement, IntoElement, div};

fn into_any(element: impl IntoElement) -> AnyElement {
    element.into_any_element()
}

#[test]
fn smoke_display_components_render_into_any_element() {
    let _ = into_any(Badge::new("Pending").variant(Variant::Warning));
    let _ = into_any(Tag::new("Urgent").variant(Variant::Danger).size(Size::Small));
    let _ = into_any(Avatar::new("Asha Verma").size(Size::Large).ring(true));
    let _ = into_any(Spinner::new().label("Loading").variant(SpinnerVariant::Dots));
    let _ = into_any(
        Banner::error("Network unreachable")
            .title("Something went wrong")
            .action(Button::new("Retry")),
    );
    let _ = into_any(Banner::new("Saved").kind(BannerKind::Success));
}

#[test]
fn smoke_buttons_render_into_any_element() {
    let _ = into_any(Button::new("Save").variant(Variant::Primary).loading(true));
    let _ = into_any(Button::new("Gradient").gradient(true).shape(Shape::Pill));
    let _ = into_any(Button::without_label().icon(div()));
    let _ = into_any(IconButton::new(div()).aria_label("Close"));
    let _ = into_any(
        ButtonGroup::new()
            .orientation(Orientation::Vertical)
            .children([Button::new("One"), Button::new("Two")]),
    );
    let _ = into_any(
        ToggleButtonGroup::new()
            .option(("pending", "Pending"))
            .option(ToggleOption::new("resolved", "Resolved").disabled(true))
            .default_value("pending")
            .full_width(true),
    );
}

#[test]
fn smoke_pickers_render_into_any_element() {
    let _ = into_any(
        Select::new()
            .label("Room")
            .placeholder("Choose a room")
            .options(["A-01", "A-02"])
            .error("Room is required")
            .required(true),
    );
    let _ = into_any(
        DatePicker::new()
            .label("From")
            .value("2024-03-02")
            .min("2024-03-01")
            .today(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap_or_default()),
    );
}

#[test]
fn smoke_overlays_render_into_any_element() {
    let _ = into_any(
        Modal::new()
            .title("Delete complaint")
            .body("This cannot be undone.")
            .footer(Button::new("Delete").variant(Variant::Danger))
            .width(100.0),
    );
    let _ = into_any(
        Drawer::new("Complaint")
            .placement(DrawerPlacement::Bottom)
            .size(DrawerSize::Px(280.0))
            .content(div()),
    );
    let _ = into_any(
        Popover::new()
            .placement(Placement::Right)
            .trigger(div())
            .content(div()),
    );
    let _ = into_any(
        Tooltip::new("Copy room number")
            .delay(std::time::Duration::from_millis(50))
            .trigger(div()),
    );
}

#[test]
fn smoke_stat_cards_render_into_any_element() {
    let grid = StatGrid::new()
        .card(
            StatCard::new("Open", "12")
                .subtitle("this week")
                .trend(Trend::percent_change(10.0, 12.0)),
        )
        .card(StatCard::new("Resolved", "30").accent(Variant::Success));
    assert_eq!(grid.len(), 2);
    let _ = into_any(grid);
    let _ = into_any(StatCard::new("Flat", "0").trend(Trend::new(TrendDirection::Flat, "0%")));
}
