use std::rc::Rc;

use gpui::{
    ClickEvent, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::components::primitives::{h_stack, v_stack};
use crate::components::utils::quantized_stroke_px;
use crate::components::{
    Avatar, Badge, StatCard, StatGrid, Tag, ToggleButtonGroup, ToggleOption, Trend,
};
use crate::id::ComponentId;
use crate::style::{Size, Variant};
use crate::theme::LocalTheme;
use crate::tokens::{FontSize, Space};

use super::complaints::{Complaint, ComplaintBoard, ComplaintStatus};

type StatusFilterHandler = Rc<dyn Fn(Option<ComplaintStatus>, &mut Window, &mut gpui::App)>;
type OpenHandler = Rc<dyn Fn(&Complaint, &mut Window, &mut gpui::App)>;

const ALL_FILTER: &str = "all";

pub fn status_filter_value(status: Option<ComplaintStatus>) -> &'static str {
    status.map(ComplaintStatus::as_str).unwrap_or(ALL_FILTER)
}

/// Inverse of [`status_filter_value`]; anything unrecognised clears the
/// filter.
pub fn parse_status_filter(value: &str) -> Option<ComplaintStatus> {
    ComplaintStatus::from_name(value)
}

/// Secondary line under a complaint title, e.g. `Room B-1 · Plumbing · 02 Mar 2024`.
pub fn row_meta(complaint: &Complaint) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(room) = complaint.room.as_deref().filter(|room| !room.is_empty()) {
        parts.push(format!("Room {room}"));
    }
    if let Some(category) = complaint.category.as_deref().filter(|c| !c.is_empty()) {
        parts.push(category.to_string());
    }
    parts.push(complaint.created_at.format("%d %b %Y").to_string());
    parts.join(" · ")
}

/// Complaint dashboard: headline stats, a status filter and the filtered
/// list. The board is owned by the caller, which applies filter changes and
/// feed merges and re-renders.
#[derive(IntoElement)]
pub struct ComplaintBoardView {
    id: ComponentId,
    board: ComplaintBoard,
    previous_open: Option<usize>,
    theme: LocalTheme,
    on_status_filter: Option<StatusFilterHandler>,
    on_open: Option<OpenHandler>,
}

impl ComplaintBoardView {
    #[track_caller]
    pub fn new(board: ComplaintBoard) -> Self {
        Self {
            id: ComponentId::auto("complaint-board"),
            board,
            previous_open: None,
            theme: LocalTheme::default(),
            on_status_filter: None,
            on_open: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    /// Open-complaint count from the previous period, for the trend arrow.
    pub fn previous_open(mut self, count: usize) -> Self {
        self.previous_open = Some(count);
        self
    }

    pub fn on_status_filter(
        mut self,
        handler: impl Fn(Option<ComplaintStatus>, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_status_filter = Some(Rc::new(handler));
        self
    }

    pub fn on_open(
        mut self,
        handler: impl Fn(&Complaint, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_open = Some(Rc::new(handler));
        self
    }

    fn render_stats(&self) -> StatGrid {
        let stats = self.board.stats();
        let mut open = StatCard::new("Open", stats.open().to_string())
            .with_id(self.id.slot("stat-open"))
            .accent(Variant::Warning);
        if let Some(previous) = self.previous_open {
            open = open.trend(Trend::percent_change(previous as f64, stats.open() as f64));
        }
        StatGrid::new()
            .with_id(self.id.slot("stats"))
            .card(
                StatCard::new("Total complaints", stats.total.to_string())
                    .with_id(self.id.slot("stat-total")),
            )
            .card(open)
            .card(
                StatCard::new("Resolved", stats.resolved.to_string())
                    .with_id(self.id.slot("stat-resolved"))
                    .accent(Variant::Success)
                    .subtitle(format!("{:.0}% resolution rate", stats.resolution_rate())),
            )
            .card(
                StatCard::new("Urgent", stats.urgent_open.to_string())
                    .with_id(self.id.slot("stat-urgent"))
                    .accent(Variant::Danger)
                    .subtitle("open and marked urgent"),
            )
    }

    fn render_filter(&self) -> ToggleButtonGroup {
        let stats = self.board.stats();
        let options = std::iter::once(ToggleOption::new(
            ALL_FILTER,
            format!("All ({})", stats.total),
        ))
        .chain(ComplaintStatus::ALL.into_iter().map(|status| {
            ToggleOption::new(
                status.as_str(),
                format!("{} ({})", status.as_str(), stats.count(status)),
            )
        }));

        let mut group = ToggleButtonGroup::new()
            .with_id(self.id.slot("status-filter"))
            .size(Size::Small)
            .options(options)
            .value(status_filter_value(self.board.filter().status));
        if let Some(handler) = self.on_status_filter.clone() {
            group = group.on_change(move |value: SharedString, window, cx| {
                (handler)(parse_status_filter(&value), window, cx)
            });
        }
        group
    }

    fn render_row(&self, index: usize, complaint: &Complaint, window: &Window) -> impl IntoElement {
        let border = self.theme.resolve_hsla(&self.theme.semantic.border_subtle);
        let hover_bg = self.theme.resolve_hsla(&self.theme.semantic.bg_soft);
        let student = complaint.student_name.clone().unwrap_or_default();

        let mut row = h_stack()
            .id(self.id.slot_index("row", index))
            .gap(px(Space::Md.px()))
            .px(px(Space::Lg.px()))
            .py(px(Space::Md.px()))
            .border_b(quantized_stroke_px(window, 1.0))
            .border_color(border)
            .hover(move |style| style.bg(hover_bg))
            .child(
                Avatar::new(student)
                    .with_id(self.id.slot_index("avatar", index))
                    .size(Size::Small),
            )
            .child(
                v_stack()
                    .flex_1()
                    .min_w_0()
                    .gap(px(Space::Xxs.px()))
                    .child(
                        div()
                            .truncate()
                            .font_weight(gpui::FontWeight::MEDIUM)
                            .text_color(self.theme.resolve_hsla(&self.theme.semantic.text_primary))
                            .child(complaint.title.clone()),
                    )
                    .child(
                        div()
                            .text_size(px(FontSize::Xs.px()))
                            .text_color(self.theme.resolve_hsla(&self.theme.semantic.text_muted))
                            .child(row_meta(complaint)),
                    ),
            )
            .child(
                Tag::new(complaint.priority.as_str())
                    .with_id(self.id.slot_index("priority", index))
                    .variant(complaint.priority.tag_variant())
                    .size(Size::Small),
            )
            .child(
                Badge::new(complaint.status.as_str())
                    .with_id(self.id.slot_index("status", index))
                    .variant(complaint.status.badge_variant()),
            );

        if let Some(handler) = self.on_open.clone() {
            let complaint = complaint.clone();
            row = row.cursor_pointer().on_click(
                move |_: &ClickEvent, window: &mut Window, cx: &mut gpui::App| {
                    (handler)(&complaint, window, cx)
                },
            );
        }
        row
    }
}

impl RenderOnce for ComplaintBoardView {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let window: &Window = window;
        let visible = self.board.visible();

        let list = if visible.is_empty() {
            div()
                .py(px(Space::Xxl.px()))
                .flex()
                .justify_center()
                .text_size(px(FontSize::Sm.px()))
                .text_color(self.theme.resolve_hsla(&self.theme.semantic.text_muted))
                .child(if self.board.filter().is_active() {
                    "No complaints match the current filter"
                } else {
                    "No complaints yet"
                })
                .into_any_element()
        } else {
            v_stack()
                .children(
                    visible
                        .iter()
                        .enumerate()
                        .map(|(index, complaint)| self.render_row(index, complaint, window)),
                )
                .into_any_element()
        };

        v_stack()
            .id(self.id.clone())
            .w_full()
            .gap(px(Space::Lg.px()))
            .child(self.render_stats())
            .child(self.render_filter())
            .child(
                div()
                    .w_full()
                    .rounded(px(self.theme.components.stat_card.radius.px()))
                    .border(quantized_stroke_px(window, 1.0))
                    .border_color(self.theme.resolve_hsla(&self.theme.semantic.border_subtle))
                    .bg(self.theme.resolve_hsla(&self.theme.semantic.bg_surface))
                    .overflow_hidden()
                    .child(list),
            )
    }
}

crate::impl_theme_overridable!(ComplaintBoardView);
