use std::rc::Rc;

use chrono::NaiveDate;
use gpui::{
    AnyElement, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::contracts::MotionAware;
use crate::id::ComponentId;
use crate::motion::MotionConfig;
use crate::style::Size;
use crate::theme::LocalTheme;

use super::control;
use super::date_picker_state::{
    self, CalendarCell, DateBounds, DatePickerModel, WEEKDAY_LABELS, format_iso, parse_iso,
};
use super::interaction_adapter::{ClickActivateHandler, PressAdapter, bind_press_adapter};
use super::popup::{self, PopupState, anchored_host};
use super::primitives::{h_stack, v_stack};
use super::select::DROPDOWN_ESTIMATE_PX;
use super::select_state::{SelectVisualState, select_style};
use super::transition::TransitionExt;
use super::utils::{box_shadow, hsla, quantized_stroke_px};

type DateChangeHandler = Rc<dyn Fn(SharedString, &mut Window, &mut gpui::App)>;

/// Writes a model back into the keyed store after an interaction.
fn store(id: &str, model: &DatePickerModel, value_controlled: bool) {
    control::set_text_state(id, "month", format_iso(model.visible_month));
    control::set_bool_state(id, "opened", model.opened);
    if !value_controlled {
        control::set_optional_text_state(id, "value", Some(model.value_iso()));
    }
}

#[derive(IntoElement)]
pub struct DatePicker {
    id: ComponentId,
    value: Option<SharedString>,
    value_controlled: bool,
    default_value: Option<SharedString>,
    min: Option<SharedString>,
    max: Option<SharedString>,
    placeholder: SharedString,
    label: Option<SharedString>,
    error: Option<SharedString>,
    required: bool,
    disabled: bool,
    size: Size,
    today: Option<NaiveDate>,
    theme: LocalTheme,
    motion: MotionConfig,
    on_change: Option<DateChangeHandler>,
}

impl DatePicker {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("date-picker"),
            value: None,
            value_controlled: false,
            default_value: None,
            min: None,
            max: None,
            placeholder: "Select date".into(),
            label: None,
            error: None,
            required: false,
            disabled: false,
            size: Size::Medium,
            today: None,
            theme: LocalTheme::default(),
            motion: MotionConfig::default(),
            on_change: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    /// Controlled ISO value; the empty string means no date.
    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = Some(value.into());
        self.value_controlled = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<SharedString>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn min(mut self, min: impl Into<SharedString>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<SharedString>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn error(mut self, error: impl Into<SharedString>) -> Self {
        let error = error.into();
        self.error = (!error.is_empty()).then_some(error);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Pins "today" instead of reading the local clock.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn on_change(
        mut self,
        handler: impl Fn(SharedString, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }

    fn model(&self, today: NaiveDate) -> DatePickerModel {
        let value = control::optional_text_state(
            &self.id,
            "value",
            self.value_controlled
                .then(|| self.value.as_ref().map(ToString::to_string)),
            self.default_value.as_ref().map(ToString::to_string),
        )
        .unwrap_or_default();
        let bounds = DateBounds::from_iso(self.min.as_deref().map(|v| &**v), self.max.as_deref().map(|v| &**v));
        let mut model = DatePickerModel::new(&value, bounds, today);

        let initial_month = format_iso(model.visible_month);
        let month = control::text_state(&self.id, "month", None, initial_month);
        if let Some(month) = parse_iso(&month) {
            model.visible_month = month;
        }
        model.opened = PopupState::resolve(&self.id, None, false).opened && !self.disabled;
        model
    }

    /// Handler that runs `apply` against a fresh copy of `model`, stores the
    /// result and reports any commit.
    fn action(
        &self,
        model: &DatePickerModel,
        apply: impl Fn(&mut DatePickerModel) -> Option<String> + 'static,
    ) -> ClickActivateHandler {
        let id = self.id.clone();
        let model = model.clone();
        let controlled = self.value_controlled;
        let handler = self.on_change.clone();
        Rc::new(
            move |_: &gpui::ClickEvent, window: &mut Window, cx: &mut gpui::App| {
                let mut next = model.clone();
                let committed = apply(&mut next);
                store(&id, &next, controlled);
                if let Some(value) = committed {
                    tracing::trace!(picker = %id, value = %value, "date committed");
                    if let Some(handler) = handler.as_ref() {
                        (handler)(SharedString::from(value), window, cx);
                    }
                }
                window.refresh();
            },
        )
    }

    fn render_input(&self, model: &DatePickerModel, window: &Window) -> AnyElement {
        let tokens = &self.theme.components.select;
        let style = select_style(
            &self.theme,
            SelectVisualState {
                error: self.error.is_some(),
                focused: model.opened,
                disabled: self.disabled,
            },
        );
        let size = tokens.sizes.for_size(self.size);
        let text = match model.value {
            Some(date) => div()
                .text_color(self.theme.resolve_hsla(&tokens.fg))
                .child(format_iso(date)),
            None => div()
                .text_color(self.theme.resolve_hsla(&tokens.placeholder))
                .child(self.placeholder.clone()),
        };

        let input = h_stack()
            .id(self.id.slot("input"))
            .relative()
            .w_full()
            .justify_between()
            .gap(px(size.gap.px()))
            .px(px(size.padding_x.px()))
            .py(px(size.padding_y.px()))
            .text_size(px(size.font_size.px()))
            .rounded(px(tokens.radius.px()))
            .bg(hsla(&style.background))
            .border(quantized_stroke_px(window, 1.0))
            .border_color(hsla(style.ring.as_ref().unwrap_or(&style.border)))
            .opacity(style.opacity)
            .child(text.flex_1())
            .child(div().flex_none().child("📅"))
            .child(popup::measure_trigger(self.id.clone()));

        if self.disabled {
            return input.cursor_not_allowed().into_any_element();
        }

        let id = self.id.clone();
        let input = input
            .cursor_pointer()
            .on_key_down(move |event, window, cx| {
                if control::is_escape_keystroke(event) && popup::apply_opened(&id, false, false) {
                    window.refresh();
                    cx.stop_propagation();
                }
            });
        bind_press_adapter(
            input,
            PressAdapter::new(self.id.slot("input")).on_click(Some(self.action(model, |model| {
                model.toggle();
                None
            }))),
        )
        .into_any_element()
    }

    fn render_day(&self, model: &DatePickerModel, cell: CalendarCell) -> AnyElement {
        let tokens = &self.theme.components.date_picker;
        let mut day = div()
            .id(self.id.slot_index("day", format_iso(cell.date)))
            .size(px(f32::from(tokens.cell_size)))
            .flex()
            .items_center()
            .justify_center()
            .rounded(px(tokens.cell_radius.px()))
            .text_size(px(tokens.layout.body_size.px()))
            .child(cell.date.format("%-d").to_string());

        if cell.today && !cell.selected {
            day = day
                .border_1()
                .border_color(self.theme.resolve_hsla(&tokens.today_border));
        }
        if cell.disabled {
            return day
                .text_color(self.theme.resolve_hsla(&tokens.day_disabled_fg))
                .cursor_not_allowed()
                .into_any_element();
        }
        if cell.selected {
            day = day
                .bg(self.theme.resolve_hsla(&tokens.day_selected_bg))
                .text_color(self.theme.resolve_hsla(&tokens.day_selected_fg));
        } else {
            let fg = if cell.in_month {
                &tokens.day_fg
            } else {
                &tokens.day_outside_fg
            };
            let hover_bg = self.theme.resolve_hsla(&tokens.day_hover_bg);
            day = day
                .text_color(self.theme.resolve_hsla(fg))
                .hover(move |style| style.bg(hover_bg));
        }

        let date = cell.date;
        bind_press_adapter(
            day.cursor_pointer(),
            PressAdapter::new(self.id.slot_index("day", format_iso(date)))
                .on_click(Some(self.action(model, move |model| model.select(date)))),
        )
        .into_any_element()
    }

    fn nav_button(
        &self,
        slot: &str,
        glyph: &'static str,
        handler: ClickActivateHandler,
    ) -> AnyElement {
        let tokens = &self.theme.components.date_picker;
        let hover_bg = self.theme.resolve_hsla(&tokens.day_hover_bg);
        bind_press_adapter(
            div()
                .id(self.id.slot(slot))
                .px(px(tokens.layout.item_gap.px()))
                .py(px(tokens.layout.gap.px()))
                .rounded(px(tokens.cell_radius.px()))
                .cursor_pointer()
                .text_color(self.theme.resolve_hsla(&tokens.header_fg))
                .hover(move |style| style.bg(hover_bg))
                .child(glyph),
            PressAdapter::new(self.id.slot(slot)).on_click(Some(handler)),
        )
        .into_any_element()
    }

    fn render_calendar(
        &self,
        model: &DatePickerModel,
        today: NaiveDate,
        window: &Window,
    ) -> AnyElement {
        let tokens = &self.theme.components.date_picker;
        let page = model.page(today);

        let header = h_stack()
            .justify_between()
            .child(self.nav_button(
                "prev",
                "‹",
                self.action(model, |model| {
                    model.previous_month();
                    None
                }),
            ))
            .child(
                div()
                    .text_size(px(tokens.layout.body_size.px()))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .text_color(self.theme.resolve_hsla(&tokens.header_fg))
                    .child(page.title()),
            )
            .child(self.nav_button(
                "next",
                "›",
                self.action(model, |model| {
                    model.next_month();
                    None
                }),
            ));

        let weekdays = h_stack().children(WEEKDAY_LABELS.iter().map(|label| {
            div()
                .size(px(f32::from(tokens.cell_size)))
                .flex()
                .items_center()
                .justify_center()
                .text_size(px(tokens.layout.caption_size.px()))
                .text_color(self.theme.resolve_hsla(&tokens.weekday_fg))
                .child(*label)
        }));

        let weeks = page.weeks().map(|week| {
            h_stack().children(week.iter().map(|cell| self.render_day(model, *cell)))
        });

        let footer = h_stack()
            .justify_between()
            .pt(px(tokens.layout.item_gap.px()))
            .child(self.nav_button(
                "today",
                "Today",
                self.action(model, move |model| model.select_today(today)),
            ))
            .child(self.nav_button(
                "clear",
                "Clear",
                self.action(model, |model| Some(model.clear())),
            ));

        let id = self.id.clone();
        v_stack()
            .id(self.id.slot("calendar"))
            .gap(px(tokens.layout.gap.px()))
            .p(px(tokens.layout.padding.px()))
            .rounded(px(tokens.radius.px()))
            .border(quantized_stroke_px(window, 1.0))
            .border_color(self.theme.resolve_hsla(&tokens.panel_border))
            .bg(self.theme.resolve_hsla(&tokens.panel_bg))
            .shadow(box_shadow(tokens.shadow))
            .child(header)
            .child(weekdays)
            .children(weeks.collect::<Vec<_>>())
            .child(footer)
            .on_mouse_down_out(move |_, window, _cx| {
                if popup::apply_opened(&id, false, false) {
                    window.refresh();
                }
            })
            .with_enter_transition(self.id.slot("calendar-enter"), self.motion)
            .into_any_element()
    }
}

impl Default for DatePicker {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl MotionAware for DatePicker {
    fn motion(mut self, value: MotionConfig) -> Self {
        self.motion = value;
        self
    }
}

impl RenderOnce for DatePicker {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let today = self.today.unwrap_or_else(date_picker_state::today);
        let model = self.model(today);

        let mut trigger = div()
            .id(self.id.slot("trigger"))
            .relative()
            .w_full()
            .child(self.render_input(&model, window));
        if model.opened {
            let viewport_height = f32::from(window.viewport_size().height);
            let placement =
                popup::dropdown_placement(&self.id, viewport_height, DROPDOWN_ESTIMATE_PX);
            trigger = trigger.child(anchored_host(
                &self.id,
                "anchor-host",
                placement,
                self.render_calendar(&model, today, window),
                24,
            ));
        }

        let tokens = &self.theme.components.select;
        let mut field = v_stack()
            .id(self.id.clone())
            .gap(px(tokens.field.gap.px()))
            .w_full();
        if let Some(label) = self.label.clone() {
            let mut row = h_stack()
                .gap(px(tokens.field.item_gap.px()))
                .text_size(px(tokens.field.body_size.px()))
                .text_color(self.theme.resolve_hsla(&tokens.label))
                .child(label);
            if self.required {
                row = row.child(
                    div()
                        .text_color(self.theme.resolve_hsla(&tokens.error_text))
                        .child("*"),
                );
            }
            field = field.child(row);
        }
        field = field.child(trigger);
        if let Some(error) = self.error.clone() {
            field = field.child(
                div()
                    .text_size(px(tokens.field.caption_size.px()))
                    .text_color(self.theme.resolve_hsla(&tokens.error_text))
                    .child(error),
            );
        }
        field
    }
}

crate::impl_disableable!(DatePicker);
crate::impl_theme_overridable!(DatePicker);

impl crate::contracts::Sizeable for DatePicker {
    fn size(self, value: Size) -> Self {
        DatePicker::size(self, value)
    }
}
