use std::rc::Rc;

use gpui::{
    AnyElement, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::contracts::MotionAware;
use crate::id::ComponentId;
use crate::motion::MotionConfig;
use crate::style::Size;
use crate::theme::LocalTheme;
use crate::tokens::Shadow;

use super::control;
use super::interaction_adapter::{ClickActivateHandler, PressAdapter, bind_press_adapter};
use super::popup::{self, PopupState, anchored_host};
use super::primitives::{h_stack, v_stack};
use super::select_state::{
    SelectChangeEvent, SelectOption, SelectVisualState, commit, normalize_options,
    placeholder_option, select_style, selected_label,
};
use super::transition::TransitionExt;
use super::utils::{box_shadow, hsla, quantized_stroke_px};

/// Height assumed for the dropdown when deciding whether it fits below.
pub const DROPDOWN_ESTIMATE_PX: f32 = 340.0;

type SelectChangeHandler = Rc<dyn Fn(&SelectChangeEvent, &mut Window, &mut gpui::App)>;

#[derive(IntoElement)]
pub struct Select {
    id: ComponentId,
    options: Vec<SelectOption>,
    value: Option<SharedString>,
    value_controlled: bool,
    default_value: Option<SharedString>,
    placeholder: Option<SharedString>,
    label: Option<SharedString>,
    error: Option<SharedString>,
    required: bool,
    disabled: bool,
    size: Size,
    theme: LocalTheme,
    motion: MotionConfig,
    on_change: Option<SelectChangeHandler>,
}

impl Select {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("select"),
            options: Vec::new(),
            value: None,
            value_controlled: false,
            default_value: None,
            placeholder: None,
            label: None,
            error: None,
            required: false,
            disabled: false,
            size: Size::Medium,
            theme: LocalTheme::default(),
            motion: MotionConfig::default(),
            on_change: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    /// Accepts plain strings, `(value, label)` pairs or full options.
    pub fn options<O: Into<SelectOption>>(mut self, options: impl IntoIterator<Item = O>) -> Self {
        self.options = normalize_options(options);
        self
    }

    pub fn option(mut self, option: impl Into<SelectOption>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = Some(value.into());
        self.value_controlled = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<SharedString>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Error text shown below the control. An empty string clears it.
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

    pub fn on_change(
        mut self,
        handler: impl Fn(&SelectChangeEvent, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }

    fn resolved_value(&self) -> Option<SharedString> {
        control::optional_text_state(
            &self.id,
            "value",
            self.value_controlled
                .then(|| self.value.as_ref().map(ToString::to_string)),
            self.default_value.as_ref().map(ToString::to_string),
        )
        .map(SharedString::from)
    }

    fn rows(&self) -> Vec<SelectOption> {
        let mut rows = Vec::with_capacity(self.options.len() + 1);
        if let Some(placeholder) = self.placeholder.as_ref() {
            rows.push(placeholder_option(placeholder, self.required));
        }
        rows.extend(self.options.iter().cloned());
        rows
    }

    fn render_label(&self) -> Option<AnyElement> {
        let label = self.label.clone()?;
        let tokens = &self.theme.components.select;
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
        Some(row.into_any_element())
    }

    fn render_control(&self, opened: bool, window: &Window) -> AnyElement {
        let tokens = &self.theme.components.select;
        let focused = control::focused_state(&self.id, None, false) || opened;
        let style = select_style(
            &self.theme,
            SelectVisualState {
                error: self.error.is_some(),
                focused,
                disabled: self.disabled,
            },
        );
        let size = tokens.sizes.for_size(self.size);
        let value = self.resolved_value();
        let rows = self.rows();

        let text = match selected_label(&rows, value.as_deref().map(|v| &**v)) {
            Some(label) => div()
                .text_color(self.theme.resolve_hsla(&tokens.fg))
                .child(label),
            None => div()
                .text_color(self.theme.resolve_hsla(&tokens.placeholder))
                .child(self.placeholder.clone().unwrap_or_default()),
        };

        let mut control_node = h_stack()
            .id(self.id.slot("control"))
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
            .child(text.flex_1().min_w_0().truncate())
            .child(div().flex_none().child(if opened { "▴" } else { "▾" }))
            .child(popup::measure_trigger(self.id.clone()));

        if self.disabled {
            return control_node.cursor_not_allowed().into_any_element();
        }

        control_node = control_node.cursor_pointer();
        let id = self.id.clone();
        let toggle: ClickActivateHandler = Rc::new(
            move |_: &gpui::ClickEvent, window: &mut Window, _cx: &mut gpui::App| {
                let next = !control::bool_state(&id, "opened", None, false);
                popup::apply_opened(&id, false, next);
                control::set_focused_state(&id, true);
                window.refresh();
            },
        );
        let id = self.id.clone();
        control_node = control_node.on_key_down(move |event, window, cx| {
            if control::is_escape_keystroke(event) && popup::apply_opened(&id, false, false) {
                window.refresh();
                cx.stop_propagation();
            }
        });
        bind_press_adapter(
            control_node,
            PressAdapter::new(self.id.slot("control")).on_click(Some(toggle)),
        )
        .into_any_element()
    }

    fn render_dropdown(&self, window: &Window) -> AnyElement {
        let tokens = &self.theme.components.select;
        let current = self.resolved_value();
        let rows = self.rows();
        let width = popup::trigger_bounds(&self.id).map(|bounds| bounds.width);

        let items = rows.iter().enumerate().map(|(index, option)| {
            let selected = current.as_deref().map(|v| &**v) == Some(option.value.as_ref());
            let mut row = div()
                .id(self.id.slot_index("option", index))
                .px(px(tokens.option_padding_x.px()))
                .py(px(tokens.option_padding_y.px()))
                .rounded(px(tokens.option_radius.px()))
                .text_size(px(tokens.dropdown.body_size.px()))
                .truncate()
                .child(option.label.clone());

            if option.disabled {
                return row
                    .text_color(self.theme.resolve_hsla(&tokens.option_disabled_fg))
                    .cursor_not_allowed()
                    .into_any_element();
            }
            if selected {
                row = row
                    .bg(self.theme.resolve_hsla(&tokens.option_selected_bg))
                    .text_color(self.theme.resolve_hsla(&tokens.option_selected_fg));
            } else {
                let hover_bg = self.theme.resolve_hsla(&tokens.option_hover_bg);
                row = row
                    .text_color(self.theme.resolve_hsla(&tokens.fg))
                    .hover(move |style| style.bg(hover_bg));
            }

            let id = self.id.clone();
            let options = rows.clone();
            let value = option.value.clone();
            let controlled = self.value_controlled;
            let handler = self.on_change.clone();
            let on_pick: ClickActivateHandler = Rc::new(
                move |_: &gpui::ClickEvent, window: &mut Window, cx: &mut gpui::App| {
                    let Some(event) = commit(&options, &value) else {
                        return;
                    };
                    tracing::trace!(select = %id, value = %event.target.value, "option committed");
                    if !controlled {
                        control::set_optional_text_state(&id, "value", Some(value.to_string()));
                    }
                    popup::apply_opened(&id, false, false);
                    if let Some(handler) = handler.as_ref() {
                        (handler)(&event, window, cx);
                    }
                    window.refresh();
                },
            );
            bind_press_adapter(
                row.cursor_pointer(),
                PressAdapter::new(self.id.slot_index("option", index)).on_click(Some(on_pick)),
            )
            .into_any_element()
        });

        let mut dropdown = v_stack()
            .id(self.id.slot("dropdown"))
            .gap(px(tokens.dropdown.gap.px()))
            .p(px(tokens.dropdown.padding.px()))
            .max_h(px(DROPDOWN_ESTIMATE_PX - 40.0))
            .overflow_y_scroll()
            .rounded(px(tokens.radius.px()))
            .border(quantized_stroke_px(window, 1.0))
            .border_color(self.theme.resolve_hsla(&tokens.dropdown_border))
            .bg(self.theme.resolve_hsla(&tokens.dropdown_bg))
            .shadow(box_shadow(Shadow::Md))
            .children(items.collect::<Vec<_>>());
        dropdown = match width {
            Some(width) => dropdown.w(px(width)),
            None => dropdown.min_w(px(f32::from(tokens.dropdown_min_width))),
        };

        let id = self.id.clone();
        dropdown
            .on_mouse_down_out(move |_, window, _cx| {
                if popup::apply_opened(&id, false, false) {
                    window.refresh();
                }
            })
            .with_enter_transition(self.id.slot("dropdown-enter"), self.motion)
            .into_any_element()
    }
}

impl Default for Select {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl MotionAware for Select {
    fn motion(mut self, value: MotionConfig) -> Self {
        self.motion = value;
        self
    }
}

impl RenderOnce for Select {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let state = PopupState::resolve(&self.id, None, false);
        let opened = state.opened && !self.disabled;

        let mut trigger = div()
            .id(self.id.slot("trigger"))
            .relative()
            .w_full()
            .child(self.render_control(opened, window));

        if opened {
            let viewport_height = f32::from(window.viewport_size().height);
            let placement =
                popup::dropdown_placement(&self.id, viewport_height, DROPDOWN_ESTIMATE_PX);
            trigger = trigger.child(anchored_host(
                &self.id,
                "anchor-host",
                placement,
                self.render_dropdown(window),
                24,
            ));
        }

        let layout = self.theme.components.select.field;
        let mut field = v_stack()
            .id(self.id.clone())
            .gap(px(layout.gap.px()))
            .w_full();
        if let Some(label) = self.render_label() {
            field = field.child(label);
        }
        field = field.child(trigger);
        if let Some(error) = self.error.clone() {
            let color = self
                .theme
                .resolve_hsla(&self.theme.components.select.error_text);
            field = field.child(
                div()
                    .text_size(px(layout.caption_size.px()))
                    .text_color(color)
                    .child(error),
            );
        }
        field
    }
}

crate::impl_disableable!(Select);
crate::impl_theme_overridable!(Select);

impl crate::contracts::Sizeable for Select {
    fn size(self, value: Size) -> Self {
        Select::size(self, value)
    }
}
