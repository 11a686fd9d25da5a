use std::rc::Rc;

use gpui::{
    InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, div,
    px,
};

use crate::id::ComponentId;
use crate::style::resolver::{Surface, shape_radius};
use crate::style::{InteractionState, ResolvedStyle, Shape, Size, StyleRecipe, resolve_surface};
use crate::theme::Theme;
use crate::tokens::{FontWeightToken, Shadow};

use super::control;
use super::interaction_adapter::{PressAdapter, bind_press_adapter};
use super::utils::{apply_resolved, apply_state_styles, quantized_stroke_px};

type ChangeHandler = Rc<dyn Fn(SharedString, &mut Window, &mut gpui::App)>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToggleOption {
    pub value: SharedString,
    pub label: SharedString,
    pub disabled: bool,
}

impl ToggleOption {
    pub fn new(value: impl Into<SharedString>, label: impl Into<SharedString>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl From<&str> for ToggleOption {
    fn from(value: &str) -> Self {
        Self::new(value.to_string(), value.to_string())
    }
}

impl From<(&str, &str)> for ToggleOption {
    fn from((value, label): (&str, &str)) -> Self {
        Self::new(value.to_string(), label.to_string())
    }
}

/// Exclusive single-select state. The active option is matched by value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToggleGroupModel {
    pub options: Vec<ToggleOption>,
    pub value: Option<SharedString>,
    pub disabled: bool,
}

impl ToggleGroupModel {
    pub fn new(options: impl IntoIterator<Item = ToggleOption>) -> Self {
        Self {
            options: options.into_iter().collect(),
            value: None,
            disabled: false,
        }
    }

    pub fn is_active(&self, value: &str) -> bool {
        self.value.as_deref().map(|v| &**v) == Some(value)
    }

    pub fn option_disabled(&self, value: &str) -> bool {
        self.disabled
            || self
                .options
                .iter()
                .find(|option| option.value.as_ref() == value)
                .is_none_or(|option| option.disabled)
    }

    /// Selects `value` and returns it for the change handler. Every enabled
    /// click reports, including one on the already active option; disabled
    /// options and a disabled group report nothing.
    pub fn click(&mut self, value: &str) -> Option<SharedString> {
        if self.option_disabled(value) {
            return None;
        }
        let value = SharedString::from(value.to_string());
        self.value = Some(value.clone());
        Some(value)
    }

    pub fn recipe(&self, value: &str, size: Size) -> ToggleOptionRecipe {
        ToggleOptionRecipe {
            active: self.is_active(value),
            size,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ToggleOptionRecipe {
    pub active: bool,
    pub size: Size,
}

impl StyleRecipe for ToggleOptionRecipe {
    fn resolve(&self, theme: &Theme, state: InteractionState) -> ResolvedStyle {
        let tokens = &theme.components.toggle_group;
        let (variant, state) = if self.active {
            let state = match state {
                InteractionState::Hover | InteractionState::Active => InteractionState::Default,
                other => other,
            };
            (&tokens.active, state)
        } else {
            (&tokens.inactive, state)
        };
        resolve_surface(
            theme,
            Surface {
                variant,
                size: tokens.sizes.for_size(self.size),
                radius: shape_radius(Shape::Rounded, tokens.radius),
                font_weight: FontWeightToken::Medium,
                shadow: if self.active { Shadow::Sm } else { Shadow::None },
            },
            state,
        )
    }
}

/// Segmented single-select control. Size accepts the short aliases through
/// [`crate::contracts::Sizeable::size_named`].
#[derive(IntoElement)]
pub struct ToggleButtonGroup {
    id: ComponentId,
    options: Vec<ToggleOption>,
    value: Option<SharedString>,
    value_controlled: bool,
    default_value: Option<SharedString>,
    size: Size,
    disabled: bool,
    full_width: bool,
    theme: crate::theme::LocalTheme,
    on_change: Option<ChangeHandler>,
}

impl ToggleButtonGroup {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("toggle-group"),
            options: Vec::new(),
            value: None,
            value_controlled: false,
            default_value: None,
            size: Size::Medium,
            disabled: false,
            full_width: false,
            theme: crate::theme::LocalTheme::default(),
            on_change: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn option(mut self, option: impl Into<ToggleOption>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn options<O: Into<ToggleOption>>(mut self, options: impl IntoIterator<Item = O>) -> Self {
        self.options.extend(options.into_iter().map(Into::into));
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

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn on_change(
        mut self,
        handler: impl Fn(SharedString, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }

    fn model(&self) -> ToggleGroupModel {
        let value = control::optional_text_state(
            &self.id,
            "value",
            self.value_controlled
                .then(|| self.value.as_ref().map(ToString::to_string)),
            self.default_value.as_ref().map(ToString::to_string),
        );
        ToggleGroupModel {
            options: self.options.clone(),
            value: value.map(SharedString::from),
            disabled: self.disabled,
        }
    }
}

impl RenderOnce for ToggleButtonGroup {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let model = self.model();
        let tokens = &self.theme.components.toggle_group;

        let mut track = div()
            .id(self.id.clone())
            .flex()
            .flex_row()
            .items_center()
            .gap(px(tokens.gap.px()))
            .p(px(tokens.track_padding.px()))
            .rounded(px(tokens.radius.px()))
            .bg(self.theme.resolve_hsla(&tokens.track_bg))
            .border(quantized_stroke_px(window, 1.0))
            .border_color(self.theme.resolve_hsla(&tokens.track_border));
        if self.full_width {
            track = track.w_full();
        }
        if self.disabled {
            track = track.opacity(0.55);
        }

        let controlled = self.value_controlled;
        let children = model.options.iter().enumerate().map(|(index, option)| {
            let option_disabled = model.option_disabled(&option.value);
            let styles = model
                .recipe(&option.value, self.size)
                .state_styles(&self.theme, option_disabled, false);

            let mut node = div()
                .id(self.id.slot_index("option", index))
                .flex()
                .items_center()
                .justify_center()
                .child(div().child(option.label.clone()));
            node = apply_resolved(node, &styles.base, window);
            node = apply_state_styles(node, &styles);
            if self.full_width {
                node = node.flex_1();
            }

            let id = self.id.clone();
            let value = option.value.clone();
            let group = model.clone();
            let handler = self.on_change.clone();
            let on_click = Rc::new(move |_: &gpui::ClickEvent, window: &mut Window, cx: &mut gpui::App| {
                let mut group = group.clone();
                let Some(next) = group.click(&value) else {
                    return;
                };
                tracing::trace!(group = %id, value = %next, "toggle option clicked");
                if !controlled {
                    control::set_optional_text_state(&id, "value", Some(next.to_string()));
                }
                if let Some(handler) = handler.as_ref() {
                    (handler)(next, window, cx);
                }
                window.refresh();
            });
            bind_press_adapter(
                node,
                PressAdapter::new(self.id.slot_index("option", index))
                    .enabled(!option_disabled)
                    .on_click(Some(on_click)),
            )
        });

        track.children(children.collect::<Vec<_>>())
    }
}

crate::impl_disableable!(ToggleButtonGroup);
crate::impl_theme_overridable!(ToggleButtonGroup);

impl crate::contracts::Sizeable for ToggleButtonGroup {
    fn size(self, value: Size) -> Self {
        ToggleButtonGroup::size(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses() -> ToggleGroupModel {
        ToggleGroupModel::new([
            ToggleOption::from("all"),
            ToggleOption::from("pending"),
            ToggleOption::from("resolved").disabled(true),
        ])
    }

    #[test]
    fn reclicking_active_option_still_reports() {
        let mut model = statuses();
        assert_eq!(model.click("pending").as_deref().map(|v| &**v), Some("pending"));
        assert_eq!(model.click("pending").as_deref().map(|v| &**v), Some("pending"));
        assert!(model.is_active("pending"));
    }

    #[test]
    fn disabled_option_and_disabled_group_are_no_ops() {
        let mut model = statuses();
        model.click("all");
        assert_eq!(model.click("resolved"), None);
        assert!(model.is_active("all"));

        model.disabled = true;
        assert_eq!(model.click("pending"), None);
        assert!(model.is_active("all"));
    }

    #[test]
    fn unknown_values_are_ignored() {
        let mut model = statuses();
        assert_eq!(model.click("archived"), None);
        assert_eq!(model.value, None);
    }

    #[test]
    fn selected_option_drops_its_hover_style() {
        let theme = Theme::default();
        let mut model = statuses();
        model.click("all");

        let before = model
            .recipe("pending", Size::Medium)
            .state_styles(&theme, false, false);
        assert!(before.hover.is_some());

        model.click("pending");
        let after = model
            .recipe("pending", Size::Medium)
            .state_styles(&theme, false, false);
        assert!(after.hover.is_none());
        assert_ne!(before.base, after.base);

        let previous = model.recipe("all", Size::Medium).state_styles(&theme, false, false);
        assert_eq!(previous.base, before.base);
    }
}
