use gpui::SharedString;

use crate::theme::Theme;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectOption {
    pub value: SharedString,
    pub label: SharedString,
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<SharedString>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            disabled: false,
        }
    }

    pub fn labeled(value: impl Into<SharedString>, label: impl Into<SharedString>) -> Self {
        Self::new(value).label(label)
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = label.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Plain strings become options whose label is their value.
impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl From<String> for SelectOption {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<(&str, &str)> for SelectOption {
    fn from((value, label): (&str, &str)) -> Self {
        Self::labeled(value.to_string(), label.to_string())
    }
}

pub fn normalize_options<O: Into<SelectOption>>(
    options: impl IntoIterator<Item = O>,
) -> Vec<SelectOption> {
    options.into_iter().map(Into::into).collect()
}

/// The leading placeholder row; it cannot be picked when the field is required.
pub fn placeholder_option(placeholder: &SharedString, required: bool) -> SelectOption {
    SelectOption::labeled("", placeholder.clone()).disabled(required)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChangeTarget {
    pub value: SharedString,
}

/// Change payload shaped like a form event: `event.target.value`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectChangeEvent {
    pub target: ChangeTarget,
}

impl SelectChangeEvent {
    pub fn new(value: impl Into<SharedString>) -> Self {
        Self {
            target: ChangeTarget {
                value: value.into(),
            },
        }
    }
}

/// Event for picking `value`, or `None` when the option is missing or disabled.
pub fn commit(options: &[SelectOption], value: &str) -> Option<SelectChangeEvent> {
    options
        .iter()
        .find(|option| option.value.as_ref() == value)
        .filter(|option| !option.disabled)
        .map(|option| SelectChangeEvent::new(option.value.clone()))
}

pub fn selected_label(options: &[SelectOption], value: Option<&str>) -> Option<SharedString> {
    let value = value.filter(|value| !value.is_empty())?;
    options
        .iter()
        .find(|option| option.value.as_ref() == value)
        .map(|option| option.label.clone())
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SelectVisualState {
    pub error: bool,
    pub focused: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectStyle {
    pub background: String,
    pub border: String,
    pub ring: Option<String>,
    pub opacity: f32,
}

/// Error colours beat focus colours; a focused field in error keeps its
/// ring but the ring turns to the danger hue.
pub fn select_style(theme: &Theme, state: SelectVisualState) -> SelectStyle {
    let tokens = &theme.components.select;
    let semantic = &theme.semantic;

    let border = if state.error {
        &tokens.border_error
    } else if state.focused {
        &tokens.border_focus
    } else {
        &tokens.border
    };
    let ring = match (state.focused && !state.disabled, state.error) {
        (true, true) => Some(&semantic.focus_ring_danger),
        (true, false) => Some(&semantic.focus_ring),
        (false, _) => None,
    };

    SelectStyle {
        background: theme.resolve_color(if state.disabled {
            &tokens.disabled_bg
        } else {
            &tokens.bg
        }),
        border: theme.resolve_color(border),
        ring: ring.map(|ring| theme.resolve_color(ring)),
        opacity: if state.disabled { 0.55 } else { 1.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_options_are_normalised() {
        let options = normalize_options(["A", "B"]);
        assert_eq!(options[1].value.as_ref(), "B");
        assert_eq!(options[1].label.as_ref(), "B");
        assert!(!options[0].disabled);
    }

    #[test]
    fn placeholder_is_disabled_only_when_required() {
        let placeholder = SharedString::from("Choose block");
        assert!(placeholder_option(&placeholder, true).disabled);
        assert!(!placeholder_option(&placeholder, false).disabled);
        assert_eq!(placeholder_option(&placeholder, false).value.as_ref(), "");
    }

    #[test]
    fn commit_skips_disabled_and_unknown_options() {
        let options = vec![SelectOption::new("A"), SelectOption::new("B").disabled(true)];
        assert_eq!(commit(&options, "A"), Some(SelectChangeEvent::new("A")));
        assert_eq!(commit(&options, "B"), None);
        assert_eq!(commit(&options, "C"), None);
    }

    #[test]
    fn error_wins_over_focus_but_ring_turns_danger() {
        let theme = Theme::default();
        let focused = select_style(
            &theme,
            SelectVisualState {
                focused: true,
                ..Default::default()
            },
        );
        let error = select_style(
            &theme,
            SelectVisualState {
                error: true,
                ..Default::default()
            },
        );
        let both = select_style(
            &theme,
            SelectVisualState {
                error: true,
                focused: true,
                disabled: false,
            },
        );

        assert_eq!(both.border, error.border);
        assert_ne!(both.border, focused.border);
        assert_eq!(error.ring, None);
        assert_eq!(
            both.ring,
            Some(theme.resolve_color(&theme.semantic.focus_ring_danger))
        );
        assert_eq!(
            focused.ring,
            Some(theme.resolve_color(&theme.semantic.focus_ring))
        );
    }

    #[test]
    fn disabled_select_dims_and_drops_ring() {
        let theme = Theme::default();
        let style = select_style(
            &theme,
            SelectVisualState {
                disabled: true,
                focused: true,
                error: false,
            },
        );
        assert_eq!(style.ring, None);
        assert!(style.opacity < 1.0);
    }

    #[test]
    fn selected_label_ignores_empty_value() {
        let options = normalize_options([("a", "Block A"), ("b", "Block B")]);
        assert_eq!(selected_label(&options, Some("b")).as_deref().map(|v| &**v), Some("Block B"));
        assert_eq!(selected_label(&options, Some("")), None);
        assert_eq!(selected_label(&options, None), None);
    }
}
