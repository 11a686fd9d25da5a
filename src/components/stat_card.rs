use gpui::{
    AnyElement, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, div, px,
};

use crate::id::ComponentId;
use crate::style::Variant;
use crate::theme::{ColorValue, LocalTheme, Theme};

use super::primitives::{h_stack, v_stack};
use super::utils::{box_shadow, quantized_stroke_px};

type SlotRenderer = Box<dyn FnOnce() -> AnyElement>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => "→",
        }
    }

    pub fn color(self, theme: &Theme) -> &ColorValue {
        let tokens = &theme.components.stat_card;
        match self {
            Self::Up => &tokens.trend_up,
            Self::Down => &tokens.trend_down,
            Self::Flat => &tokens.trend_flat,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    pub label: SharedString,
}

impl Trend {
    pub fn new(direction: TrendDirection, label: impl Into<SharedString>) -> Self {
        Self {
            direction,
            label: label.into(),
        }
    }

    /// Percentage change from `previous` to `current`, e.g. `+12.5%`.
    /// From a zero baseline there is no percentage; the trend keeps its
    /// direction and reads `new`.
    pub fn percent_change(previous: f64, current: f64) -> Self {
        if previous == 0.0 {
            return match TrendDirection::from_delta(current) {
                TrendDirection::Flat => Self::new(TrendDirection::Flat, "0%"),
                direction => Self::new(direction, "new"),
            };
        }
        let delta = (current - previous) / previous.abs() * 100.0;
        let direction = TrendDirection::from_delta(delta);
        let label = match direction {
            TrendDirection::Up => format!("+{delta:.1}%"),
            TrendDirection::Down => format!("{delta:.1}%"),
            TrendDirection::Flat => "0%".to_string(),
        };
        Self::new(direction, label)
    }
}

/// Headline metric tile.
#[derive(IntoElement)]
pub struct StatCard {
    id: ComponentId,
    title: SharedString,
    value: SharedString,
    subtitle: Option<SharedString>,
    trend: Option<Trend>,
    accent: Variant,
    icon: Option<SlotRenderer>,
    theme: LocalTheme,
}

impl StatCard {
    #[track_caller]
    pub fn new(title: impl Into<SharedString>, value: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("stat-card"),
            title: title.into(),
            value: value.into(),
            subtitle: None,
            trend: None,
            accent: Variant::Primary,
            icon: None,
            theme: LocalTheme::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<SharedString>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn trend(mut self, trend: Trend) -> Self {
        self.trend = Some(trend);
        self
    }

    /// Colour of the icon tile.
    pub fn accent(mut self, accent: Variant) -> Self {
        self.accent = accent;
        self
    }

    pub fn icon(mut self, content: impl IntoElement + 'static) -> Self {
        self.icon = Some(Box::new(|| content.into_any_element()));
        self
    }
}

impl RenderOnce for StatCard {
    fn render(mut self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let tokens = &self.theme.components.stat_card;
        let hover_shadow = box_shadow(tokens.hover_shadow);

        let layout = tokens.layout;
        let mut text = v_stack()
            .gap(px(layout.gap.px()))
            .min_w_0()
            .child(
                div()
                    .text_size(px(layout.body_size.px()))
                    .text_color(self.theme.resolve_hsla(&tokens.title))
                    .child(self.title.clone()),
            )
            .child(
                div()
                    .text_size(px(layout.title_size.px()))
                    .font_weight(gpui::FontWeight::BOLD)
                    .text_color(self.theme.resolve_hsla(&tokens.value))
                    .child(self.value.clone()),
            );
        if let Some(trend) = self.trend.as_ref() {
            text = text.child(
                h_stack()
                    .gap(px(layout.gap.px()))
                    .text_size(px(layout.caption_size.px()))
                    .text_color(self.theme.resolve_hsla(trend.direction.color(&self.theme)))
                    .child(trend.direction.arrow())
                    .child(trend.label.clone()),
            );
        }
        if let Some(subtitle) = self.subtitle.clone() {
            text = text.child(
                div()
                    .text_size(px(layout.caption_size.px()))
                    .text_color(self.theme.resolve_hsla(&tokens.subtitle))
                    .child(subtitle),
            );
        }

        let mut row = h_stack()
            .justify_between()
            .items_start()
            .gap(px(layout.item_gap.px()))
            .child(text);
        if let Some(icon) = self.icon.take() {
            let accent = tokens.accents.get(self.accent);
            row = row.child(
                div()
                    .flex()
                    .flex_none()
                    .items_center()
                    .justify_center()
                    .size(px(f32::from(tokens.icon_tile)))
                    .rounded(px(tokens.radius.px() * 0.75))
                    .bg(self.theme.resolve_hsla(&accent.background))
                    .text_color(self.theme.resolve_hsla(&accent.foreground))
                    .child(icon()),
            );
        }

        div()
            .id(self.id.clone())
            .p(px(layout.padding.px()))
            .rounded(px(tokens.radius.px()))
            .bg(self.theme.resolve_hsla(&tokens.bg))
            .border(quantized_stroke_px(window, 1.0))
            .border_color(self.theme.resolve_hsla(&tokens.border))
            .shadow(box_shadow(tokens.shadow))
            .hover(move |style| style.shadow(hover_shadow.clone()))
            .child(row)
    }
}

crate::impl_theme_overridable!(StatCard);

/// Responsive row of stat cards; wraps to new lines below `min_card_width`.
#[derive(IntoElement)]
pub struct StatGrid {
    id: ComponentId,
    cards: Vec<StatCard>,
    min_card_width: f32,
    theme: LocalTheme,
}

impl StatGrid {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("stat-grid"),
            cards: Vec::new(),
            min_card_width: 220.0,
            theme: LocalTheme::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn card(mut self, card: StatCard) -> Self {
        self.cards.push(card);
        self
    }

    pub fn cards(mut self, cards: impl IntoIterator<Item = StatCard>) -> Self {
        self.cards.extend(cards);
        self
    }

    pub fn min_card_width(mut self, width: f32) -> Self {
        self.min_card_width = width.max(0.0);
        self
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

crate::impl_theme_overridable!(StatGrid);

impl Default for StatGrid {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl RenderOnce for StatGrid {
    fn render(mut self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let min_width = px(self.min_card_width);
        div()
            .id(self.id)
            .flex()
            .flex_row()
            .flex_wrap()
            .gap(px(self.theme.components.stat_card.grid_gap.px()))
            .w_full()
            .children(
                self.cards
                    .into_iter()
                    .map(|card| div().flex_1().min_w(min_width).child(card)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_direction_follows_sign() {
        assert_eq!(TrendDirection::from_delta(3.0), TrendDirection::Up);
        assert_eq!(TrendDirection::from_delta(-0.5), TrendDirection::Down);
        assert_eq!(TrendDirection::from_delta(0.0), TrendDirection::Flat);
    }

    #[test]
    fn percent_change_formats_signed_label() {
        let up = Trend::percent_change(40.0, 50.0);
        assert_eq!(up.direction, TrendDirection::Up);
        assert_eq!(up.label.as_ref(), "+25.0%");

        let down = Trend::percent_change(50.0, 40.0);
        assert_eq!(down.direction, TrendDirection::Down);
        assert_eq!(down.label.as_ref(), "-20.0%");

    }

    #[test]
    fn growth_from_zero_is_reported_as_new() {
        let fresh = Trend::percent_change(0.0, 12.0);
        assert_eq!(fresh.direction, TrendDirection::Up);
        assert_eq!(fresh.label.as_ref(), "new");

        let still = Trend::percent_change(0.0, 0.0);
        assert_eq!(still.direction, TrendDirection::Flat);
        assert_eq!(still.label.as_ref(), "0%");
    }

    #[test]
    fn trend_colours_come_from_the_theme() {
        let theme = Theme::default();
        assert_eq!(
            TrendDirection::Down.color(&theme),
            &theme.components.stat_card.trend_down
        );
        assert_ne!(
            TrendDirection::Up.color(&theme),
            TrendDirection::Down.color(&theme)
        );
    }
}
