use std::f32::consts::TAU;

use gpui::{
    AnyElement, Hsla, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    Styled, div, px,
};

use crate::id::ComponentId;
use crate::style::Size;
use crate::tokens::{FontSize, IconSize, RadiusToken, Space};

use super::primitives::h_stack;
use super::transition::TransitionExt;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SpinnerVariant {
    #[default]
    Oval,
    Dots,
}

/// Loading affordance shown in place of content while a request is in flight.
#[derive(IntoElement)]
pub struct Spinner {
    id: ComponentId,
    label: Option<SharedString>,
    variant: SpinnerVariant,
    size: Size,
    color: Option<Hsla>,
    theme: crate::theme::LocalTheme,
}

impl Spinner {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("spinner"),
            label: None,
            variant: SpinnerVariant::Oval,
            size: Size::Medium,
            color: None,
            theme: crate::theme::LocalTheme::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn variant(mut self, variant: SpinnerVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn ring_size_px(&self) -> f32 {
        match self.size {
            Size::Small => IconSize::Sm,
            Size::Medium => IconSize::Lg,
            Size::Large => IconSize::Xl,
        }
        .px()
    }

    fn resolved_color(&self) -> Hsla {
        self.color.unwrap_or_else(|| {
            self.theme
                .resolve_hsla(&self.theme.components.button.variants.primary.background)
        })
    }

    fn render_oval(&self, color: Hsla) -> AnyElement {
        let ring = self.ring_size_px();
        let segment = (ring * 0.18).max(2.0);
        let segments = 10usize;
        let radius = (ring - segment) * 0.5;

        let dots = (0..segments).map(|index| {
            let angle = -std::f32::consts::FRAC_PI_2 + (index as f32 / segments as f32) * TAU;
            let phase = index as f32 / segments as f32;
            div()
                .id(self.id.slot_index("segment", index))
                .absolute()
                .left(px(ring * 0.5 + radius * angle.cos() - segment * 0.5))
                .top(px(ring * 0.5 + radius * angle.sin() - segment * 0.5))
                .w(px(segment))
                .h(px(segment))
                .rounded(px(RadiusToken::Full.px()))
                .bg(color)
                .with_repeating_transition(
                    self.id.slot_index("segment-anim", index),
                    900,
                    move |this, delta| {
                        let distance = (delta - phase).rem_euclid(1.0);
                        let intensity = (1.0 - distance / 0.45).max(0.0);
                        this.opacity(0.18 + 0.82 * intensity)
                    },
                )
                .into_any_element()
        });

        div()
            .relative()
            .w(px(ring))
            .h(px(ring))
            .children(dots)
            .into_any_element()
    }

    fn render_dots(&self, color: Hsla) -> AnyElement {
        let dot = self.ring_size_px() / 3.0;
        let dots = (0..3).map(|index| {
            let phase = index as f32 / 3.0;
            div()
                .id(self.id.slot_index("dot", index))
                .w(px(dot))
                .h(px(dot))
                .rounded(px(RadiusToken::Full.px()))
                .bg(color)
                .with_repeating_transition(
                    self.id.slot_index("dot-anim", index),
                    840,
                    move |this, delta| {
                        let wave = (((delta + phase).fract() * TAU).sin() + 1.0) * 0.5;
                        this.opacity(0.3 + 0.7 * wave)
                    },
                )
                .into_any_element()
        });
        h_stack()
            .gap(px(Space::Xs.px()))
            .children(dots)
            .into_any_element()
    }
}

impl RenderOnce for Spinner {
    fn render(mut self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let color = self.resolved_color();
        let indicator = match self.variant {
            SpinnerVariant::Oval => self.render_oval(color),
            SpinnerVariant::Dots => self.render_dots(color),
        };

        let mut row = h_stack().gap(px(Space::Sm.px())).child(indicator);
        if let Some(label) = self.label {
            row = row.child(
                div()
                    .text_size(px(FontSize::Sm.px()))
                    .text_color(color)
                    .child(label),
            );
        }
        row
    }
}

crate::impl_theme_overridable!(Spinner);
