use std::rc::Rc;

use gpui::{
    BoxShadow, ClickEvent, FontWeight, Hsla, Pixels, StatefulInteractiveElement, Styled, Window,
    point, px,
};

use crate::style::{Cursor, ResolvedStyle, StateStyles};
use crate::tokens::Shadow;

pub type PressHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut gpui::App)>;

pub fn hsla(hex: &str) -> Hsla {
    crate::theme::hsla_from_hex(hex)
}

pub fn box_shadow(shadow: Shadow) -> Vec<BoxShadow> {
    shadow
        .spec()
        .map(|spec| {
            vec![BoxShadow {
                color: gpui::black().opacity(spec.opacity),
                offset: point(px(0.0), px(spec.offset_y)),
                blur_radius: px(spec.blur),
                spread_radius: px(spec.spread),
            }]
        })
        .unwrap_or_default()
}

/// Paints the resting style onto a surface.
pub fn apply_resolved<T: Styled>(node: T, style: &ResolvedStyle, window: &Window) -> T {
    let mut node = node
        .bg(style.background.to_background())
        .text_color(hsla(&style.foreground))
        .text_size(px(style.font_size))
        .font_weight(FontWeight(f32::from(style.font_weight)))
        .px(px(style.padding_x))
        .py(px(style.padding_y))
        .gap(px(style.gap))
        .rounded(px(style.radius))
        .opacity(style.opacity)
        .shadow(box_shadow(style.shadow));

    node = match &style.border {
        Some(border) => node
            .border(quantized_stroke_px(window, 1.0))
            .border_color(hsla(border)),
        None => node,
    };
    if let Some(ring) = &style.ring {
        node = node
            .border(quantized_stroke_px(window, 2.0))
            .border_color(hsla(ring));
    }

    match style.cursor {
        Cursor::Pointer => node.cursor_pointer(),
        Cursor::Default => node.cursor_default(),
        Cursor::NotAllowed => node.cursor_not_allowed(),
    }
}

fn delta_refinement(style: &ResolvedStyle) -> gpui::StyleRefinement {
    let mut refinement = gpui::StyleRefinement::default()
        .bg(style.background.to_background())
        .text_color(hsla(&style.foreground))
        .shadow(box_shadow(style.shadow));
    if let Some(border) = &style.border {
        refinement = refinement.border_color(hsla(border));
    }
    if let Some(ring) = &style.ring {
        refinement = refinement.border_color(hsla(ring));
    }
    refinement
}

/// Wires the hover/press/focus deltas. Inert surfaces carry none, so the
/// pointer never changes them.
pub fn apply_state_styles<T>(mut node: T, styles: &StateStyles) -> T
where
    T: StatefulInteractiveElement,
{
    if let Some(hover) = styles.hover.as_ref().map(delta_refinement) {
        node = node.hover(move |_| hover);
    }
    if let Some(active) = styles.active.as_ref().map(delta_refinement) {
        node = node.active(move |_| active);
    }
    if let Some(focus) = styles.focus.as_ref().map(delta_refinement) {
        node = node.focus(move |_| focus);
    }
    node
}

fn scale_factor(window: &Window) -> f32 {
    window.scale_factor().max(f32::EPSILON)
}

pub fn snap_px(window: &Window, logical_px: f32) -> Pixels {
    if !logical_px.is_finite() {
        return px(0.0);
    }
    let scale = scale_factor(window);
    px((logical_px * scale).round() / scale)
}

pub fn hairline_px(window: &Window) -> Pixels {
    px(1.0 / scale_factor(window))
}

pub fn quantized_stroke_px(window: &Window, logical_px: f32) -> Pixels {
    if !logical_px.is_finite() || logical_px <= 0.0 {
        return px(0.0);
    }
    let snapped = snap_px(window, logical_px);
    if f32::from(snapped) > 0.0 {
        snapped
    } else {
        hairline_px(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_shadow_paints_nothing() {
        assert!(box_shadow(Shadow::None).is_empty());
        assert_eq!(box_shadow(Shadow::Lg).len(), 1);
    }
}
