//! Floating surface geometry: flip decisions and viewport clamping.

use crate::tokens::Space;

/// Gap kept between a floating surface and the viewport edge.
pub const VIEWPORT_PADDING: f32 = Space::Sm.px();
/// Gap between a trigger and its floating surface.
pub const TRIGGER_OFFSET: f32 = 6.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn from_bounds(bounds: gpui::Bounds<gpui::Pixels>) -> Self {
        Self::new(
            f32::from(bounds.origin.x),
            f32::from(bounds.origin.y),
            f32::from(bounds.size.width),
            f32::from(bounds.size.height),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Placement {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Placement {
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A popup that prefers opening below flips above when it would not fit
/// below and there is more room above.
pub fn flip_below_to_above(trigger: Rect, viewport_height: f32, popup_height: f32) -> bool {
    let space_below = (viewport_height - trigger.bottom()).max(0.0);
    let space_above = trigger.y.max(0.0);
    space_below < popup_height && space_above > space_below
}

fn space_for(placement: Placement, trigger: Rect, viewport: (f32, f32)) -> f32 {
    match placement {
        Placement::Top => trigger.y,
        Placement::Bottom => viewport.1 - trigger.bottom(),
        Placement::Left => trigger.x,
        Placement::Right => viewport.0 - trigger.right(),
    }
}

fn needed_for(placement: Placement, size: (f32, f32)) -> f32 {
    match placement {
        Placement::Top | Placement::Bottom => size.1 + TRIGGER_OFFSET + VIEWPORT_PADDING,
        Placement::Left | Placement::Right => size.0 + TRIGGER_OFFSET + VIEWPORT_PADDING,
    }
}

/// Top-left corner of a floating surface of `size` anchored to `trigger`,
/// flipped to the opposite side when the preferred one lacks room and then
/// clamped so it stays `VIEWPORT_PADDING` inside the viewport.
pub fn position_floating(
    trigger: Rect,
    size: (f32, f32),
    viewport: (f32, f32),
    preferred: Placement,
) -> (Placement, f32, f32) {
    let placement = if space_for(preferred, trigger, viewport) < needed_for(preferred, size)
        && space_for(preferred.opposite(), trigger, viewport)
            > space_for(preferred, trigger, viewport)
    {
        preferred.opposite()
    } else {
        preferred
    };

    let (x, y) = match placement {
        Placement::Top => (
            trigger.center_x() - size.0 / 2.0,
            trigger.y - TRIGGER_OFFSET - size.1,
        ),
        Placement::Bottom => (
            trigger.center_x() - size.0 / 2.0,
            trigger.bottom() + TRIGGER_OFFSET,
        ),
        Placement::Left => (
            trigger.x - TRIGGER_OFFSET - size.0,
            trigger.center_y() - size.1 / 2.0,
        ),
        Placement::Right => (
            trigger.right() + TRIGGER_OFFSET,
            trigger.center_y() - size.1 / 2.0,
        ),
    };

    (
        placement,
        clamp_axis(x, size.0, viewport.0),
        clamp_axis(y, size.1, viewport.1),
    )
}

fn clamp_axis(start: f32, extent: f32, viewport: f32) -> f32 {
    let max = viewport - VIEWPORT_PADDING - extent;
    if max < VIEWPORT_PADDING {
        return VIEWPORT_PADDING;
    }
    start.clamp(VIEWPORT_PADDING, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_above_only_when_below_is_short_and_above_is_larger() {
        let near_bottom = Rect::new(0.0, 700.0, 200.0, 36.0);
        assert!(flip_below_to_above(near_bottom, 800.0, 340.0));

        let near_top = Rect::new(0.0, 40.0, 200.0, 36.0);
        assert!(!flip_below_to_above(near_top, 800.0, 340.0));

        let cramped = Rect::new(0.0, 150.0, 200.0, 36.0);
        assert!(!flip_below_to_above(cramped, 400.0, 340.0));
    }

    #[test]
    fn floating_surface_is_clamped_inside_viewport() {
        let trigger = Rect::new(2.0, 100.0, 20.0, 20.0);
        let (placement, x, y) = position_floating(trigger, (160.0, 40.0), (800.0, 600.0), Placement::Bottom);
        assert_eq!(placement, Placement::Bottom);
        assert_eq!(x, VIEWPORT_PADDING);
        assert_eq!(y, 126.0);

        let right_edge = Rect::new(790.0, 100.0, 10.0, 20.0);
        let (_, x, _) = position_floating(right_edge, (160.0, 40.0), (800.0, 600.0), Placement::Bottom);
        assert_eq!(x, 800.0 - VIEWPORT_PADDING - 160.0);
    }

    #[test]
    fn preferred_top_flips_below_near_the_top_edge() {
        let trigger = Rect::new(300.0, 10.0, 80.0, 24.0);
        let (placement, _, y) = position_floating(trigger, (120.0, 60.0), (800.0, 600.0), Placement::Top);
        assert_eq!(placement, Placement::Bottom);
        assert_eq!(y, trigger.bottom() + TRIGGER_OFFSET);
    }

    #[test]
    fn oversize_surface_pins_to_padding() {
        let trigger = Rect::new(50.0, 50.0, 10.0, 10.0);
        let (_, x, y) = position_floating(trigger, (900.0, 900.0), (400.0, 300.0), Placement::Right);
        assert_eq!((x, y), (VIEWPORT_PADDING, VIEWPORT_PADDING));
    }
}
