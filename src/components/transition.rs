use std::time::Duration;

use gpui::{Animation, AnimationElement, AnimationExt, ElementId, Styled, px};

use crate::motion::{Easing, MotionConfig, MotionTransition, TransitionPreset};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransitionStage {
    Enter,
    Exit,
}

pub trait TransitionExt: Sized + AnimationExt + Styled + 'static {
    fn with_transition(
        self,
        id: impl Into<ElementId>,
        motion: MotionConfig,
        stage: TransitionStage,
    ) -> AnimationElement<Self> {
        let (profile, duration_ms) = match stage {
            TransitionStage::Enter => (motion.enter, motion.enter_ms()),
            TransitionStage::Exit => (motion.exit, motion.exit_ms()),
        };
        let animation = Animation::new(Duration::from_millis(u64::from(duration_ms.max(1))))
            .with_easing(easing_fn(profile.easing));

        self.with_animation(id, animation, move |this, delta| {
            let progress = match stage {
                TransitionStage::Enter => delta,
                TransitionStage::Exit => 1.0 - delta,
            };
            apply_preset(this, profile, progress)
        })
    }

    fn with_enter_transition(
        self,
        id: impl Into<ElementId>,
        motion: MotionConfig,
    ) -> AnimationElement<Self> {
        self.with_transition(id, motion, TransitionStage::Enter)
    }

    fn with_exit_transition(
        self,
        id: impl Into<ElementId>,
        motion: MotionConfig,
    ) -> AnimationElement<Self> {
        self.with_transition(id, motion, TransitionStage::Exit)
    }

    fn with_repeating_transition(
        self,
        id: impl Into<ElementId>,
        duration_ms: u16,
        apply: impl Fn(Self, f32) -> Self + 'static,
    ) -> AnimationElement<Self> {
        let animation = Animation::new(Duration::from_millis(u64::from(duration_ms.max(1))))
            .repeat()
            .with_easing(gpui::linear);
        self.with_animation(id, animation, apply)
    }
}

impl<E> TransitionExt for E where E: Sized + AnimationExt + Styled + 'static {}

fn easing_fn(easing: Easing) -> impl Fn(f32) -> f32 {
    move |delta| match easing {
        Easing::Linear => gpui::linear(delta),
        Easing::EaseIn => gpui::quadratic(delta),
        Easing::EaseOut => gpui::ease_out_quint()(delta),
        Easing::EaseInOut => gpui::ease_in_out(delta),
    }
}

fn remaining_offset(offset_px: i16, progress: f32) -> f32 {
    f32::from(offset_px) * (1.0 - progress)
}

fn apply_preset<E: Styled>(element: E, profile: MotionTransition, progress: f32) -> E {
    let progress = progress.clamp(0.0, 1.0);
    let offset = remaining_offset(profile.offset_px, progress);

    match profile.preset {
        TransitionPreset::None => element,
        TransitionPreset::Fade => element.opacity(progress),
        TransitionPreset::FadeUp => element.opacity(progress).mt(px(offset)),
        TransitionPreset::FadeDown => element.opacity(progress).mt(px(-offset)),
        TransitionPreset::SlideFromLeft => element.ml(px(-offset)),
        TransitionPreset::SlideFromRight => element.mr(px(-offset)),
        TransitionPreset::SlideFromTop => element.mt(px(-offset)),
        TransitionPreset::SlideFromBottom => element.mb(px(-offset)),
    }
}

#[cfg(test)]
mod tests {
    use super::remaining_offset;

    #[test]
    fn offset_shrinks_to_zero_as_progress_completes() {
        assert_eq!(remaining_offset(8, 0.0), 8.0);
        assert_eq!(remaining_offset(8, 0.5), 4.0);
        assert_eq!(remaining_offset(8, 1.0), 0.0);
    }
}
