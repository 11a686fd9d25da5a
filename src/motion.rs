use crate::tokens::Transition;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MotionLevel {
    #[default]
    Full,
    Reduced,
    None,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransitionPreset {
    None,
    Fade,
    FadeUp,
    FadeDown,
    SlideFromLeft,
    SlideFromRight,
    SlideFromTop,
    SlideFromBottom,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MotionTransition {
    pub preset: TransitionPreset,
    pub duration_ms: u16,
    pub offset_px: i16,
    pub easing: Easing,
}

impl Default for MotionTransition {
    fn default() -> Self {
        Self {
            preset: TransitionPreset::Fade,
            duration_ms: Transition::Normal.ms(),
            offset_px: 8,
            easing: Easing::EaseOut,
        }
    }
}

impl MotionTransition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(mut self, preset: TransitionPreset) -> Self {
        self.preset = preset;
        self
    }

    pub fn duration(mut self, duration: Transition) -> Self {
        self.duration_ms = duration.ms();
        self
    }

    pub fn duration_ms(mut self, duration_ms: u16) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn offset_px(mut self, offset_px: i16) -> Self {
        self.offset_px = offset_px;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Enter and exit profiles of an animated surface. Overlays stay in their
/// `Opening`/`Closing` phase for the matching duration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MotionConfig {
    pub level: MotionLevel,
    pub enter: MotionTransition,
    pub exit: MotionTransition,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            level: MotionLevel::Full,
            enter: MotionTransition::default(),
            exit: MotionTransition::new()
                .duration(Transition::Fast)
                .easing(Easing::EaseIn),
        }
    }
}

impl MotionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none() -> Self {
        Self::default().level(MotionLevel::None)
    }

    pub fn level(mut self, level: MotionLevel) -> Self {
        self.level = level;
        self
    }

    pub fn enter(mut self, enter: MotionTransition) -> Self {
        self.enter = enter;
        self
    }

    pub fn exit(mut self, exit: MotionTransition) -> Self {
        self.exit = exit;
        self
    }

    pub fn preset(mut self, preset: TransitionPreset) -> Self {
        self.enter.preset = preset;
        self.exit.preset = preset;
        self
    }

    /// Effective durations; reduced motion halves them and `None` skips them.
    pub fn enter_ms(&self) -> u16 {
        self.scaled(self.enter.duration_ms)
    }

    pub fn exit_ms(&self) -> u16 {
        self.scaled(self.exit.duration_ms)
    }

    fn scaled(&self, duration_ms: u16) -> u16 {
        match self.level {
            MotionLevel::Full => duration_ms,
            MotionLevel::Reduced => duration_ms / 2,
            MotionLevel::None => 0,
        }
    }
}
