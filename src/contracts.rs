use crate::motion::MotionConfig;
use crate::style::{Shape, Size, Variant};
use crate::theme::{LocalTheme, ThemePatch};

pub(crate) trait VariantConfigurable: Sized {
    fn variant(self, value: Variant) -> Self;
    fn size(self, value: Size) -> Self;
    fn shape(self, value: Shape) -> Self;
}

pub trait Variantable: Sized {
    fn variant(self, value: Variant) -> Self;

    /// Lenient form of [`Variantable::variant`]; unknown names use the default.
    fn variant_named(self, name: &str) -> Self {
        self.variant(Variant::from_name(name))
    }
}

impl<T> Variantable for T
where
    T: VariantConfigurable,
{
    fn variant(self, value: Variant) -> Self {
        VariantConfigurable::variant(self, value)
    }
}

pub trait Sizeable: Sized {
    fn size(self, value: Size) -> Self;

    fn size_named(self, name: &str) -> Self {
        self.size(Size::from_name(name))
    }
}

impl<T> Sizeable for T
where
    T: VariantConfigurable,
{
    fn size(self, value: Size) -> Self {
        VariantConfigurable::size(self, value)
    }
}

pub trait Shapeable: Sized {
    fn shape(self, value: Shape) -> Self;

    fn shape_named(self, name: &str) -> Self {
        self.shape(Shape::from_name(name))
    }
}

impl<T> Shapeable for T
where
    T: VariantConfigurable,
{
    fn shape(self, value: Shape) -> Self {
        VariantConfigurable::shape(self, value)
    }
}

pub trait Disableable: Sized {
    fn disabled(self, value: bool) -> Self;
}

pub trait Openable: Sized {
    fn opened(self, value: bool) -> Self;
}

pub trait Placeable<P>: Sized {
    fn placement(self, value: P) -> Self;
}

#[macro_export]
macro_rules! impl_disableable {
    ($type:ty) => {
        impl $crate::contracts::Disableable for $type {
            fn disabled(self, value: bool) -> Self {
                <$type>::disabled(self, value)
            }
        }
    };
}

#[macro_export]
macro_rules! impl_openable {
    ($type:ty) => {
        impl $crate::contracts::Openable for $type {
            fn opened(self, value: bool) -> Self {
                <$type>::opened(self, value)
            }
        }
    };
}

#[macro_export]
macro_rules! impl_placeable {
    ($type:ty, $placement:ty) => {
        impl $crate::contracts::Placeable<$placement> for $type {
            fn placement(self, value: $placement) -> Self {
                <$type>::placement(self, value)
            }
        }
    };
}

#[macro_export]
macro_rules! impl_variant_size_shape_via_methods {
    ($type:ty) => {
        impl $crate::contracts::VariantConfigurable for $type {
            fn variant(self, value: $crate::style::Variant) -> Self {
                <$type>::variant(self, value)
            }

            fn size(self, value: $crate::style::Size) -> Self {
                <$type>::size(self, value)
            }

            fn shape(self, value: $crate::style::Shape) -> Self {
                <$type>::shape(self, value)
            }
        }
    };
}

pub trait MotionAware: Sized {
    fn motion(self, value: MotionConfig) -> Self;
}

/// Per-instance theme overrides layered over the provider theme.
pub trait ThemeOverridable: Sized {
    fn local_theme_mut(&mut self) -> &mut LocalTheme;

    fn with_theme_patch(mut self, patch: ThemePatch) -> Self {
        self.local_theme_mut().set_patch(Some(patch));
        self
    }

    fn theme(mut self, configure: impl FnOnce(ThemePatch) -> ThemePatch) -> Self {
        self.local_theme_mut().update_patch(configure);
        self
    }

    fn clear_theme_patch(mut self) -> Self {
        self.local_theme_mut().set_patch(None);
        self
    }
}

#[macro_export]
macro_rules! impl_theme_overridable {
    ($type:ty) => {
        impl $crate::contracts::ThemeOverridable for $type {
            fn local_theme_mut(&mut self) -> &mut $crate::theme::LocalTheme {
                &mut self.theme
            }
        }
    };
}
