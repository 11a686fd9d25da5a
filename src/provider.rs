use std::path::Path;
use std::sync::Arc;

use crate::theme::{Theme, ThemeConfig, ThemeConfigError};

/// App-wide theme holder. Components read it through
/// [`crate::theme::LocalTheme::sync_from_provider`]; without a provider they
/// render with [`Theme::default`].
#[derive(Default)]
pub struct HostelProvider {
    theme: Arc<Theme>,
}

impl gpui::Global for HostelProvider {}

impl HostelProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_theme(mut self, configure: impl FnOnce(Arc<Theme>) -> Theme) -> Self {
        self.theme = configure(self.theme).into();
        self
    }

    /// Applies a parsed configuration on top of the current theme.
    pub fn set_theme_config(self, config: ThemeConfig) -> Result<Self, ThemeConfigError> {
        let patch = config.into_patch()?;
        Ok(self.set_theme(|theme| theme.merged(&patch)))
    }

    pub fn load_theme_config(self, path: impl AsRef<Path>) -> Result<Self, ThemeConfigError> {
        self.set_theme_config(ThemeConfig::load(path)?)
    }

    pub fn init(self, cx: &mut gpui::App) {
        tracing::debug!(
            primary = self.theme.primary_color.as_str(),
            scheme = ?self.theme.color_scheme,
            "installing hostel theme provider"
        );
        cx.set_global(self);
    }

    pub fn theme(cx: &gpui::App) -> Arc<Theme> {
        if cx.has_global::<HostelProvider>() {
            cx.global::<HostelProvider>().theme.clone()
        } else {
            Arc::new(Theme::default())
        }
    }

    pub fn update_theme(cx: &mut gpui::App, configure: impl FnOnce(Arc<Theme>) -> Theme) {
        if !cx.has_global::<HostelProvider>() {
            cx.set_global(HostelProvider::default());
        }
        let provider = cx.global_mut::<HostelProvider>();
        provider.theme = configure(provider.theme.clone()).into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorScheme, ColorValue};
    use crate::tokens::PaletteKey;

    #[test]
    fn config_is_applied_over_the_default_theme() {
        let config = ThemeConfig::from_toml_str("primary_color = \"emerald\"").expect("parses");
        let provider = HostelProvider::new()
            .set_theme_config(config)
            .expect("valid config");
        assert_eq!(provider.theme.primary_color, PaletteKey::Emerald);
    }

    #[test]
    fn later_configs_keep_earlier_overrides() {
        let danger = ThemeConfig::from_toml_str("[button.danger]\nbackground = \"#b91c1c\"")
            .expect("parses");
        let dark = ThemeConfig::from_toml_str("color_scheme = \"dark\"").expect("parses");
        let provider = HostelProvider::new()
            .set_theme_config(danger)
            .and_then(|provider| provider.set_theme_config(dark))
            .expect("valid configs");

        assert_eq!(provider.theme.color_scheme, ColorScheme::Dark);
        assert_eq!(
            provider.theme.components.button.variants.danger.background,
            ColorValue::Custom("#b91c1c".to_string())
        );
        assert_eq!(
            provider.theme.semantic,
            Theme::default().with_color_scheme(ColorScheme::Dark).semantic
        );
    }
}
