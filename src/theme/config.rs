//! TOML theme configuration.
//!
//! ```toml
//! primary_color = "teal"
//! color_scheme = "dark"
//!
//! [palette]
//! teal = ["#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf",
//!         "#14b8a6", "#0d9488", "#0f766e", "#115e59", "#134e4a"]
//!
//! [semantic]
//! focus_ring = "teal.4"
//!
//! [button.danger]
//! background = "#b91c1c"
//! hover_background = "red.8"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::style::Variant;
use crate::tokens::{COLOR_STOPS, PaletteKey};

use super::{ColorScheme, ColorValue, PaletteScale, SemanticColors, ThemePatch, VariantPatch};

#[derive(Debug, Error)]
pub enum ThemeConfigError {
    #[error("failed to read theme config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid theme config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown palette `{0}`")]
    UnknownPalette(String),
    #[error("palette `{palette}` needs {expected} shades, got {found}")]
    InvalidScale {
        palette: String,
        expected: usize,
        found: usize,
    },
    #[error("palette `{palette}` shade {shade} is not a hex colour: `{value}`")]
    InvalidShade {
        palette: String,
        shade: usize,
        value: String,
    },
    #[error("unknown semantic colour `{0}`")]
    UnknownSemantic(String),
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),
    #[error("invalid colour `{value}` for `{field}`")]
    InvalidColor { field: String, value: String },
    #[error("unknown color scheme `{0}`")]
    UnknownScheme(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantConfig {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub border: Option<String>,
    pub hover_background: Option<String>,
    pub hover_foreground: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub primary_color: Option<String>,
    pub color_scheme: Option<String>,
    #[serde(default)]
    pub palette: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub semantic: BTreeMap<String, String>,
    #[serde(default)]
    pub button: BTreeMap<String, VariantConfig>,
    #[serde(default)]
    pub badge: BTreeMap<String, VariantConfig>,
}

impl ThemeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ThemeConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ThemeConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading theme config");
        Self::from_toml_str(&source)
    }

    /// Validates every entry; the first invalid one is reported.
    pub fn into_patch(self) -> Result<ThemePatch, ThemeConfigError> {
        let mut patch = ThemePatch {
            primary_color: self
                .primary_color
                .as_deref()
                .map(palette_key)
                .transpose()?,
            color_scheme: self
                .color_scheme
                .as_deref()
                .map(|name| {
                    ColorScheme::parse(name)
                        .ok_or_else(|| ThemeConfigError::UnknownScheme(name.to_string()))
                })
                .transpose()?,
            ..ThemePatch::default()
        };

        for (name, shades) in self.palette {
            let key = palette_key(&name)?;
            patch.palette_overrides.insert(key, palette_scale(&name, shades)?);
        }

        for (name, raw) in self.semantic {
            if !SemanticColors::NAMES.contains(&name.as_str()) {
                return Err(ThemeConfigError::UnknownSemantic(name));
            }
            let value = color(&format!("semantic.{name}"), &raw)?;
            patch.semantic.insert(name, value);
        }

        for (name, config) in self.button {
            let variant = variant(&name)?;
            patch
                .button_variants
                .insert(variant, config.into_patch(&format!("button.{name}"))?);
        }
        for (name, config) in self.badge {
            let variant = variant(&name)?;
            patch
                .badge_variants
                .insert(variant, config.into_patch(&format!("badge.{name}"))?);
        }

        Ok(patch)
    }
}

impl VariantConfig {
    fn into_patch(self, scope: &str) -> Result<VariantPatch, ThemeConfigError> {
        let field = |name: &str, raw: Option<String>| {
            raw.map(|raw| color(&format!("{scope}.{name}"), &raw))
                .transpose()
        };
        Ok(VariantPatch {
            background: field("background", self.background)?,
            foreground: field("foreground", self.foreground)?,
            border: field("border", self.border)?,
            hover_background: field("hover_background", self.hover_background)?,
            hover_foreground: field("hover_foreground", self.hover_foreground)?,
        })
    }
}

fn palette_key(name: &str) -> Result<PaletteKey, ThemeConfigError> {
    PaletteKey::from_name(name).ok_or_else(|| ThemeConfigError::UnknownPalette(name.to_string()))
}

fn variant(name: &str) -> Result<Variant, ThemeConfigError> {
    Variant::parse(name).ok_or_else(|| ThemeConfigError::UnknownVariant(name.to_string()))
}

fn color(field: &str, raw: &str) -> Result<ColorValue, ThemeConfigError> {
    ColorValue::parse(raw).ok_or_else(|| ThemeConfigError::InvalidColor {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn palette_scale(name: &str, shades: Vec<String>) -> Result<PaletteScale, ThemeConfigError> {
    let found = shades.len();
    for (shade, value) in shades.iter().enumerate() {
        if !matches!(ColorValue::parse(value), Some(ColorValue::Custom(_))) {
            return Err(ThemeConfigError::InvalidShade {
                palette: name.to_string(),
                shade,
                value: value.clone(),
            });
        }
    }
    PaletteScale::try_from(shades).map_err(|_| ThemeConfigError::InvalidScale {
        palette: name.to_string(),
        expected: COLOR_STOPS,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    const TEAL: &str = r##"
primary_color = "teal"
color_scheme = "dark"

[palette]
teal = ["#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf",
        "#14b8a6", "#0d9488", "#0f766e", "#115e59", "#134e4a"]

[semantic]
focus_ring = "teal.4"

[button.danger]
background = "#b91c1c"
hover_background = "red.8"

[badge.sm]
"##;

    #[test]
    fn rejects_unknown_variant_section() {
        let error = ThemeConfig::from_toml_str(TEAL)
            .and_then(ThemeConfig::into_patch)
            .expect_err("`sm` is not a variant");
        assert!(matches!(error, ThemeConfigError::UnknownVariant(name) if name == "sm"));
    }

    #[test]
    fn full_config_becomes_a_patch() {
        let source = TEAL.replace("[badge.sm]", "[badge.error]\nforeground = \"white\"");
        let patch = ThemeConfig::from_toml_str(&source)
            .and_then(ThemeConfig::into_patch)
            .expect("valid config");

        assert_eq!(patch.primary_color, Some(PaletteKey::Teal));
        assert_eq!(patch.color_scheme, Some(ColorScheme::Dark));
        assert!(patch.palette_overrides.contains_key(&PaletteKey::Teal));
        assert_eq!(
            patch.badge_variants[&Variant::Danger].foreground,
            Some(ColorValue::White)
        );

        let theme = Theme::default().merged(&patch);
        assert_eq!(
            theme.components.button.variants.danger.background,
            ColorValue::Custom("#b91c1c".to_string())
        );
        assert_eq!(
            theme.semantic.focus_ring,
            ColorValue::palette(PaletteKey::Teal, 4)
        );
        assert_eq!(
            theme.resolve_color(&theme.components.button.variants.primary.background),
            "#0d9488"
        );
    }

    #[test]
    fn short_palette_is_rejected() {
        let error = ThemeConfig::from_toml_str("[palette]\nblue = [\"#000000\"]")
            .and_then(ThemeConfig::into_patch)
            .expect_err("one shade is not a scale");
        assert!(matches!(
            error,
            ThemeConfigError::InvalidScale { expected: 10, found: 1, .. }
        ));
    }

    #[test]
    fn bad_colours_and_names_are_reported() {
        let cases = [
            ("primary_color = \"mauve\"", "unknown palette `mauve`"),
            ("color_scheme = \"sepia\"", "unknown color scheme `sepia`"),
            ("[semantic]\nglow = \"red.5\"", "unknown semantic colour `glow`"),
            (
                "[semantic]\nfocus_ring = \"red.15\"",
                "invalid colour `red.15` for `semantic.focus_ring`",
            ),
        ];
        for (source, message) in cases {
            let error = ThemeConfig::from_toml_str(source)
                .and_then(ThemeConfig::into_patch)
                .expect_err(source);
            assert_eq!(error.to_string(), message);
        }
    }

    #[test]
    fn unknown_top_level_keys_fail_to_parse() {
        let error = ThemeConfig::from_toml_str("accent = \"red\"").expect_err("unknown key");
        assert!(matches!(error, ThemeConfigError::Parse(_)));
    }
}
