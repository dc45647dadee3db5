//! Theme configuration: breakpoints, token scales, and color mode.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::breakpoints::Breakpoints;
use crate::merge::merge_values;
use crate::scales::ScaleKind;
use crate::{StyleError, StyleObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Light or dark rendering mode.
pub enum ColorMode {
    /// Light surfaces, dark text.
    #[default]
    Light,
    /// Dark surfaces, light text.
    Dark,
}

impl ColorMode {
    /// Stable token used in DOM attributes and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other mode.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Picks `light` or `dark` for this mode.
    pub fn pick<T>(self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown color mode `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Design tokens and responsive configuration shared by every component.
pub struct Theme {
    /// Responsive breakpoints.
    pub breakpoints: Breakpoints,
    /// Mode used before the user picks one.
    pub initial_color_mode: ColorMode,
    /// Color palettes, nested by hue and shade (`gray.200`).
    pub colors: StyleObject,
    /// Spacing scale for margins, paddings, gaps, and offsets.
    pub space: StyleObject,
    /// Size scale for widths and heights.
    pub sizes: StyleObject,
    /// Border radius scale.
    pub radii: StyleObject,
    /// Box shadow scale.
    pub shadows: StyleObject,
    /// Font size scale.
    pub font_sizes: StyleObject,
    /// Font weight scale.
    pub font_weights: StyleObject,
    /// Stacking order scale.
    pub z_indices: StyleObject,
}

fn object(value: Value) -> StyleObject {
    match value {
        Value::Object(map) => map,
        _ => StyleObject::new(),
    }
}

fn default_space() -> Value {
    json!({
        "px": "1px",
        "0": "0",
        "1": "0.25rem",
        "2": "0.5rem",
        "3": "0.75rem",
        "4": "1rem",
        "5": "1.25rem",
        "6": "1.5rem",
        "8": "2rem",
        "10": "2.5rem",
        "12": "3rem",
        "16": "4rem",
        "20": "5rem",
        "24": "6rem",
        "32": "8rem"
    })
}

impl Default for Theme {
    fn default() -> Self {
        let mut sizes = default_space();
        merge_values(
            &mut sizes,
            json!({
                "full": "100%",
                "xs": "20rem",
                "sm": "24rem",
                "md": "28rem",
                "lg": "32rem",
                "xl": "36rem",
                "2xl": "42rem",
                "3xl": "48rem",
                "4xl": "56rem",
                "5xl": "64rem",
                "6xl": "72rem"
            }),
        );

        Self {
            breakpoints: Breakpoints::default(),
            initial_color_mode: ColorMode::Light,
            colors: object(json!({
                "transparent": "transparent",
                "current": "currentColor",
                "black": "#000000",
                "white": "#ffffff",
                "blackAlpha": {
                    "50": "rgba(0, 0, 0, 0.04)",
                    "100": "rgba(0, 0, 0, 0.06)",
                    "200": "rgba(0, 0, 0, 0.08)",
                    "300": "rgba(0, 0, 0, 0.16)",
                    "400": "rgba(0, 0, 0, 0.24)",
                    "600": "rgba(0, 0, 0, 0.48)"
                },
                "whiteAlpha": {
                    "100": "rgba(255, 255, 255, 0.06)",
                    "200": "rgba(255, 255, 255, 0.08)",
                    "300": "rgba(255, 255, 255, 0.16)",
                    "400": "rgba(255, 255, 255, 0.24)"
                },
                "gray": {
                    "50": "#f7fafc",
                    "100": "#edf2f7",
                    "200": "#e2e8f0",
                    "300": "#cbd5e0",
                    "400": "#a0aec0",
                    "500": "#718096",
                    "600": "#4a5568",
                    "700": "#2d3748",
                    "800": "#1a202c",
                    "900": "#171923"
                },
                "blue": {
                    "100": "#bee3f8",
                    "200": "#90cdf4",
                    "300": "#63b3ed",
                    "500": "#3182ce",
                    "700": "#2c5282"
                },
                "teal": {
                    "100": "#b2f5ea",
                    "200": "#81e6d9",
                    "500": "#319795",
                    "700": "#285e61"
                },
                "red": {
                    "100": "#fed7d7",
                    "200": "#feb2b2",
                    "500": "#e53e3e",
                    "700": "#9b2c2c"
                }
            })),
            space: object(default_space()),
            sizes: object(sizes),
            radii: object(json!({
                "none": "0",
                "sm": "0.125rem",
                "md": "0.25rem",
                "lg": "0.5rem",
                "xl": "0.75rem",
                "full": "9999px"
            })),
            shadows: object(json!({
                "sm": "0 1px 2px 0 rgba(0, 0, 0, 0.05)",
                "md": "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)",
                "lg": "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -2px rgba(0, 0, 0, 0.05)",
                "outline": "0 0 0 3px rgba(66, 153, 225, 0.6)",
                "none": "none"
            })),
            font_sizes: object(json!({
                "xs": "0.75rem",
                "sm": "0.875rem",
                "md": "1rem",
                "lg": "1.125rem",
                "xl": "1.25rem",
                "2xl": "1.5rem",
                "3xl": "1.875rem",
                "4xl": "2.25rem"
            })),
            font_weights: object(json!({
                "normal": 400,
                "medium": 500,
                "semibold": 600,
                "bold": 700
            })),
            z_indices: object(json!({
                "hide": -1,
                "base": 0,
                "docked": 10,
                "dropdown": 1000,
                "sticky": 1100,
                "banner": 1200,
                "overlay": 1300,
                "modal": 1400,
                "popover": 1500,
                "toast": 1700,
                "tooltip": 1800
            })),
        }
    }
}

impl Theme {
    /// Parses a complete theme from JSON; omitted sections take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ThemeJson`] for malformed JSON or invalid breakpoints.
    pub fn from_json_str(raw: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses a complete theme from TOML; omitted sections take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ThemeToml`] for malformed TOML or invalid breakpoints.
    pub fn from_toml_str(raw: &str) -> Result<Self, StyleError> {
        Ok(toml::from_str(raw)?)
    }

    /// Returns a copy of this theme with `overrides` deep-merged into it.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ThemeJson`] when the merged document is not a valid theme.
    pub fn extend(&self, overrides: Value) -> Result<Self, StyleError> {
        let mut merged = serde_json::to_value(self)?;
        merge_values(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }

    /// Token table backing a scale.
    pub fn scale(&self, kind: ScaleKind) -> &StyleObject {
        match kind {
            ScaleKind::Colors => &self.colors,
            ScaleKind::Space => &self.space,
            ScaleKind::Sizes => &self.sizes,
            ScaleKind::Radii => &self.radii,
            ScaleKind::Shadows => &self.shadows,
            ScaleKind::FontSizes => &self.font_sizes,
            ScaleKind::FontWeights => &self.font_weights,
            ScaleKind::ZIndices => &self.z_indices,
        }
    }

    /// Looks a dotted token path (`gray.200`) up in a scale.
    pub fn token(&self, kind: ScaleKind, path: &str) -> Option<&Value> {
        let scale = self.scale(kind);
        if let Some(direct) = scale.get(path) {
            return Some(direct);
        }
        let mut segments = path.split('.');
        let mut current = scale.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dotted_and_direct_token_paths_resolve() {
        let theme = Theme::default();
        assert_eq!(theme.token(ScaleKind::Colors, "gray.200"), Some(&json!("#e2e8f0")));
        assert_eq!(theme.token(ScaleKind::Space, "4"), Some(&json!("1rem")));
        assert_eq!(theme.token(ScaleKind::Sizes, "2xl"), Some(&json!("42rem")));
        assert_eq!(theme.token(ScaleKind::Colors, "gray.999"), None);
    }

    #[test]
    fn translucent_palettes_cover_both_color_modes() {
        let theme = Theme::default();
        assert_eq!(
            theme.token(ScaleKind::Colors, "blackAlpha.100"),
            Some(&json!("rgba(0, 0, 0, 0.06)"))
        );
        assert_eq!(
            theme.token(ScaleKind::Colors, "whiteAlpha.100"),
            Some(&json!("rgba(255, 255, 255, 0.06)"))
        );
    }

    #[test]
    fn extend_merges_palettes_without_dropping_defaults() {
        let theme = Theme::default()
            .extend(json!({ "colors": { "gray": { "200": "#dddddd" }, "brand": { "500": "#ff0080" } } }))
            .expect("extend");
        assert_eq!(theme.token(ScaleKind::Colors, "gray.200"), Some(&json!("#dddddd")));
        assert_eq!(theme.token(ScaleKind::Colors, "gray.300"), Some(&json!("#cbd5e0")));
        assert_eq!(theme.token(ScaleKind::Colors, "brand.500"), Some(&json!("#ff0080")));
    }

    #[test]
    fn toml_theme_overrides_breakpoints_and_mode() {
        let theme = Theme::from_toml_str(
            r#"
            initialColorMode = "dark"

            [breakpoints]
            sm = "40em"
            md = "52em"
            lg = "64em"
            xl = "80em"
            "#,
        )
        .expect("toml theme");
        assert_eq!(theme.initial_color_mode, ColorMode::Dark);
        assert_eq!(theme.breakpoints.values(), vec!["0em", "40em", "52em", "64em", "80em"]);
        assert_eq!(theme.radii, Theme::default().radii);
    }

    #[test]
    fn invalid_breakpoints_in_json_surface_as_theme_errors() {
        let err = Theme::from_json_str(r#"{ "breakpoints": { "sm": "30em" } }"#)
            .expect_err("missing breakpoints");
        assert!(matches!(err, StyleError::ThemeJson(_)));
        assert!(err.to_string().contains("missing required breakpoint"));
    }

    #[test]
    fn color_mode_toggles_and_parses() {
        assert_eq!(ColorMode::Light.toggle(), ColorMode::Dark);
        assert_eq!("dark".parse::<ColorMode>(), Ok(ColorMode::Dark));
        assert_eq!(ColorMode::Dark.pick("white", "gray.700"), "gray.700");
    }
}
