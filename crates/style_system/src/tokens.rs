//! Shorthand style-prop registry.
//!
//! A [`TokenConfig`] is built once (usually from [`TokenConfig::standard`]) and handed to the
//! transformer by value. It is never mutated after construction; callers extend it with the
//! consuming [`TokenConfig::with_entry`] builder before the engine is created.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Expansion rule for one shorthand prop.
pub enum PropConfig {
    /// The prop name is already a CSS property and is kept as-is.
    Passthrough,
    /// The prop maps to a single CSS property.
    Property(String),
    /// The prop fans out to several CSS properties, all receiving the same value.
    Properties(Vec<String>),
}

impl PropConfig {
    fn from_targets(targets: &[&str]) -> Self {
        match targets {
            [] => Self::Passthrough,
            [single] => Self::Property((*single).to_string()),
            many => Self::Properties(many.iter().map(|target| (*target).to_string()).collect()),
        }
    }
}

/// Shorthand name to target CSS properties. An empty target list marks a passthrough prop.
const STANDARD_PROPS: &[(&str, &[&str])] = &[
    ("m", &["margin"]),
    ("mt", &["marginTop"]),
    ("mr", &["marginRight"]),
    ("mb", &["marginBottom"]),
    ("ml", &["marginLeft"]),
    ("mx", &["marginLeft", "marginRight"]),
    ("my", &["marginTop", "marginBottom"]),
    ("marginX", &["marginLeft", "marginRight"]),
    ("marginY", &["marginTop", "marginBottom"]),
    ("p", &["padding"]),
    ("pt", &["paddingTop"]),
    ("pr", &["paddingRight"]),
    ("pb", &["paddingBottom"]),
    ("pl", &["paddingLeft"]),
    ("px", &["paddingLeft", "paddingRight"]),
    ("py", &["paddingTop", "paddingBottom"]),
    ("paddingX", &["paddingLeft", "paddingRight"]),
    ("paddingY", &["paddingTop", "paddingBottom"]),
    ("bg", &["background"]),
    ("bgColor", &["backgroundColor"]),
    ("bgImage", &["backgroundImage"]),
    ("bgImg", &["backgroundImage"]),
    ("bgSize", &["backgroundSize"]),
    ("bgPos", &["backgroundPosition"]),
    ("bgRepeat", &["backgroundRepeat"]),
    ("w", &["width"]),
    ("h", &["height"]),
    ("minW", &["minWidth"]),
    ("maxW", &["maxWidth"]),
    ("minH", &["minHeight"]),
    ("maxH", &["maxHeight"]),
    ("boxSize", &["width", "height"]),
    ("d", &["display"]),
    ("pos", &["position"]),
    ("flexDir", &["flexDirection"]),
    ("gap", &["rowGap", "columnGap"]),
    ("inset", &["top", "right", "bottom", "left"]),
    ("insetX", &["left", "right"]),
    ("insetY", &["top", "bottom"]),
    ("rounded", &["borderRadius"]),
    (
        "roundedTop",
        &["borderTopLeftRadius", "borderTopRightRadius"],
    ),
    (
        "roundedBottom",
        &["borderBottomLeftRadius", "borderBottomRightRadius"],
    ),
    (
        "roundedLeft",
        &["borderTopLeftRadius", "borderBottomLeftRadius"],
    ),
    (
        "roundedRight",
        &["borderTopRightRadius", "borderBottomRightRadius"],
    ),
    ("borderX", &["borderLeft", "borderRight"]),
    ("borderY", &["borderTop", "borderBottom"]),
    ("shadow", &["boxShadow"]),
    ("color", &[]),
    ("opacity", &[]),
    ("zIndex", &[]),
    ("cursor", &[]),
    ("transition", &[]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Immutable shorthand registry consumed by [`crate::PropTransformer`].
pub struct TokenConfig {
    entries: HashMap<String, PropConfig>,
}

impl TokenConfig {
    /// Registry with no shorthands; every prop passes through unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with the standard spacing, sizing, color, radius, and layout shorthands.
    pub fn standard() -> Self {
        let entries = STANDARD_PROPS
            .iter()
            .map(|(name, targets)| ((*name).to_string(), PropConfig::from_targets(targets)))
            .collect();
        Self { entries }
    }

    /// Returns the registry with `name` registered (or replaced) as `config`.
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, config: PropConfig) -> Self {
        self.entries.insert(name.into(), config);
        self
    }

    /// Looks up the expansion rule for a prop name.
    pub fn get(&self, prop: &str) -> Option<&PropConfig> {
        self.entries.get(prop)
    }

    /// Returns the CSS properties `prop` expands to; unknown props expand to themselves.
    pub fn expand<'a>(&'a self, prop: &'a str) -> Vec<&'a str> {
        match self.entries.get(prop) {
            Some(PropConfig::Property(target)) => vec![target.as_str()],
            Some(PropConfig::Properties(targets)) => targets.iter().map(String::as_str).collect(),
            Some(PropConfig::Passthrough) | None => vec![prop],
        }
    }

    /// Number of registered shorthands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
