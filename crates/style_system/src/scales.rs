//! Property-to-scale mapping and theme token resolution.

use serde_json::Value;

use crate::breakpoints::Breakpoints;
use crate::theme::Theme;
use crate::tokens::TokenConfig;
use crate::StyleObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Theme scale a CSS property draws its tokens from.
pub enum ScaleKind {
    /// `theme.colors`
    Colors,
    /// `theme.space`
    Space,
    /// `theme.sizes`
    Sizes,
    /// `theme.radii`
    Radii,
    /// `theme.shadows`
    Shadows,
    /// `theme.fontSizes`
    FontSizes,
    /// `theme.fontWeights`
    FontWeights,
    /// `theme.zIndices`
    ZIndices,
}

/// Scale used to resolve values of a (camelCase) CSS property.
pub fn scale_for_property(property: &str) -> Option<ScaleKind> {
    let kind = match property {
        "color" | "background" | "backgroundColor" | "borderColor" | "borderTopColor"
        | "borderRightColor" | "borderBottomColor" | "borderLeftColor" | "outlineColor"
        | "fill" | "stroke" | "caretColor" => ScaleKind::Colors,
        "width" | "height" | "minWidth" | "maxWidth" | "minHeight" | "maxHeight" | "flexBasis" => {
            ScaleKind::Sizes
        }
        "gap" | "rowGap" | "columnGap" | "gridGap" | "gridRowGap" | "gridColumnGap" | "top"
        | "right" | "bottom" | "left" => ScaleKind::Space,
        "boxShadow" | "textShadow" => ScaleKind::Shadows,
        "fontSize" => ScaleKind::FontSizes,
        "fontWeight" => ScaleKind::FontWeights,
        "zIndex" => ScaleKind::ZIndices,
        other if other.starts_with("margin") || other.starts_with("padding") => ScaleKind::Space,
        other if other.starts_with("border") && other.ends_with("Radius") => ScaleKind::Radii,
        _ => return None,
    };
    Some(kind)
}

fn token_key(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => Some(raw.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn resolve_leaf(theme: &Theme, scale: Option<ScaleKind>, value: &Value) -> Value {
    let Some(scale) = scale else {
        return value.clone();
    };
    let Some(key) = token_key(value) else {
        return value.clone();
    };
    if let Some(found) = theme.token(scale, &key) {
        return found.clone();
    }
    if scale == ScaleKind::Space {
        if let Some(positive) = key.strip_prefix('-') {
            if let Some(Value::String(found)) = theme.token(scale, positive) {
                return Value::String(format!("-{found}"));
            }
        }
    }
    value.clone()
}

/// Replaces theme token references with their concrete values.
///
/// The scale is chosen from the property; responsive maps and arrays under a shorthand key use
/// the scale of its first expanded property. Unknown tokens pass through.
pub fn resolve_tokens(
    theme: &Theme,
    config: &TokenConfig,
    breakpoints: &Breakpoints,
    props: &StyleObject,
) -> StyleObject {
    let mut resolved = StyleObject::new();
    for (prop, value) in props {
        let scale = config
            .expand(prop)
            .first()
            .and_then(|target| scale_for_property(target));
        let next = match value {
            Value::Object(nested)
                if !nested.is_empty() && nested.keys().all(|key| breakpoints.contains(key)) =>
            {
                Value::Object(
                    nested
                        .iter()
                        .map(|(bp, leaf)| (bp.clone(), resolve_leaf(theme, scale, leaf)))
                        .collect(),
                )
            }
            Value::Object(nested) => {
                Value::Object(resolve_tokens(theme, config, breakpoints, nested))
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|leaf| resolve_leaf(theme, scale, leaf))
                    .collect(),
            ),
            leaf => resolve_leaf(theme, scale, leaf),
        };
        resolved.insert(prop.clone(), next);
    }
    resolved
}
