//! Full style pipeline: pseudo rewrite, shorthand expansion, token resolution, serialization.

use crate::breakpoints::Breakpoints;
use crate::css::{inline_declarations, render_stylesheet};
use crate::pseudo::PseudoResolver;
use crate::scales::resolve_tokens;
use crate::theme::Theme;
use crate::tokens::TokenConfig;
use crate::transform::PropTransformer;
use crate::StyleObject;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Generated class name plus the CSS text that defines it.
pub struct StyledClass {
    /// Class name without the leading dot (`css-1a2b3c4d`).
    pub class_name: String,
    /// Rules scoped to `.class_name`.
    pub css: String,
}

#[derive(Debug)]
/// Explicitly constructed style pipeline shared by every component.
pub struct StyleEngine {
    theme: Theme,
    pseudo: PseudoResolver,
    transformer: PropTransformer,
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(Theme::default(), TokenConfig::standard())
    }
}

fn fnv1a(input: &str) -> u64 {
    input.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

impl StyleEngine {
    /// Creates an engine over a theme and a shorthand registry.
    pub fn new(theme: Theme, config: TokenConfig) -> Self {
        Self {
            theme,
            pseudo: PseudoResolver::new(),
            transformer: PropTransformer::new(config),
        }
    }

    /// Replaces the pseudo-selector resolver (custom selectors or cache size).
    #[must_use]
    pub fn with_pseudo_resolver(mut self, pseudo: PseudoResolver) -> Self {
        self.pseudo = pseudo;
        self
    }

    /// Active theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Theme breakpoints.
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.theme.breakpoints
    }

    /// Shorthand registry.
    pub fn config(&self) -> &TokenConfig {
        self.transformer.config()
    }

    /// Runs pseudo rewriting, shorthand expansion, and token resolution.
    pub fn resolve(&self, props: &StyleObject) -> StyleObject {
        let rewritten = self.pseudo.resolve(props);
        let expanded = self.transformer.transform(&rewritten);
        resolve_tokens(&self.theme, self.config(), self.breakpoints(), &expanded)
    }

    /// Resolves `props` into a hashed class and its stylesheet.
    ///
    /// Equal inputs always produce the same class name, so callers can deduplicate injection.
    pub fn css(&self, props: &StyleObject) -> StyledClass {
        let resolved = self.resolve(props);
        let fingerprint = serde_json::Value::Object(resolved.clone()).to_string();
        let class_name = format!("css-{:08x}", fnv1a(&fingerprint) as u32);
        let css = render_stylesheet(
            &format!(".{class_name}"),
            &resolved,
            self.breakpoints(),
            self.config(),
        );
        tracing::trace!(%class_name, "generated style class");
        StyledClass { class_name, css }
    }

    /// Flat declarations for a `style` attribute; selector blocks and responsive values are dropped.
    pub fn inline(&self, props: &StyleObject) -> String {
        inline_declarations(&self.resolve(props))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    fn object(value: Value) -> StyleObject {
        value.as_object().cloned().expect("object fixture")
    }

    #[test]
    fn pipeline_expands_pseudo_blocks_and_tokens() {
        let engine = StyleEngine::default();
        let resolved = engine.resolve(&object(json!({
            "gap": 4,
            "bg": "gray.100",
            "_hover": { "bg": "gray.200" }
        })));

        assert_eq!(
            Value::Object(resolved),
            json!({
                "rowGap": "1rem",
                "columnGap": "1rem",
                "background": "#edf2f7",
                "&:hover, &[data-hover]": { "background": "#e2e8f0" }
            })
        );
    }

    #[test]
    fn css_class_is_stable_and_scoped() {
        let engine = StyleEngine::default();
        let props = object(json!({ "d": "flex", "_focus": { "shadow": "outline" } }));
        let first = engine.css(&props);
        let second = engine.css(&props);
        assert_eq!(first, second);
        assert!(first.class_name.starts_with("css-"));
        assert_eq!(
            first.css,
            format!(
                ".{0}{{display: flex;}}.{0}:focus, .{0}[data-focus]{{box-shadow: 0 0 0 3px rgba(66, 153, 225, 0.6);}}",
                first.class_name
            )
        );
    }

    #[test]
    fn responsive_shorthand_renders_media_rules() {
        let engine = StyleEngine::default();
        let styled = engine.css(&object(json!({ "w": { "base": "full", "lg": "50%" } })));
        assert!(styled.css.contains("{width: 100%;}"));
        assert!(styled
            .css
            .contains("@media screen and (min-width: 62em){"));
        assert!(styled.css.ends_with("{width: 50%;}}"));
    }

    #[test]
    fn inline_drops_nested_blocks() {
        let engine = StyleEngine::default();
        let inline = engine.inline(&object(json!({ "p": 2, "_hover": { "p": 3 } })));
        assert_eq!(inline, "padding: 0.5rem;");
    }
}
