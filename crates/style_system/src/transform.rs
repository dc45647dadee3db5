//! Shorthand expansion over style-props objects.

use serde_json::Value;

use crate::tokens::TokenConfig;
use crate::StyleObject;

#[derive(Debug, Clone, Default)]
/// Expands shorthand props through an immutable [`TokenConfig`].
pub struct PropTransformer {
    config: TokenConfig,
}

impl PropTransformer {
    /// Creates a transformer that owns its registry for its whole lifetime.
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Registry used for expansion.
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Expands every shorthand in `props`.
    ///
    /// Object values (breakpoint maps, selector blocks) keep their key and are expanded
    /// recursively. Any other value is assigned to each target property of its key. Later
    /// assignments overwrite earlier ones.
    pub fn transform(&self, props: &StyleObject) -> StyleObject {
        let mut result = StyleObject::new();
        for (prop, value) in props {
            match value {
                Value::Object(nested) => {
                    result.insert(prop.clone(), Value::Object(self.transform(nested)));
                }
                leaf => {
                    for target in self.config.expand(prop) {
                        result.insert(target.to_string(), leaf.clone());
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::tokens::PropConfig;

    fn object(value: Value) -> StyleObject {
        value.as_object().cloned().expect("object fixture")
    }

    #[test]
    fn multi_target_shorthands_assign_every_property() {
        let config = TokenConfig::standard();
        let transformer = PropTransformer::new(config.clone());
        for shorthand in ["gap", "mx", "my", "px", "py", "inset", "boxSize", "roundedTop"] {
            let Some(PropConfig::Properties(targets)) = config.get(shorthand) else {
                panic!("{shorthand} should be multi-target");
            };
            let out = transformer.transform(&object(json!({ shorthand: "4px" })));
            assert_eq!(out.len(), targets.len(), "{shorthand}");
            for target in targets {
                assert_eq!(out[target.as_str()], json!("4px"), "{shorthand} -> {target}");
            }
        }
    }

    #[test]
    fn unregistered_props_are_unchanged() {
        let transformer = PropTransformer::new(TokenConfig::standard());
        let input = object(json!({ "gridTemplateColumns": "repeat(3, 1fr)", "content": "''" }));
        assert_eq!(transformer.transform(&input), input);
    }

    #[test]
    fn nested_objects_keep_their_key_and_expand_inside() {
        let transformer = PropTransformer::new(TokenConfig::standard());
        let out = transformer.transform(&object(json!({
            "bg": "white",
            "&:hover": { "bg": "gray.100", "px": 2 },
            "w": { "base": "100%", "md": "50%" }
        })));

        assert_eq!(
            Value::Object(out),
            json!({
                "background": "white",
                "&:hover": {
                    "background": "gray.100",
                    "paddingLeft": 2,
                    "paddingRight": 2
                },
                "w": { "base": "100%", "md": "50%" }
            })
        );
    }

    #[test]
    fn later_keys_win_on_collision() {
        let transformer = PropTransformer::new(TokenConfig::standard());
        let out = transformer.transform(&object(json!({ "px": 4, "paddingLeft": 1 })));
        assert_eq!(out["paddingLeft"], json!(1));
        assert_eq!(out["paddingRight"], json!(4));
        assert_eq!(
            out.keys().collect::<Vec<_>>(),
            vec!["paddingLeft", "paddingRight"]
        );
    }
}
