//! Deep merge for style objects and theme overrides.

use serde_json::Value;

use crate::StyleObject;

/// Merges `overrides` into `base`. Objects merge key by key; any other value replaces.
pub fn merge_values(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => merge_style_objects(base, overrides),
        (slot, overrides) => *slot = overrides,
    }
}

/// Merges `overrides` into `base` in place, keeping the original key order of `base`.
pub fn merge_style_objects(base: &mut StyleObject, overrides: StyleObject) {
    for (key, value) in overrides {
        match base.get_mut(&key) {
            Some(existing) => merge_values(existing, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_objects_merge_and_leaves_replace() {
        let mut base = json!({ "Track": { "bg": "gray.200", "h": "4px" }, "size": "md" });
        merge_values(
            &mut base,
            json!({ "Track": { "h": "2px" }, "size": "sm", "Thumb": { "w": "10px" } }),
        );
        assert_eq!(
            base,
            json!({
                "Track": { "bg": "gray.200", "h": "2px" },
                "size": "sm",
                "Thumb": { "w": "10px" }
            })
        );
    }
}
