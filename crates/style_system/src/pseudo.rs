//! `_`-prefixed pseudo-state props and their selector table.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::StyleObject;

/// Marker that flags a prop as a pseudo-state block.
pub const PSEUDO_PREFIX: char = '_';

const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Pseudo-state name (without the prefix) to selector. `&` stands for the styled element.
const PSEUDO_SELECTORS: &[(&str, &str)] = &[
    ("hover", "&:hover, &[data-hover]"),
    ("active", "&:active, &[data-active]"),
    ("focus", "&:focus, &[data-focus]"),
    ("focusWithin", "&:focus-within"),
    ("focusVisible", "&:focus-visible"),
    (
        "disabled",
        "&[disabled], &[aria-disabled=true], &[data-disabled]",
    ),
    (
        "readOnly",
        "&[aria-readonly=true], &[readonly], &[data-readonly]",
    ),
    ("invalid", "&[aria-invalid=true], &[data-invalid]"),
    ("checked", "&[aria-checked=true], &[data-checked]"),
    (
        "indeterminate",
        "&:indeterminate, &[aria-checked=mixed], &[data-indeterminate]",
    ),
    ("expanded", "&[aria-expanded=true], &[data-expanded]"),
    ("selected", "&[aria-selected=true], &[data-selected]"),
    ("pressed", "&[aria-pressed=true], &[data-pressed]"),
    ("grabbed", "&[aria-grabbed=true], &[data-grabbed]"),
    ("loading", "&[data-loading], &[aria-busy=true]"),
    ("hidden", "&[hidden], &[data-hidden]"),
    ("activeLink", "&[aria-current=page]"),
    ("visited", "&:visited"),
    ("empty", "&:empty"),
    ("first", "&:first-of-type"),
    ("last", "&:last-of-type"),
    ("notFirst", "&:not(:first-of-type)"),
    ("notLast", "&:not(:last-of-type)"),
    ("even", "&:nth-of-type(even)"),
    ("odd", "&:nth-of-type(odd)"),
    ("before", "&::before"),
    ("after", "&::after"),
    ("placeholder", "&::placeholder"),
    ("selection", "&::selection"),
    ("groupHover", "[role=group]:hover &, [data-group]:hover &"),
    ("dark", "[data-ui-color-mode=dark] &"),
    ("light", "[data-ui-color-mode=light] &"),
];

/// Bounded memo for resolved keys. Clears half of its entries when full.
#[derive(Debug)]
struct SelectorCache {
    entries: HashMap<String, String>,
    max_size: usize,
}

impl SelectorCache {
    fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(max_size),
            max_size: max_size.max(1),
        }
    }

    fn get(&self, prop: &str) -> Option<&String> {
        self.entries.get(prop)
    }

    fn insert(&mut self, prop: String, resolved: String) {
        if self.entries.len() >= self.max_size {
            self.evict_half();
        }
        self.entries.insert(prop, resolved);
    }

    fn evict_half(&mut self) {
        let target = (self.entries.len() / 2).max(1);
        let keys: Vec<_> = self.entries.keys().take(target).cloned().collect();
        for key in keys {
            self.entries.remove(&key);
        }
        tracing::trace!(evicted = target, "pseudo selector cache evicted entries");
    }
}

#[derive(Debug)]
/// Rewrites `_`-prefixed keys of a style object into selector blocks.
///
/// Prefixed keys with no table entry are kept unchanged so the caller's style is not lost.
pub struct PseudoResolver {
    selectors: HashMap<String, String>,
    cache: RefCell<SelectorCache>,
}

impl Default for PseudoResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PseudoResolver {
    /// Resolver over the built-in selector table.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Resolver over the built-in table with a specific memo capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let selectors = PSEUDO_SELECTORS
            .iter()
            .map(|(name, selector)| ((*name).to_string(), (*selector).to_string()))
            .collect();
        Self {
            selectors,
            cache: RefCell::new(SelectorCache::with_capacity(capacity)),
        }
    }

    /// Returns the resolver with an extra (or replaced) pseudo-state selector.
    #[must_use]
    pub fn with_selector(mut self, name: impl Into<String>, selector: impl Into<String>) -> Self {
        self.selectors.insert(name.into(), selector.into());
        self.cache.borrow_mut().entries.clear();
        self
    }

    /// Selector registered for a pseudo-state name (without the prefix).
    pub fn selector(&self, name: &str) -> Option<&str> {
        self.selectors.get(name).map(String::as_str)
    }

    /// Resolves a single prop name; non-prefixed and unknown names come back unchanged.
    pub fn resolve_key(&self, prop: &str) -> String {
        if let Some(hit) = self.cache.borrow().get(prop) {
            return hit.clone();
        }

        let resolved = match prop.strip_prefix(PSEUDO_PREFIX) {
            Some(name) => match self.selectors.get(name) {
                Some(selector) => selector.clone(),
                None => {
                    tracing::debug!(prop, "unknown pseudo-state prop kept unchanged");
                    prop.to_string()
                }
            },
            None => prop.to_string(),
        };

        self.cache
            .borrow_mut()
            .insert(prop.to_string(), resolved.clone());
        resolved
    }

    /// Rewrites every prefixed key at every nesting depth. Arrays and primitives are copied.
    pub fn resolve(&self, props: &StyleObject) -> StyleObject {
        let mut next = StyleObject::new();
        for (prop, value) in props {
            let key = self.resolve_key(prop);
            let value = match value {
                Value::Object(nested) => Value::Object(self.resolve(nested)),
                other => other.clone(),
            };
            next.insert(key, value);
        }
        next
    }

    #[cfg(test)]
    fn cached_len(&self) -> usize {
        self.cache.borrow().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> StyleObject {
        value.as_object().cloned().expect("object fixture")
    }

    #[test]
    fn prefixed_props_resolve_at_every_depth() {
        let resolver = PseudoResolver::new();
        let resolved = resolver.resolve(&object(json!({
            "color": "red",
            "_hover": {
                "color": "blue",
                "_disabled": { "opacity": 0.4 }
            }
        })));

        assert_eq!(
            Value::Object(resolved),
            json!({
                "color": "red",
                "&:hover, &[data-hover]": {
                    "color": "blue",
                    "&[disabled], &[aria-disabled=true], &[data-disabled]": { "opacity": 0.4 }
                }
            })
        );
    }

    #[test]
    fn arrays_and_plain_props_are_untouched() {
        let resolver = PseudoResolver::new();
        let input = object(json!({ "width": ["100%", "50%"], "_focus": "ignored-leaf" }));
        let resolved = resolver.resolve(&input);
        assert_eq!(resolved["width"], json!(["100%", "50%"]));
        assert_eq!(resolved["&:focus, &[data-focus]"], json!("ignored-leaf"));
    }

    #[test]
    fn unknown_prefixed_key_passes_through() {
        let resolver = PseudoResolver::new();
        assert_eq!(resolver.resolve_key("_wobble"), "_wobble");
        assert_eq!(resolver.resolve_key("padding"), "padding");
    }

    #[test]
    fn memo_stays_within_capacity() {
        let resolver = PseudoResolver::with_capacity(4);
        for index in 0..10 {
            let _ = resolver.resolve_key(&format!("prop{index}"));
        }
        assert!(resolver.cached_len() <= 4);
        assert_eq!(resolver.resolve_key("_hover"), "&:hover, &[data-hover]");
    }

    #[test]
    fn custom_selector_replaces_memoized_result() {
        let resolver = PseudoResolver::new();
        assert_eq!(resolver.resolve_key("_wobble"), "_wobble");
        let resolver = resolver.with_selector("wobble", "&[data-wobble]");
        assert_eq!(resolver.resolve_key("_wobble"), "&[data-wobble]");
    }
}
