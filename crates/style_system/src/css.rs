//! CSS serialization for resolved style objects.

use serde_json::Value;

use crate::breakpoints::Breakpoints;
use crate::tokens::TokenConfig;
use crate::StyleObject;

/// Properties whose numeric values are not given a `px` unit.
const UNITLESS_PROPERTIES: &[&str] = &[
    "zIndex",
    "opacity",
    "flex",
    "flexGrow",
    "flexShrink",
    "fontWeight",
    "lineHeight",
    "order",
    "zoom",
    "gridRow",
    "gridColumn",
    "gridRowStart",
    "gridRowEnd",
    "gridColumnStart",
    "gridColumnEnd",
];

/// Converts a camelCase property (`rowGap`, `WebkitAppearance`) to its CSS name.
pub fn kebab_case(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    if property.starts_with("ms") && property[2..].starts_with(|c: char| c.is_ascii_uppercase()) {
        out.push('-');
    }
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Serializes a leaf value for `property`, or `None` when it cannot be a declaration.
pub fn format_value(property: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => Some(raw.clone()),
        Value::Number(number) => {
            let unitless = UNITLESS_PROPERTIES.contains(&property)
                || number.as_f64().is_some_and(|value| value == 0.0);
            if unitless {
                Some(number.to_string())
            } else {
                Some(format!("{number}px"))
            }
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Flat `prop: value;` declarations; nested blocks and responsive values are skipped.
pub fn inline_declarations(props: &StyleObject) -> String {
    props
        .iter()
        .filter_map(|(prop, value)| {
            format_value(prop, value).map(|value| format!("{}: {value};", kebab_case(prop)))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a selector list on commas outside parentheses and brackets.
fn selector_branches(selectors: &str) -> Vec<&str> {
    let mut branches = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in selectors.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                branches.push(selectors[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    branches.push(selectors[start..].trim());
    branches
}

/// Substitutes `parent` for `&` in every top-level selector branch; keys without `&` nest as
/// descendants.
pub fn nest_selector(parent: &str, key: &str) -> String {
    let mut branches = Vec::new();
    for parent_branch in selector_branches(parent) {
        for key_branch in selector_branches(key) {
            if key_branch.contains('&') {
                branches.push(key_branch.replace('&', parent_branch));
            } else {
                branches.push(format!("{parent_branch} {key_branch}"));
            }
        }
    }
    branches.join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CssRule {
    /// Enclosing at-rules, outermost first.
    at_rules: Vec<String>,
    rank: usize,
    selector: String,
    declarations: Vec<String>,
}

struct StylesheetWriter<'a> {
    breakpoints: &'a Breakpoints,
    config: &'a TokenConfig,
    rules: Vec<CssRule>,
}

impl StylesheetWriter<'_> {
    fn declare(
        &mut self,
        at_rules: &[String],
        rank: usize,
        selector: &str,
        property: &str,
        value: &str,
    ) {
        let declaration = format!("{}: {value};", kebab_case(property));
        if let Some(rule) = self
            .rules
            .iter_mut()
            .find(|rule| rule.at_rules == at_rules && rule.selector == selector)
        {
            rule.declarations.push(declaration);
            return;
        }
        self.rules.push(CssRule {
            at_rules: at_rules.to_vec(),
            rank,
            selector: selector.to_string(),
            declarations: vec![declaration],
        });
    }

    fn declare_responsive(
        &mut self,
        selector: &str,
        at_rules: &[String],
        prop: &str,
        breakpoint: &str,
        value: &Value,
    ) {
        let rank = self.breakpoints.position(breakpoint).unwrap_or(0);
        let mut chain = at_rules.to_vec();
        if let Some(query) = self.breakpoints.media_query(breakpoint) {
            chain.push(query);
        }
        let config = self.config;
        for target in config.expand(prop) {
            if let Some(formatted) = format_value(target, value) {
                self.declare(&chain, rank, selector, target, &formatted);
            }
        }
    }

    fn walk(&mut self, selector: &str, at_rules: &[String], props: &StyleObject) {
        for (key, value) in props {
            match value {
                Value::Object(nested) if key.starts_with('@') => {
                    let mut chain = at_rules.to_vec();
                    chain.push(key.clone());
                    self.walk(selector, &chain, nested);
                }
                Value::Object(nested)
                    if !nested.is_empty()
                        && nested.keys().all(|name| self.breakpoints.contains(name)) =>
                {
                    for (breakpoint, leaf) in nested {
                        self.declare_responsive(selector, at_rules, key, breakpoint, leaf);
                    }
                }
                Value::Object(nested) => {
                    let nested_selector = nest_selector(selector, key);
                    self.walk(&nested_selector, at_rules, nested);
                }
                Value::Array(items) => {
                    let names: Vec<String> = self
                        .breakpoints
                        .names()
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    for (breakpoint, leaf) in names.iter().zip(items) {
                        self.declare_responsive(selector, at_rules, key, breakpoint, leaf);
                    }
                }
                leaf => {
                    if let Some(formatted) = format_value(key, leaf) {
                        self.declare(at_rules, 0, selector, key, &formatted);
                    }
                }
            }
        }
    }

    fn finish(mut self) -> String {
        self.rules.sort_by_key(|rule| rule.rank);
        self.rules
            .into_iter()
            .map(|rule| {
                let body = format!("{}{{{}}}", rule.selector, rule.declarations.join(""));
                rule.at_rules
                    .iter()
                    .rev()
                    .fold(body, |inner, at_rule| format!("{at_rule}{{{inner}}}"))
            })
            .collect()
    }
}

/// Renders a resolved style object as CSS rules scoped to `selector`.
///
/// Selector blocks (`&:hover`) nest under the scope, `@`-keys wrap their block, breakpoint maps
/// and arrays become mobile-first `min-width` media rules ordered by breakpoint.
pub fn render_stylesheet(
    selector: &str,
    props: &StyleObject,
    breakpoints: &Breakpoints,
    config: &TokenConfig,
) -> String {
    let mut writer = StylesheetWriter {
        breakpoints,
        config,
        rules: Vec::new(),
    };
    writer.walk(selector, &[], props);
    writer.finish()
}
