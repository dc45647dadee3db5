//! Ordered responsive breakpoints with a synthetic `base` entry.

use std::collections::BTreeMap;
use std::ops::Index;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::StyleError;

/// Name of the synthetic zero-width breakpoint.
pub const BASE_BREAKPOINT: &str = "base";
/// Value of the synthetic zero-width breakpoint.
pub const BASE_VALUE: &str = "0em";
/// Breakpoints every configuration has to provide.
pub const REQUIRED_BREAKPOINTS: [&str; 4] = ["sm", "md", "lg", "xl"];

#[derive(Debug, Clone, PartialEq, Eq)]
/// One named breakpoint.
pub struct Breakpoint {
    /// Breakpoint name (`base`, `sm`, ...).
    pub name: String,
    /// CSS length (`30em`).
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
/// Breakpoints sorted ascending by numeric length, `base` always first.
///
/// Offers indexed access (`breakpoints[1]`) and named access (`breakpoints.get("md")`) over the
/// same sorted data.
pub struct Breakpoints {
    entries: Vec<Breakpoint>,
}

/// Builds a [`Breakpoints`] set from named CSS lengths.
///
/// A synthetic `base: 0em` entry is merged in first; a user-provided `base` only replaces its
/// value. The remaining entries are stably sorted by the numeric portion of their length, so
/// equal lengths keep insertion order and `base` stays first even on ties. Repeated names keep
/// their first position and take the last value.
///
/// # Errors
///
/// Returns [`StyleError::MissingBreakpoint`] when one of `sm`/`md`/`lg`/`xl` is absent and
/// [`StyleError::InvalidLength`] when a value has no leading number.
pub fn create_breakpoints<I, K, V>(config: I) -> Result<Breakpoints, StyleError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut entries = vec![Breakpoint {
        name: BASE_BREAKPOINT.to_string(),
        value: BASE_VALUE.to_string(),
    }];

    for (name, value) in config {
        let name = name.into();
        let value = value.into();
        match entries.iter_mut().find(|entry| entry.name == name) {
            Some(existing) => existing.value = value,
            None => entries.push(Breakpoint { name, value }),
        }
    }

    let mut keyed = Vec::with_capacity(entries.len());
    for entry in entries {
        let numeric = parse_length(&entry.value).ok_or_else(|| StyleError::InvalidLength {
            name: entry.name.clone(),
            value: entry.value.clone(),
        })?;
        keyed.push((numeric, entry));
    }

    for required in REQUIRED_BREAKPOINTS {
        if !keyed.iter().any(|(_, entry)| entry.name == required) {
            return Err(StyleError::MissingBreakpoint(required.to_string()));
        }
    }

    // `sort_by` is stable; index 0 is `base` and is pinned.
    keyed[1..].sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let entries: Vec<_> = keyed.into_iter().map(|(_, entry)| entry).collect();
    tracing::debug!(count = entries.len(), "built breakpoint set");
    Ok(Breakpoints { entries })
}

/// Leading numeric portion of a CSS length (`"48.5em"` -> `48.5`).
pub fn parse_length(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let end = trimmed
        .char_indices()
        .find(|(index, ch)| !(ch.is_ascii_digit() || *ch == '.' || (*index == 0 && *ch == '-')))
        .map_or(trimmed.len(), |(index, _)| index);
    trimmed[..end].parse().ok()
}

impl Breakpoints {
    /// Number of breakpoints, including `base`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; `base` is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the `base` breakpoint.
    pub fn base(&self) -> &str {
        &self.entries[0].value
    }

    /// Value for a breakpoint name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }

    /// Sorted position of a breakpoint name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    /// Whether `name` is one of the configured breakpoints.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Sorted values only.
    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.value.as_str()).collect()
    }

    /// Sorted names only.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Sorted entries.
    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.entries.iter()
    }

    /// Min-width media query for a breakpoint. `base` (and anything sorted at `0`) needs none.
    pub fn media_query(&self, name: &str) -> Option<String> {
        let value = self.get(name)?;
        if name == BASE_BREAKPOINT || parse_length(value).is_some_and(|v| v <= 0.0) {
            return None;
        }
        Some(format!("@media screen and (min-width: {value})"))
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            entries: [
                (BASE_BREAKPOINT, BASE_VALUE),
                ("sm", "30em"),
                ("md", "48em"),
                ("lg", "62em"),
                ("xl", "80em"),
            ]
            .into_iter()
            .map(|(name, value)| Breakpoint {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect(),
        }
    }
}

impl Index<usize> for Breakpoints {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        self.entries[index].value.as_str()
    }
}

impl TryFrom<BTreeMap<String, String>> for Breakpoints {
    type Error = StyleError;

    fn try_from(config: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        create_breakpoints(config)
    }
}

impl Serialize for Breakpoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn standard() -> Breakpoints {
        create_breakpoints([("sm", "30em"), ("md", "48em"), ("lg", "62em"), ("xl", "80em")])
            .expect("standard breakpoints")
    }

    #[test]
    fn standard_config_sorts_with_base_first() {
        let breakpoints = standard();
        assert_eq!(
            breakpoints.values(),
            vec!["0em", "30em", "48em", "62em", "80em"]
        );
        assert_eq!(breakpoints.base(), "0em");
        assert_eq!(&breakpoints[2], "48em");
        assert_eq!(breakpoints.get("lg"), Some("62em"));
        assert_eq!(breakpoints, Breakpoints::default());
    }

    #[test]
    fn unsorted_input_is_ordered_numerically_not_lexically() {
        let breakpoints = create_breakpoints([
            ("xl", "80em"),
            ("sm", "9em"),
            ("lg", "62em"),
            ("md", "48em"),
            ("xxl", "120em"),
        ])
        .expect("breakpoints");
        assert_eq!(breakpoints.names(), vec!["base", "sm", "md", "lg", "xl", "xxl"]);
    }

    #[test]
    fn base_wins_ties_and_equal_values_keep_insertion_order() {
        let breakpoints = create_breakpoints([
            ("zero", "0em"),
            ("sm", "30em"),
            ("alt", "30em"),
            ("md", "48em"),
            ("lg", "62em"),
            ("xl", "80em"),
        ])
        .expect("breakpoints");
        assert_eq!(
            breakpoints.names(),
            vec!["base", "zero", "sm", "alt", "md", "lg", "xl"]
        );
    }

    #[test]
    fn user_base_replaces_value_but_stays_first() {
        let breakpoints = create_breakpoints([
            ("base", "5em"),
            ("sm", "1em"),
            ("md", "48em"),
            ("lg", "62em"),
            ("xl", "80em"),
        ])
        .expect("breakpoints");
        assert_eq!(breakpoints.names()[0], "base");
        assert_eq!(breakpoints.base(), "5em");
    }

    #[test]
    fn missing_required_breakpoint_is_rejected() {
        let err = create_breakpoints([("sm", "30em"), ("md", "48em"), ("lg", "62em")])
            .expect_err("xl missing");
        assert!(matches!(err, StyleError::MissingBreakpoint(name) if name == "xl"));
    }

    #[test]
    fn non_numeric_length_is_rejected() {
        let err = create_breakpoints([
            ("sm", "small"),
            ("md", "48em"),
            ("lg", "62em"),
            ("xl", "80em"),
        ])
        .expect_err("non numeric");
        assert!(matches!(err, StyleError::InvalidLength { name, .. } if name == "sm"));
    }

    #[test]
    fn parse_length_reads_leading_number() {
        assert_eq!(parse_length("48.5em"), Some(48.5));
        assert_eq!(parse_length("768px"), Some(768.0));
        assert_eq!(parse_length("em"), None);
    }

    #[test]
    fn media_queries_skip_base() {
        let breakpoints = standard();
        assert_eq!(breakpoints.media_query("base"), None);
        assert_eq!(
            breakpoints.media_query("md").as_deref(),
            Some("@media screen and (min-width: 48em)")
        );
        assert_eq!(breakpoints.media_query("nope"), None);
    }

    #[test]
    fn serde_round_trips_through_named_map() {
        let json = serde_json::to_value(standard()).expect("serialize");
        assert_eq!(json["md"], "48em");
        let parsed: Breakpoints = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, standard());
    }
}
