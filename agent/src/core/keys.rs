//! Typed lookups into a parsed JSON configuration tree.
//!
//! Keys are `:`-separated section paths (`"loop:interval_ms"`). Object keys
//! match ASCII case-insensitively, with an exact match preferred; numeric
//! segments index into arrays (`"hosts:0"`). A missing segment, a scalar along
//! the way, or a leaf of the wrong JSON type all yield `None`; nothing is
//! coerced.

use serde_json::Value;

pub const KEY_SEPARATOR: char = ':';

/// Walk `root` along `key` and return the leaf value, if every segment exists.
pub fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    key.split(KEY_SEPARATOR).try_fold(root, child)
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment).or_else(|| {
            map.iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(segment))
                .map(|(_, value)| value)
        }),
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    }
}

pub fn lookup_bool(root: &Value, key: &str) -> Option<bool> {
    lookup(root, key)?.as_bool()
}

/// Integers only: floats and numeric strings are rejected.
pub fn lookup_integer(root: &Value, key: &str) -> Option<i64> {
    lookup(root, key)?.as_i64()
}

pub fn lookup_string<'a>(root: &'a Value, key: &str) -> Option<&'a str> {
    lookup(root, key)?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "enabled": true,
            "max_log_size": 2048,
            "name": "agent",
            "ratio": 0.5,
            "loop": { "interval_ms": 250, "label": "tick" }
        })
    }

    #[test]
    fn top_level_keys_resolve_by_type() {
        let root = sample();
        assert_eq!(lookup_bool(&root, "enabled"), Some(true));
        assert_eq!(lookup_integer(&root, "max_log_size"), Some(2048));
        assert_eq!(lookup_string(&root, "name"), Some("agent"));
    }

    #[test]
    fn nested_keys_walk_sections() {
        let root = sample();
        assert_eq!(lookup_integer(&root, "loop:interval_ms"), Some(250));
        assert_eq!(lookup_string(&root, "loop:label"), Some("tick"));
        assert_eq!(lookup_integer(&root, "loop:missing"), None);
    }

    #[test]
    fn keys_match_case_insensitively_preferring_exact() {
        let root = json!({
            "MaxLogSize": 5,
            "Loop": { "IntervalMs": 20 },
            "mode": "exact",
            "MODE": "shouted"
        });
        assert_eq!(lookup_integer(&root, "maxlogsize"), Some(5));
        assert_eq!(lookup_integer(&root, "loop:intervalms"), Some(20));
        assert_eq!(lookup_string(&root, "mode"), Some("exact"));
        assert_eq!(lookup_string(&root, "MODE"), Some("shouted"));
    }

    #[test]
    fn numeric_segments_index_arrays() {
        let root = json!({ "hosts": ["alpha", { "name": "beta" }] });
        assert_eq!(lookup_string(&root, "hosts:0"), Some("alpha"));
        assert_eq!(lookup_string(&root, "hosts:1:name"), Some("beta"));
        assert_eq!(lookup(&root, "hosts:2"), None);
        assert_eq!(lookup(&root, "hosts:first"), None);
    }

    #[test]
    fn wrong_type_is_absent() {
        let root = sample();
        assert_eq!(lookup_integer(&root, "name"), None);
        assert_eq!(lookup_integer(&root, "ratio"), None);
        assert_eq!(lookup_bool(&root, "max_log_size"), None);
        assert_eq!(lookup_string(&root, "loop"), None);
    }

    #[test]
    fn walking_through_a_leaf_is_absent() {
        let root = sample();
        assert_eq!(lookup(&root, "name:inner"), None);
        assert_eq!(lookup(&root, ""), None);
    }
}
