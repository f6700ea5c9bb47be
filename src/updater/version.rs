//! Version comparison for release tags
//!
//! Tags look like "v2.3.1": a single marker character followed by
//! dot-separated integers. Components that don't parse count as 0.

/// Returns true if `candidate` is strictly newer than `current`.
///
/// The first character of each string is dropped before comparing. Shorter
/// versions are padded with zeros, so "v1.2" equals "v1.2.0".
pub fn is_newer(candidate: &str, current: &str) -> bool {
    let new_parts = components(candidate);
    let old_parts = components(current);

    let len = new_parts.len().max(old_parts.len());
    for i in 0..len {
        let new_value = new_parts.get(i).map(|p| parse_component(p)).unwrap_or(0);
        let old_value = old_parts.get(i).map(|p| parse_component(p)).unwrap_or(0);

        if new_value > old_value {
            return true;
        }
        if new_value < old_value {
            return false;
        }
    }

    false
}

/// Split a tag into its dotted components, skipping the marker character
fn components(version: &str) -> Vec<&str> {
    let mut chars = version.chars();
    chars.next();
    chars.as_str().split('.').collect()
}

/// "x", "0-beta" and overflowing values all become 0
fn parse_component(part: &str) -> i32 {
    part.trim().parse().unwrap_or(0)
}
