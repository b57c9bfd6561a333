//! Version tag normalization and comparison.

use std::cmp::Ordering;

/// Strip a single leading `v` from a version tag.
pub fn normalize(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Compare two version tags component-wise.
///
/// Tags are normalized, split on `.`, and each segment parsed as an
/// unsigned integer. Missing or non-numeric segments count as 0, so
/// `"1.0"` equals `"1.0.0"` and the empty string behaves as version 0.
/// Any segment count is supported, not just major.minor.patch.
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);

    for i in 0..left.len().max(right.len()) {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }

    Ordering::Equal
}

fn segments(tag: &str) -> Vec<u64> {
    normalize(tag)
        .split('.')
        .map(|segment| segment.parse().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_tags_compare_equal() {
        for tag in ["v1.2.3", "0.0.0", "10.4", "2"] {
            assert_eq!(compare(tag, tag), Ordering::Equal);
        }
    }

    #[test]
    fn components_compare_numerically_not_lexically() {
        assert_eq!(compare("v1.2.0", "v1.10.0"), Ordering::Less);
        assert_eq!(compare("v1.10.0", "v1.2.0"), Ordering::Greater);
    }

    #[test]
    fn higher_major_beats_higher_minor_and_patch() {
        assert_eq!(compare("2.0.0", "1.9.9"), Ordering::Greater);
    }

    #[test]
    fn missing_components_default_to_zero() {
        assert_eq!(compare("1.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare("1", "1.0.1"), Ordering::Less);
    }

    #[test]
    fn leading_v_is_ignored() {
        assert_eq!(compare("v2.1.0", "2.1.0"), Ordering::Equal);
        assert_eq!(compare("v0.3.0", "0.4.0"), Ordering::Less);
    }

    #[test]
    fn empty_string_is_version_zero() {
        assert_eq!(compare("", "0.0.0"), Ordering::Equal);
        assert_eq!(compare("", "0.0.1"), Ordering::Less);
    }

    #[test]
    fn garbage_segments_coerce_to_zero() {
        assert_eq!(compare("1.x.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare("1.x.0", "1.1.0"), Ordering::Less);
    }

    #[test]
    fn extra_segments_participate_in_ordering() {
        assert_eq!(compare("1.2.3.4", "1.2.3"), Ordering::Greater);
        assert_eq!(compare("1.2.3.0", "1.2.3"), Ordering::Equal);
    }

    #[test]
    fn normalize_strips_single_leading_v() {
        assert_eq!(normalize("v1.0.0"), "1.0.0");
        assert_eq!(normalize("1.0.0"), "1.0.0");
        assert_eq!(normalize("vv1.0.0"), "v1.0.0");
    }
}
