//! Exact Match Union Patterns

use crate::regex::regex_wrapper::RegexPattern;

/// Create a union pattern of exact matches.
///
/// This will always be a [`RegexPattern::Basic`] variant.
///
/// ## Arguments
/// * `alts` - A slice of string-like alternatives to union.
///
/// ## Returns
/// A new `RegexPattern::Basic` containing the union pattern.
pub fn exact_match_union_pattern<S: AsRef<str>>(alts: &[S]) -> RegexPattern {
    let parts = alts
        .iter()
        .map(|s| fancy_regex::escape(s.as_ref()))
        .collect::<Vec<_>>();
    RegexPattern::Basic(format!("({})", parts.join("|")))
}
