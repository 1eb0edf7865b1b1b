//! Output contracts applied to raw provider text.

pub const SUMMARY_PREFIX: &str = "This article states that";

/// Trim the summary and make sure it opens with [`SUMMARY_PREFIX`].
///
/// The check is a case-insensitive prefix match, so applying this to its own
/// output never doubles the prefix.
pub fn normalize_summary(raw: &str) -> String {
    let summary = raw.trim();
    let has_prefix = summary
        .get(..SUMMARY_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(SUMMARY_PREFIX));

    if has_prefix {
        summary.to_string()
    } else {
        format!("{} {}", SUMMARY_PREFIX, summary)
    }
}

pub fn normalize_image_analysis(raw: &str) -> String {
    raw.to_string()
}
