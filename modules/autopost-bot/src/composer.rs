//! Post-composition budgeting: fit trending tags and the destination link
//! into a fixed character budget.

/// Character budget for a composed post.
pub const MAX_POST_LENGTH: usize = 250;

/// Tag insertion only happens when at least this much space remains after
/// reserving room for the base text and the link.
const MIN_TAG_SPACE: i64 = 10;

/// Compose the final post text.
///
/// Tags are considered first-fit in input order; a tag that does not fit
/// is skipped and never retried. The destination link is appended last,
/// unconditionally — the budget governs tag inclusion only, and the base
/// text is never truncated. Deterministic for fixed inputs.
pub fn compose(
    base_text: &str,
    candidate_tags: &[String],
    target_url: &str,
    max_length: usize,
) -> String {
    let mut text = base_text.to_string();

    if !candidate_tags.is_empty() {
        // Reserve room for the link plus two separator characters.
        let mut available =
            max_length as i64 - char_len(&text) - char_len(target_url) - 2;

        if available > MIN_TAG_SPACE {
            for tag in candidate_tags {
                let tag_len = char_len(tag);
                if tag_len <= available {
                    text.push(' ');
                    text.push_str(tag);
                    available -= tag_len + 1;
                }
            }
        }
    }

    text.push(' ');
    text.push_str(target_url);
    text
}

fn char_len(s: &str) -> i64 {
    s.chars().count() as i64
}
