//! Style normalization for outgoing posts.
//!
//! Rules are applied in a fixed order; later rules operate on the output
//! of earlier ones. The boundary definitions (emoji code-point ranges,
//! sentence punctuation) are table-driven so they can be adjusted and
//! tested in isolation.

use regex_lite::Regex;
use std::sync::OnceLock;

/// Hard ceiling imposed by the publishing platform.
const MAX_POST_CHARS: usize = 280;

/// Decorative sign-off appended to every post. Starts with two line
/// breaks; its length is reserved out of the body budget.
pub const SIGNATURE: &str = "\n\n\u{0299}\u{026A}\u{0274}\u{1D0F}";

/// Emoji code-point ranges (inclusive) recognized by the single-emoji
/// rule: symbols and pictographs plus the dingbat block.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F300, 0x1F6FF),
    (0x1F700, 0x1F77F),
    (0x1F780, 0x1F7FF),
    (0x1F800, 0x1F8FF),
    (0x1F900, 0x1F9FF),
    (0x1FA00, 0x1FA6F),
    (0x1FA70, 0x1FAFF),
    (0x2700, 0x27BF),
];

/// Sentence-ending punctuation for the line-break rule.
const SENTENCE_ENDERS: &[char] = &['.', '!', '?'];

fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

fn multi_space() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("valid whitespace regex"))
}

/// Apply all style rules to a raw candidate and return a compliant post.
///
/// The result never exceeds 280 characters, carries at most one hashtag
/// and one emoji, puts each sentence on its own line, and ends with the
/// signature exactly once. Normalizing an already-normalized post is a
/// no-op.
pub fn normalize(raw: &str) -> String {
    let text = enforce_single_hashtag(raw.trim());
    let text = enforce_single_emoji(&text);
    let text = apply_line_breaks(&text);
    let text = enforce_length(&text);
    append_signature(&text)
}

/// Keep the first `#`-token, drop every later hashtag token whole.
///
/// Tokens are whitespace-delimited; kept tokens are re-joined with single
/// spaces (the line-break rule restores structure afterwards).
fn enforce_single_hashtag(text: &str) -> String {
    let mut kept = Vec::new();
    let mut hashtag_used = false;
    for word in text.split_whitespace() {
        if word.starts_with('#') {
            if hashtag_used {
                continue;
            }
            hashtag_used = true;
        }
        kept.push(word);
    }
    kept.join(" ")
}

/// Keep the first emoji code point verbatim, remove every other match,
/// then collapse any double spaces the removals left behind and trim.
///
/// Text with zero or one emoji passes through unchanged.
fn enforce_single_emoji(text: &str) -> String {
    let total = text.chars().filter(|&c| is_emoji(c)).count();
    if total <= 1 {
        return text.to_string();
    }

    let mut seen = 0usize;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_emoji(c) {
            seen += 1;
            if seen > 1 {
                continue;
            }
        }
        out.push(c);
    }
    multi_space().replace_all(&out, " ").trim().to_string()
}

/// Split sentences onto their own lines.
///
/// A boundary is sentence-ending punctuation followed by whitespace and
/// then an ASCII letter, digit, or `#`. Fragments are trimmed and empty
/// ones dropped; text without boundaries passes through unchanged.
fn apply_line_breaks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < chars.len() {
        if SENTENCE_ENDERS.contains(&chars[i]) {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            let boundary = j > i + 1
                && j < chars.len()
                && (chars[j].is_ascii_alphanumeric() || chars[j] == '#');
            if boundary {
                fragments.push(chars[start..=i].iter().collect::<String>());
                start = j;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    if start < chars.len() {
        fragments.push(chars[start..].iter().collect::<String>());
    }

    let sentences: Vec<String> = fragments
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return text.to_string();
    }
    sentences.join("\n")
}

/// Truncate to the body budget, reserving room for the signature.
fn enforce_length(text: &str) -> String {
    let max_body = MAX_POST_CHARS - SIGNATURE.chars().count();
    if text.chars().count() <= max_body {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_body - 3).collect();
    format!("{}...", cut.trim_end())
}

/// Append the sign-off exactly once.
///
/// A trailing occurrence of the trimmed signature is stripped first so
/// repeated normalization never double-signs.
fn append_signature(text: &str) -> String {
    let trimmed_sig = SIGNATURE.trim();
    let body = text.trim_end();
    let body = match body.strip_suffix(trimmed_sig) {
        Some(stripped) => stripped.trim_end(),
        None => body,
    };
    format!("{body}{SIGNATURE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(text: &str) -> &str {
        text.strip_suffix(SIGNATURE).expect("signature present")
    }

    #[test]
    fn test_single_hashtag_noop_for_zero_or_one() {
        assert_eq!(enforce_single_hashtag("no tags here"), "no tags here");
        assert_eq!(enforce_single_hashtag("one #BNB tag"), "one #BNB tag");
    }

    #[test]
    fn test_single_hashtag_keeps_first_drops_rest_whole() {
        assert_eq!(
            enforce_single_hashtag("go #BNB and #Binance higher #BSC"),
            "go #BNB and higher"
        );
    }

    #[test]
    fn test_single_emoji_noop_for_zero_or_one() {
        assert_eq!(enforce_single_emoji("plain text"), "plain text");
        assert_eq!(enforce_single_emoji("to the moon \u{1F680}"), "to the moon \u{1F680}");
    }

    #[test]
    fn test_single_emoji_keeps_first_no_double_spaces() {
        let out = enforce_single_emoji("up \u{1F680} and \u{1F525} away \u{2728}");
        assert_eq!(out, "up \u{1F680} and away");
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_single_emoji_adjacent_pair() {
        assert_eq!(enforce_single_emoji("wow \u{1F680}\u{1F525}"), "wow \u{1F680}");
    }

    #[test]
    fn test_removed_leading_emoji_leaves_no_stray_space() {
        // First emoji is kept, a later leading-of-line emoji is removed;
        // the orphaned double space collapses.
        assert_eq!(
            enforce_single_emoji("\u{1F525} hot \u{1F680} takes"),
            "\u{1F525} hot takes"
        );
    }

    #[test]
    fn test_removed_trailing_emoji_trimmed() {
        assert_eq!(enforce_single_emoji("\u{1F680} up \u{1F525}"), "\u{1F680} up");
    }

    #[test]
    fn test_line_breaks_split_sentences() {
        assert_eq!(
            apply_line_breaks("Big news! BNB hits new highs. More soon."),
            "Big news!\nBNB hits new highs.\nMore soon."
        );
    }

    #[test]
    fn test_line_breaks_boundary_before_hashtag() {
        assert_eq!(apply_line_breaks("Done. #BNB"), "Done.\n#BNB");
    }

    #[test]
    fn test_line_breaks_noop_without_boundary() {
        assert_eq!(apply_line_breaks("no boundary here"), "no boundary here");
        // Punctuation not followed by whitespace is not a boundary.
        assert_eq!(apply_line_breaks("v1.2 shipped"), "v1.2 shipped");
    }

    #[test]
    fn test_length_ceiling_truncates_with_ellipsis() {
        let long = "a".repeat(400);
        let out = enforce_length(&long);
        let max_body = MAX_POST_CHARS - SIGNATURE.chars().count();
        assert!(out.chars().count() <= max_body);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_signature_appended_once() {
        assert_eq!(append_signature("hello"), format!("hello{SIGNATURE}"));
        // Already signed: stripped then re-appended, not doubled.
        let signed = format!("hello{SIGNATURE}");
        assert_eq!(append_signature(&signed), signed);
    }

    #[test]
    fn test_normalize_big_news_candidate() {
        let out = normalize("Big news! BNB hits new highs. #BNB #Binance \u{1F680}\u{1F525}");
        let body = body_of(&out);
        assert_eq!(body.matches('#').count(), 1);
        assert!(body.contains("#BNB"));
        assert_eq!(body.chars().filter(|&c| is_emoji(c)).count(), 1);
        assert!(body.contains('\u{1F680}'));
        assert!(!body.contains('\u{1F525}'));
        assert!(body.contains('\n'));
        assert_eq!(out.matches(SIGNATURE.trim()).count(), 1);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Big news! BNB hits new highs. #BNB #Binance \u{1F680}\u{1F525}",
            "short",
            &"Long sentence here. ".repeat(40),
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_never_exceeds_280() {
        for len in [0usize, 10, 230, 280, 300, 1000] {
            let input = "word ".repeat(len / 5 + 1);
            let out = normalize(&input);
            assert!(
                out.chars().count() <= MAX_POST_CHARS,
                "len {} for input of {} chars",
                out.chars().count(),
                input.len()
            );
        }
    }

    #[test]
    fn test_normalize_compliant_input_unchanged() {
        let compliant = format!("All good here.\nOne thought per line.{SIGNATURE}");
        assert_eq!(normalize(&compliant), compliant);
    }

    #[test]
    fn test_normalize_empty_input_is_just_signature() {
        assert_eq!(normalize(""), SIGNATURE);
    }
}
