/*!
 * Text normalization for synthesis.
 *
 * Strips subtitle markup and annotations, and inserts sentence-boundary
 * hints so duration estimation and punctuation splitting see the same text
 * the synthesizer will speak.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Inline markup like <i>..</i>, <font ..>, and ASS override blocks {\an8}
static MARKUP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>|\{\\[^}]*\}").unwrap());

// @const: Bracketed annotations like [music] or (laughs)
static ANNOTATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap());

// @const: Runs of whitespace (including newlines from multi-line cues)
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Sentence-final punctuation that should be followed by a pause hint.
/// Includes script-specific delimiters (Myanmar section mark, CJK stops).
const SENTENCE_DELIMITERS: [char; 6] = ['။', '。', '．', '.', '!', '?'];

/// Normalize cue text for synthesis.
///
/// Removes markup tags and bracketed annotations, inserts a space after
/// sentence-final punctuation, collapses whitespace, and trims. Returns an
/// empty string for cues that carry no speakable text; such cues are skipped
/// entirely by the planner.
pub fn normalize(text: &str) -> String {
    let stripped = MARKUP_TAG_REGEX.replace_all(text, "");
    let stripped = ANNOTATION_REGEX.replace_all(&stripped, "");

    // Insert an explicit boundary hint after each sentence delimiter so
    // "end.Start" estimates and splits as two sentences
    let mut hinted = String::with_capacity(stripped.len() + 8);
    for ch in stripped.chars() {
        hinted.push(ch);
        if SENTENCE_DELIMITERS.contains(&ch) {
            hinted.push(' ');
        }
    }

    WHITESPACE_REGEX.replace_all(&hinted, " ").trim().to_string()
}

/// Whether the character terminates a sentence for splitting purposes
pub fn is_sentence_delimiter(ch: char) -> bool {
    SENTENCE_DELIMITERS.contains(&ch)
}
