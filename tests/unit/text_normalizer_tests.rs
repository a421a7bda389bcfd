/*!
 * Tests for text normalization
 */

use yasnai::text_normalizer::{is_sentence_delimiter, normalize};

/// Test markup tag removal
#[test]
fn test_normalize_withMarkupTags_shouldStripThem() {
    assert_eq!(normalize("<i>Hello</i> world"), "Hello world");
    assert_eq!(normalize("{\\an8}Top line"), "Top line");
    assert_eq!(normalize("<font color=\"red\">Red</font>"), "Red");
}

/// Test annotation removal
#[test]
fn test_normalize_withAnnotations_shouldStripThem() {
    assert_eq!(normalize("[music] Hello"), "Hello");
    assert_eq!(normalize("Hello (laughs) there"), "Hello there");
}

/// Test whitespace collapsing across multi-line cues
#[test]
fn test_normalize_withMultilineText_shouldCollapseWhitespace() {
    assert_eq!(normalize("First line\nSecond   line"), "First line Second line");
    assert_eq!(normalize("  padded  "), "padded");
}

/// Test sentence boundary hints after terminal punctuation
#[test]
fn test_normalize_withJoinedSentences_shouldInsertBoundary() {
    assert_eq!(normalize("End.Start"), "End. Start");
    assert_eq!(normalize("One!Two?Three"), "One! Two? Three");
    assert_eq!(normalize("ပြီးပြီ။နောက်တစ်ခု"), "ပြီးပြီ။ နောက်တစ်ခု");
}

/// Test that annotation-only cues normalize to empty
#[test]
fn test_normalize_withOnlyAnnotations_shouldBeEmpty() {
    assert_eq!(normalize("[music]"), "");
    assert_eq!(normalize("<i>(sighs)</i>"), "");
    assert_eq!(normalize(""), "");
}

/// Test the delimiter predicate covers script-specific stops
#[test]
fn test_is_sentence_delimiter_withVariousMarks_shouldMatchTerminalsOnly() {
    assert!(is_sentence_delimiter('.'));
    assert!(is_sentence_delimiter('။'));
    assert!(is_sentence_delimiter('。'));
    assert!(!is_sentence_delimiter(','));
    assert!(!is_sentence_delimiter('a'));
}
