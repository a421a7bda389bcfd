/*!
 * Tests for the voice catalog
 */

use yasnai::errors::VoiceError;
use yasnai::voice_catalog::{keys, resolve, DEFAULT_VOICE_ID};

/// Test resolving a known key
#[test]
fn test_resolve_withKnownKey_shouldReturnVoiceId() {
    assert_eq!(resolve("en-jenny").unwrap(), "en-US-JennyNeural");
    assert_eq!(resolve("my-thiha").unwrap(), DEFAULT_VOICE_ID);
}

/// Test case-insensitive lookup
#[test]
fn test_resolve_withMixedCaseKey_shouldStillResolve() {
    assert_eq!(resolve("EN-Jenny").unwrap(), "en-US-JennyNeural");
}

/// Test unknown keys fail before any synthesis work
#[test]
fn test_resolve_withUnknownKey_shouldFail() {
    let result = resolve("nope");
    assert!(matches!(result, Err(VoiceError::NotFound(_))));
}

/// Test the key listing covers every resolvable key
#[test]
fn test_keys_shouldAllResolve() {
    let mut count = 0;
    for key in keys() {
        assert!(resolve(key).is_ok(), "catalog key '{}' must resolve", key);
        count += 1;
    }
    assert!(count >= 10);
}
