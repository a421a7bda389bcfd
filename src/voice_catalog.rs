/*!
 * Voice catalog: human-readable keys mapped to engine voice identifiers.
 */

use crate::errors::VoiceError;

/// Default voice when none is configured
pub const DEFAULT_VOICE_ID: &str = "my-MM-ThihaNeural";

// @const: Catalog of short keys to neural voice ids
const VOICE_CATALOG: &[(&str, &str)] = &[
    ("my-thiha", "my-MM-ThihaNeural"),
    ("my-nilar", "my-MM-NilarNeural"),
    ("en-jenny", "en-US-JennyNeural"),
    ("en-guy", "en-US-GuyNeural"),
    ("en-aria", "en-US-AriaNeural"),
    ("en-ryan", "en-US-RyanNeural"),
    ("en-davis", "en-US-DavisNeural"),
    ("uk-libby", "en-GB-LibbyNeural"),
    ("uk-ryan", "en-GB-RyanNeural"),
    ("jp-nanami", "ja-JP-NanamiNeural"),
    ("jp-keita", "ja-JP-KeitaNeural"),
    ("kr-sunhi", "ko-KR-SunHiNeural"),
    ("kr-injoon", "ko-KR-InJoonNeural"),
    ("zh-xiaoxiao", "zh-CN-XiaoxiaoNeural"),
    ("zh-yunxi", "zh-CN-YunxiNeural"),
    ("hi-swara", "hi-IN-SwaraNeural"),
    ("hi-madhur", "hi-IN-MadhurNeural"),
    ("fr-denise", "fr-FR-DeniseNeural"),
    ("fr-henri", "fr-FR-HenriNeural"),
];

/// Resolve a catalog key to an engine voice id.
///
/// Lookup is case-insensitive; an unknown key fails before any synthesis
/// work begins.
pub fn resolve(key: &str) -> Result<&'static str, VoiceError> {
    let key = key.to_lowercase();
    VOICE_CATALOG
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, id)| *id)
        .ok_or_else(|| VoiceError::NotFound(key))
}

/// List all catalog keys in declaration order
pub fn keys() -> impl Iterator<Item = &'static str> {
    VOICE_CATALOG.iter().map(|(k, _)| *k)
}
