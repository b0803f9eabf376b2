//! Source text normalization applied before slide parsing.
//!
//! The slide separator and heading patterns are matched literally, so line
//! endings and Unicode composition have to be consistent first.

use unicode_normalization::UnicodeNormalization;

/// Normalize markdown source for parsing.
///
/// - Converts `\r\n` and lone `\r` line endings to `\n`
/// - Applies Unicode NFC composition
/// - Strips a leading byte order mark
pub fn normalize_source(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    unified.nfc().collect()
}
