//! Decode subtitle text in a wide variety of character encodings.

use std::collections::BTreeMap;

use encoding::all::UTF_8;
use encoding::label::encoding_from_whatwg_label;
use encoding::types::{DecoderTrap, EncodingRef};
use encoding::Encoding;
use log::debug;

/// Turns raw subtitle bytes into text.
///
/// Valid UTF-8 is taken as is. Anything else goes through statistical
/// detection; detector labels found in the override table are replaced
/// before the encoding is looked up.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    overrides: BTreeMap<String, String>,
}

impl Decoder {
    /// Create a decoder with a table of detector label corrections
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Decoder { overrides }
    }

    /// Decode `bytes`, never failing.
    pub fn decode(&self, bytes: &[u8]) -> String {
        if let Ok(text) = std::str::from_utf8(bytes) {
            return text.to_owned();
        }

        let (name, confidence, _lang) = chardet::detect(bytes);
        debug!(
            "detected encoding name {:?} with confidence {}",
            name, confidence
        );

        let Some(encoding) = self.lookup(&name) else {
            debug!("unknown encoding {:?}, discarding invalid bytes", name);
            return decode_lossy(bytes);
        };

        match encoding.decode(bytes, DecoderTrap::Strict) {
            Ok(text) => text,
            Err(msg) => {
                debug!("decoding as {} failed ({}), discarding invalid bytes", encoding.name(), msg);
                decode_lossy(bytes)
            }
        }
    }

    /// Resolve a detector label to an encoding, applying overrides first.
    pub fn lookup(&self, detected: &str) -> Option<EncodingRef> {
        if detected.is_empty() {
            return None;
        }

        let label = self
            .overrides
            .iter()
            .find(|(wrong, _)| wrong.eq_ignore_ascii_case(detected))
            .map(|(_, fixed)| fixed.clone())
            .unwrap_or_else(|| detected.to_string());

        encoding_from_whatwg_label(&label)
            .or_else(|| encoding_from_whatwg_label(chardet::charset2encoding(&label)))
    }
}

/// UTF-8 decode that silently drops invalid byte sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    UTF_8
        .decode(bytes, DecoderTrap::Ignore)
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}
