use encoding_rs::WINDOWS_1252;

/// Replacement for characters with no Windows-1252 code point.
const REPLACEMENT: u8 = b'?';

/// Text transcoded to Windows-1252, the single-byte encoding the PDF core
/// fonts are written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cp1252Text(Vec<u8>);

impl Cp1252Text {
    /// Transcode `text`. Characters outside the code page are replaced with
    /// `?`; the loss is accepted.
    pub fn encode(text: &str) -> Self {
        let mut bytes = Vec::with_capacity(text.len());
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let (encoded, _, unmappable) = WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
            if unmappable {
                bytes.push(REPLACEMENT);
            } else {
                bytes.extend_from_slice(&encoded);
            }
        }
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The text as it will appear on the page, back in Rust's string type.
    pub fn to_unicode(&self) -> String {
        WINDOWS_1252
            .decode_without_bom_handling(self.as_bytes())
            .0
            .into_owned()
    }
}
