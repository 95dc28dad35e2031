//! Base64 encoding of font payloads (made by FontLab https://www.fontlab.com/)

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Characters per line inside a `<data>` element.
pub const LINE_WIDTH: usize = 68;

/// Encode `bytes` as standard base64, hard-wrapped at [`LINE_WIDTH`] columns.
///
/// Lines are joined with `\n`; there is no trailing newline.
pub fn encode_wrapped(bytes: &[u8]) -> String {
    let encoded = BASE64.encode(bytes);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH);

    for (i, line) in encoded.as_bytes().chunks(LINE_WIDTH).enumerate() {
        if i > 0 {
            wrapped.push('\n');
        }
        wrapped.extend(line.iter().map(|&b| b as char));
    }

    wrapped
}

/// Inverse of [`encode_wrapped`]; any ASCII whitespace is ignored.
pub fn decode_wrapped(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64.decode(compact)
}
