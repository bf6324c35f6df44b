/// Decodes a plain-text upload as UTF-8. Invalid sequences become U+FFFD and a leading
/// byte-order mark is dropped.
pub fn decode_plain_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}
