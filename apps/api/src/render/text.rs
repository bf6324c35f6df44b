use bytes::Bytes;

/// Plain-text output is the optimized text itself, UTF-8 encoded.
pub fn write_text(text: &str) -> Bytes {
    Bytes::copy_from_slice(text.as_bytes())
}
