use encoding_rs::{Encoding, EUC_KR, UTF_8};

/// Primary encoding: attempted first on read, always used for write-back.
pub static PRIMARY: &Encoding = UTF_8;

/// Fallback encoding attempted when the primary rejects the content.
/// EUC-KR here is the WHATWG superset covering Windows code page 949.
pub static FALLBACK: &Encoding = EUC_KR;

/// Decode `bytes` with the primary encoding, falling back to the alternate.
///
/// Returns the decoded text and the encoding that accepted it, or `None`
/// when both reject the content. Acceptance is heuristic: a decode with no
/// malformed sequences is trusted, which can misread binary data that
/// happens to be valid in one of the encodings.
pub fn decode(bytes: &[u8]) -> Option<(String, &'static Encoding)> {
    for encoding in [PRIMARY, FALLBACK] {
        let (text, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Some((text.into_owned(), encoding));
        }
    }
    None
}
