use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Decoded page text plus the label of the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding: &'static str,
}

/// Decode raw listing bytes into UTF-8.
///
/// Encoding is chosen from the BOM, then the Content-Type charset, then a
/// chardetng guess. The decode itself is lossy: a malformed byte costs one
/// replacement character in one cell, never the whole page.
pub fn decode_listing_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    let encoding = select_encoding(bytes, content_type);
    let (text, used, _had_errors) = encoding.decode(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding: used.name(),
    }
}

fn select_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if let Some(label) = content_type.and_then(charset_label) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return encoding;
        }
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Some(
            value
                .trim_matches(|c| c == '"' || c == '\'' || c == ' ')
                .to_string(),
        )
    })
}
