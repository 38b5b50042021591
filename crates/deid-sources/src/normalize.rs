//! Input decoding and punctuation normalization
//!
//! Both run before annotation. Offsets recorded afterwards refer to the
//! normalized text, which is also what gets persisted.

/// Decode raw input: UTF-8 when valid, otherwise Latin-1 (one char per byte)
pub fn decode_input(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::debug!("input is not UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}

/// Replace typographic punctuation with plain ASCII equivalents
pub fn normalize_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => {
                out.push('-')
            }
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => out.push(' '),
            '\u{2026}' => out.push_str("..."),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        assert_eq!(decode_input("Zoë".as_bytes()), "Zoë");
    }

    #[test]
    fn test_latin1_fallback() {
        // "Zo\xeb" is Latin-1 for "Zoë" and invalid UTF-8
        assert_eq!(decode_input(b"Zo\xeb"), "Zoë");
    }

    #[test]
    fn test_quotes_and_dashes() {
        assert_eq!(
            normalize_punctuation("\u{201C}Chris\u{2019}s\u{201D} \u{2014} Evans\u{2026}"),
            "\"Chris's\" - Evans..."
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "I think John Smith likes programming.";
        assert_eq!(normalize_punctuation(text), text);
    }
}
