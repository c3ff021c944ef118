use crate::foundation::core::Rgb8;
use crate::foundation::error::{QuizError, QuizResult};

/// Parse a `RRGGBB` hex color, with or without a leading `#`, into its three 8-bit channels.
pub fn hex_to_rgb(hex: &str) -> QuizResult<Rgb8> {
    let s = hex.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    if s.len() != 6 || !s.is_ascii() {
        return Err(QuizError::validation(format!(
            "hex color must be #RRGGBB (case-insensitive), got \"{hex}\""
        )));
    }

    fn hex_byte(pair: &str) -> QuizResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| QuizError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    Ok(Rgb8::new(
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
    ))
}

/// Format a color back into lowercase `#rrggbb`.
pub fn rgb_to_hex(c: Rgb8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}
