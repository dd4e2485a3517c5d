use image::Rgba;

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`
pub fn parse_hex_color(value: &str) -> Option<Rgba<u8>> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(Rgba([rgb[0], rgb[1], rgb[2], 255]))
        }
        6 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255])),
        8 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_form() {
        assert_eq!(parse_hex_color("#0cd24d"), Some(Rgba([0x0c, 0xd2, 0x4d, 255])));
        assert_eq!(parse_hex_color("#FFFFFF80"), Some(Rgba([255, 255, 255, 0x80])));
    }

    #[test]
    fn test_short_form() {
        assert_eq!(parse_hex_color("#fff"), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_hex_color("#102"), Some(Rgba([0x11, 0x00, 0x22, 255])));
    }

    #[test]
    fn test_rejects_non_hex() {
        assert_eq!(parse_hex_color("white"), None);
        assert_eq!(parse_hex_color("ffffff"), None);
        assert_eq!(parse_hex_color("#ggg"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#"), None);
    }
}
