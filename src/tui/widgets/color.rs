use ratatui::style::Color;

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: black, red, green, yellow, blue, magenta, cyan, white, gray/grey
/// - Extended named colors: darkgray, lightred, lightgreen, lightyellow, lightblue, lightmagenta, lightcyan
/// - Hex format: #RRGGBB or #RGB (short form)
/// Returns Color::White for unrecognized colors
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => {
            if s.starts_with('#') {
                if let Some(color) = parse_hex_color(&s) {
                    return color;
                }
            }
            Color::White
        }
    }
}

/// Parse hex color format (#RRGGBB or #RGB)
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim_start_matches('#');

    if hex.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Some(Color::Rgb(r, g, b));
        }
    } else if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
        // Expand: 0x0 -> 0x00, 0xF -> 0xFF
        return Some(Color::Rgb((r << 4) | r, (g << 4) | g, (b << 4) | b));
    }

    None
}

/// Get an appropriate foreground color for text on a given background color.
/// RGB backgrounds use a perceived-brightness estimate; named colors use a
/// simple heuristic (most terminal palettes render them light).
pub fn get_contrast_text_color(background: Color) -> Color {
    match background {
        Color::Rgb(r, g, b) => {
            let brightness =
                0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
            if brightness < 128.0 {
                Color::White
            } else {
                Color::Black
            }
        }
        Color::Black | Color::Blue | Color::Magenta | Color::Red | Color::DarkGray => Color::White,
        _ => Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_hex_colors() {
        assert_eq!(parse_color("red"), Color::Red);
        assert_eq!(parse_color(" LightGreen "), Color::LightGreen);
        assert_eq!(parse_color("#ffd6d6"), Color::Rgb(0xff, 0xd6, 0xd6));
        assert_eq!(parse_color("#f00"), Color::Rgb(0xff, 0x00, 0x00));
        assert_eq!(parse_color("not-a-color"), Color::White);
        assert_eq!(parse_color("#zzz"), Color::White);
    }

    #[test]
    fn contrast_picks_readable_text_colors() {
        // the pastel tints are light, so text on them is black
        assert_eq!(get_contrast_text_color(Color::Rgb(0xff, 0xd6, 0xd6)), Color::Black);
        assert_eq!(get_contrast_text_color(Color::Rgb(0x20, 0x20, 0x20)), Color::White);
        assert_eq!(get_contrast_text_color(Color::Blue), Color::White);
        assert_eq!(get_contrast_text_color(Color::Yellow), Color::Black);
    }
}
