//! Color tokens → RGB for the canvas.
//!
//! Scripts store whatever token they were given; only painting interprets it.
//! Named colors follow CSS and match case-insensitively. `#rgb` and `#rrggbb`
//! are accepted. Anything else paints black.

use eframe::egui::Color32;

const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("pink", [255, 192, 203]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("brown", [165, 42, 42]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("lime", [0, 255, 0]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("gold", [255, 215, 0]),
    ("indigo", [75, 0, 130]),
    ("violet", [238, 130, 238]),
    ("coral", [255, 127, 80]),
    ("salmon", [250, 128, 114]),
    ("crimson", [220, 20, 60]),
    ("turquoise", [64, 224, 208]),
    ("skyblue", [135, 206, 235]),
    ("lightblue", [173, 216, 230]),
    ("darkblue", [0, 0, 139]),
    ("darkgreen", [0, 100, 0]),
    ("darkred", [139, 0, 0]),
    ("beige", [245, 245, 220]),
    ("tan", [210, 180, 140]),
    ("khaki", [240, 230, 140]),
    ("chocolate", [210, 105, 30]),
    ("lavender", [230, 230, 250]),
];

pub fn rgb(token: &str) -> [u8; 3] {
    let token = token.trim();
    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex).unwrap_or([0, 0, 0]);
    }
    NAMED
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, rgb)| *rgb)
        .unwrap_or([0, 0, 0])
}

/// Fill color for a token at the given opacity, clamped to `[0, 1]`.
pub fn fill(token: &str, opacity: f64) -> Color32 {
    let [r, g, b] = rgb(token);
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    match hex.len() {
        3 => Some([digit(0)? * 17, digit(1)? * 17, digit(2)? * 17]),
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some([byte(0)?, byte(2)?, byte(4)?])
        }
        _ => None,
    }
}
