//! Colors and small painting helpers.

use eframe::egui::{self, Color32};

/// Chat theme: surfaces, accents and text levels.
#[derive(Clone, Debug)]
pub struct ChatTheme {
    pub name: String,
    /// 0 = app background, 1 = message area, 2 = hover, 3 = popovers
    pub surface: [Color32; 4],
    pub accent: Color32,
    pub error: Color32,
    pub info: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border: Color32,
    /// Background of the message being edited
    pub editing: Color32,
}

impl ChatTheme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            surface: [
                Color32::from_rgb(10, 10, 15),
                Color32::from_rgb(28, 28, 38),
                Color32::from_rgb(37, 37, 50),
                Color32::from_rgb(56, 56, 74),
            ],
            accent: Color32::from_rgb(85, 52, 218),
            error: Color32::from_rgb(240, 71, 71),
            info: Color32::from_rgb(0, 175, 244),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(185, 187, 190),
            text_muted: Color32::from_rgb(114, 118, 125),
            border: Color32::from_rgb(47, 49, 54),
            editing: Color32::from_rgba_unmultiplied(255, 255, 255, 18),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(242, 243, 245),
                Color32::from_rgb(227, 229, 232),
                Color32::from_rgb(255, 255, 255),
            ],
            accent: Color32::from_rgb(85, 52, 218),
            error: Color32::from_rgb(240, 71, 71),
            info: Color32::from_rgb(0, 120, 200),
            text_primary: Color32::from_rgb(0, 0, 0),
            text_secondary: Color32::from_rgb(79, 86, 96),
            text_muted: Color32::from_rgb(102, 102, 102),
            border: Color32::from_rgb(204, 204, 204),
            editing: Color32::from_rgb(204, 204, 204),
        }
    }

    /// Theme by settings name; anything but "light" is dark.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

const USER_COLORS: [Color32; 8] = [
    Color32::from_rgb(231, 76, 60),
    Color32::from_rgb(46, 204, 113),
    Color32::from_rgb(52, 152, 219),
    Color32::from_rgb(155, 89, 182),
    Color32::from_rgb(241, 196, 15),
    Color32::from_rgb(230, 126, 34),
    Color32::from_rgb(26, 188, 156),
    Color32::from_rgb(236, 100, 166),
];

/// Stable color for a user id (FNV-1a).
pub fn user_color(user_id: &str) -> Color32 {
    let mut hash: u64 = 1469598103934665603u64;
    for b in user_id.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(1099511628211u64);
    }
    USER_COLORS[(hash as usize) % USER_COLORS.len()]
}

/// Circular avatar with the user's initial.
pub fn render_avatar(ui: &mut egui::Ui, user_id: &str, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), size / 2.0, user_color(user_id));

    let initial: String = user_id.chars().next().unwrap_or('?').to_uppercase().collect();
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial,
        egui::FontId::proportional(size * 0.45),
        Color32::WHITE,
    );
    response
}
