//! Message text splitting and styling.

use eframe::egui;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ui::theme::ChatTheme;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("URL regex pattern is valid"));

/// A run of message text: plain or a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TextPiece<'a> {
    Plain(&'a str),
    Link(&'a str),
}

/// Split message text into plain runs and URLs, preserving every byte.
pub(crate) fn split_links(text: &str) -> Vec<TextPiece<'_>> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in URL_RE.find_iter(text) {
        if m.start() > last {
            pieces.push(TextPiece::Plain(&text[last..m.start()]));
        }
        pieces.push(TextPiece::Link(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        pieces.push(TextPiece::Plain(&text[last..]));
    }
    pieces
}

/// Render message text with clickable links.
pub(crate) fn render_message_text(ui: &mut egui::Ui, text: &str, theme: &ChatTheme) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for piece in split_links(text) {
            match piece {
                TextPiece::Plain(s) => {
                    ui.label(egui::RichText::new(s).size(16.0).color(theme.text_primary));
                }
                TextPiece::Link(url) => {
                    ui.hyperlink_to(egui::RichText::new(url).size(16.0).color(theme.info), url);
                }
            }
        }
    });
}
