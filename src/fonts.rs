//! Font setup. egui's bundled fonts have no Hangul glyphs, so a system
//! CJK font is appended as a fallback when one can be found.

use eframe::egui::{FontData, FontDefinitions, FontFamily};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

const HANGUL_FONT_NAME: &str = "hangul-fallback";

/// Well-known locations of fonts covering Hangul on Linux, macOS and Windows.
const HANGUL_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "C:\\Windows\\Fonts\\malgun.ttf",
];

/// First candidate that exists on disk.
fn find_font(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}

pub fn setup_fonts() -> FontDefinitions {
    let mut fonts = FontDefinitions::default();

    let Some(path) = find_font(HANGUL_FONT_CANDIDATES) else {
        warn!("no Hangul-capable font found, Korean labels may not render");
        return fonts;
    };
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), "failed to read font: {}", e);
            return fonts;
        }
    };
    info!(path = %path.display(), "using Hangul fallback font");

    fonts.font_data.insert(
        HANGUL_FONT_NAME.to_owned(),
        Arc::new(FontData::from_owned(bytes)),
    );
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(HANGUL_FONT_NAME.to_owned());
    }

    fonts
}
