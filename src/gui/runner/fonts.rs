//! Fallback fonts for the status glyphs (✓ ✗ ⚠ ←) the panels print

use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use tracing::{debug, warn};

#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &str)] = &[
    ("apple-symbols", "/System/Library/Fonts/Apple Symbols.ttf"),
    ("arial-unicode", "/Library/Fonts/Arial Unicode.ttf"),
];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &str)] = &[("segoe-symbol", "C:\\Windows\\Fonts\\seguisym.ttf")];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &str)] = &[
    ("noto-symbols2", "/usr/share/fonts/truetype/noto/NotoSansSymbols2-Regular.ttf"),
    ("noto-symbols2", "/usr/share/fonts/noto/NotoSansSymbols2-Regular.ttf"),
    ("dejavu-sans", "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
];

/// Append every readable candidate to both families, after egui's own fonts
pub(super) fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let mut installed = 0;

    for (name, path) in CANDIDATES {
        if fonts.font_data.contains_key(*name) {
            continue;
        }
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        fonts
            .font_data
            .insert((*name).to_string(), Arc::new(FontData::from_owned(bytes)));
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            fonts
                .families
                .entry(family)
                .or_default()
                .push((*name).to_string());
        }
        debug!("[manager] Fallback font {} <- {}", name, path);
        installed += 1;
    }

    if installed == 0 {
        warn!("[manager] No symbol font found; some glyphs may render as boxes");
    }
    ctx.set_fonts(fonts);
}
