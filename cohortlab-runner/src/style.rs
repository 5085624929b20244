//! Best-effort styling preferences for the static figure.
//!
//! Font availability depends on the host. A missing font is never fatal: the
//! first candidate installed on the system is used, and if none is found the
//! generic `sans-serif` family is handed to the backend with a warning.

use font_kit::source::SystemSource;

/// Generic family the backend always accepts as a name.
pub const FALLBACK_FAMILY: &str = "sans-serif";

/// Generic CSS families that plotters maps onto system defaults itself.
const GENERIC_FAMILIES: [&str; 3] = ["sans-serif", "serif", "monospace"];

/// Pick the first font family in `candidates` that is installed on this host.
pub fn resolve_font_family(candidates: &[String]) -> String {
    let source = SystemSource::new();
    pick_family(candidates, |name| source.select_family_by_name(name).is_ok())
}

/// True when the host exposes at least one font family to the backend.
pub fn fonts_available() -> bool {
    SystemSource::new()
        .all_families()
        .map(|families| !families.is_empty())
        .unwrap_or(false)
}

fn pick_family(candidates: &[String], installed: impl Fn(&str) -> bool) -> String {
    for name in candidates {
        if GENERIC_FAMILIES.contains(&name.as_str()) || installed(name) {
            tracing::debug!(family = %name, "using font family");
            return name.clone();
        }
        tracing::debug!(family = %name, "font family unavailable");
    }
    tracing::warn!(
        candidates = ?candidates,
        "no preferred font family could be loaded; falling back to {FALLBACK_FAMILY}"
    );
    FALLBACK_FAMILY.to_string()
}

/// Typographic points to pixels at the given DPI.
pub fn pt(points: f64, dpi: u32) -> f64 {
    points * f64::from(dpi) / 72.0
}

/// Stroke width in whole pixels, never zero.
pub fn stroke_px(points: f64, dpi: u32) -> u32 {
    pt(points, dpi).round().max(1.0) as u32
}
