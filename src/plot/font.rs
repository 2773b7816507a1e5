//! Chart font registration.
//!
//! plotters is built without system font discovery, so a TrueType file is
//! loaded once per process and registered as the `sans-serif` family.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};
use tracing::{debug, warn};

use crate::error::{AppError, ErrorKind};

pub const FONT_FAMILY: &str = "sans-serif";

/// Searched in order after an explicit path. Humor Sans suits the hand-drawn look.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/humor-sans/Humor-Sans.ttf",
    "/usr/share/fonts/TTF/Humor-Sans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<Result<(), AppError>> = OnceLock::new();

/// Register the chart font.
///
/// Only the first call searches; later calls (with any `explicit`) see its result.
pub fn ensure_chart_font(explicit: Option<&Path>) -> Result<(), AppError> {
    REGISTERED
        .get_or_init(|| register_first_usable(&font_candidates(explicit)))
        .clone()
}

fn font_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(FONT_CANDIDATES.iter().map(PathBuf::from))
        .collect()
}

fn register_first_usable(candidates: &[PathBuf]) -> Result<(), AppError> {
    for path in candidates {
        let Ok(bytes) = std::fs::read(path) else {
            debug!(path = %path.display(), "no readable font here");
            continue;
        };

        // The registry keeps the bytes for the life of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                debug!(path = %path.display(), "registered chart font");
                return Ok(());
            }
            Err(_) => warn!(path = %path.display(), "not a usable TrueType font"),
        }
    }

    Err(AppError::new(
        ErrorKind::Render,
        format!(
            "No usable TrueType font found (searched {} locations); set TGDP_FONT_PATH.",
            candidates.len()
        ),
    ))
}
