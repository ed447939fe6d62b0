//! Summary image: aggregate status plus the top 5 records by estimated GDP,
//! drawn as plain text lines onto a fixed 600x400 bitmap.
//!
//! Best-effort by contract: the refresh path logs and discards whatever this
//! module returns, so a rendering failure can never downgrade a successful
//! refresh response.

use crate::db::Db;
use crate::models::{Country, Status};
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

/// File name under the cache directory; `GET /countries/image` serves it.
pub const SUMMARY_FILE: &str = "summary.png";

const WIDTH: u32 = 600;
const HEIGHT: u32 = 400;
const TOP_COUNT: i64 = 5;

/// One-time registration for a fallback "sans-serif" font on the `ab_glyph`
/// text path. Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../assets/DejaVuSans.ttf"),
        );
    });
}

fn fmt_gdp(value: Option<f64>) -> String {
    match value {
        Some(x) if x.is_finite() => format!("{x:.2}"),
        _ => "n/a".to_string(),
    }
}

/// Draw the summary lines onto a fresh canvas at `path`.
pub fn draw_summary(status: &Status, top: &[Country], path: &Path) -> Result<()> {
    ensure_fonts_registered();
    let path_string = path.to_string_lossy().into_owned();
    let root = BitMapBackend::new(path_string.as_str(), (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, 18)).pos(Pos::new(HPos::Left, VPos::Top));
    let refreshed = status
        .last_refreshed_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());

    let mut lines = vec![
        format!("Total Countries: {}", status.total_countries),
        format!("Last Refreshed: {refreshed}"),
        "Top 5 Countries by Estimated GDP:".to_string(),
    ];
    for country in top {
        lines.push(format!(
            "  {}: {}",
            country.name,
            fmt_gdp(country.estimated_gdp)
        ));
    }

    let mut y = 20;
    for line in lines {
        root.draw(&Text::new(line, (20, y), style.clone()))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        y += 30;
    }

    root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

/// Read the current status and top rows from the store and write
/// `<cache_dir>/summary.png`, creating the directory when missing.
pub fn render(db: &Db, cache_dir: &Path) -> Result<PathBuf> {
    let status = crate::service::status(db)?;
    let top = db.top_by_gdp(TOP_COUNT)?;
    fs::create_dir_all(cache_dir)?;
    let path = cache_dir.join(SUMMARY_FILE);
    draw_summary(&status, &top, &path)?;
    Ok(path)
}
