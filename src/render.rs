use std::path::Path;

use anyhow::{anyhow, bail, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::color::generate_palette;
use crate::config::PlotConfig;
use crate::data::model::SeriesSet;

// ---------------------------------------------------------------------------
// Headless chart output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Pick the backend from the output file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => bail!("Unsupported output extension: .{other} (use .png or .svg)"),
        }
    }
}

/// Draw every series of `set` onto one chart and write it to `path`.
pub fn render_to_file(set: &SeriesSet, config: &PlotConfig, path: &Path) -> Result<()> {
    let size = (config.width, config.height);
    match ImageFormat::from_path(path)? {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(&root, set, config)
                .map_err(|e| anyhow!("plotting error in {}: {e}", path.display()))?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(&root, set, config)
                .map_err(|e| anyhow!("plotting error in {}: {e}", path.display()))?;
        }
    }
    log::info!(
        "Wrote {} series ({} points) to {}",
        set.len(),
        set.total_points(),
        path.display()
    );
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    set: &SeriesSet,
    config: &PlotConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let bounds = set.bounds().unwrap_or_default().padded();

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(70);
    if let Some(title) = &config.title {
        builder.caption(title, ("sans-serif", 28));
    }
    let mut chart =
        builder.build_cartesian_2d(bounds.x.0..bounds.x.1, bounds.y.0..bounds.y.1)?;

    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .draw()?;

    let colours = generate_palette(set.len());
    for (series, colour) in set.series.iter().zip(colours) {
        let style = colour.to_rgb();
        let points = series
            .points()
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        chart
            .draw_series(LineSeries::new(points, style.stroke_width(2)))?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    if !set.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
