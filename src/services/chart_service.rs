use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::config::{FIGURE_HEIGHT_IN, FIGURE_WIDTH_IN};
use crate::models::{PriceSeries, RangeStats};
use crate::services::price_service;
use crate::utils::{format_price, ChartError};

const BOTTOM_ZONE: RGBColor = RGBColor(31, 119, 180);
const TOP_ZONE: RGBColor = RGBColor(255, 127, 14);
const LEVEL_LINE: RGBColor = RGBColor(80, 80, 80);
const ZONE_OPACITY: f64 = 0.10;

/// Share of the figure width given to the plot; the rest holds the stats box
const PLOT_WIDTH_PCT: u32 = 80;

/// Decimal places for y-axis tick labels so ticks stay distinct over `span`
pub fn axis_decimals(span: f64) -> usize {
    if span >= 100.0 {
        0
    } else if span >= 1.0 {
        2
    } else {
        4
    }
}

/// Pixel size of the figure at a given resolution
pub fn figure_size(dpi: u32) -> (u32, u32) {
    (FIGURE_WIDTH_IN * dpi, FIGURE_HEIGHT_IN * dpi)
}

/// Render the price chart with its 25% zones to a PNG file.
///
/// Font sizes and stroke widths are given in points and scaled by `dpi`, so
/// every resolution shows the same picture.
pub fn render_chart(
    path: &Path,
    series: &PriceSeries,
    stats: &RangeStats,
    instrument: &str,
    dpi: u32,
) -> Result<(), ChartError> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(ChartError::data_unavailable(instrument)),
    };

    let pt = |points: f64| points * dpi as f64 / 72.0;
    let px = |points: f64| pt(points).round().max(1.0) as u32;

    let (width, height) = figure_size(dpi);
    debug!("Rendering {} at {} dpi ({}x{})", path.display(), dpi, width, height);

    // Time range; a single bar still needs a non-empty axis
    let x_min = first.timestamp;
    let x_max = if last.timestamp > x_min {
        last.timestamp
    } else {
        x_min + Duration::days(1)
    };

    // Price range with a little headroom
    let padding = if stats.range > 0.0 {
        stats.range * 0.05
    } else {
        (stats.high.abs() * 0.05).max(1e-8)
    };
    let y_min = stats.low - padding;
    let y_max = stats.high + padding;
    let decimals = axis_decimals(y_max - y_min);

    {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

        let (plot_area, side_area) = root.split_horizontally(width * PLOT_WIDTH_PCT / 100);

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(
                format!("{} - 1Y Price with 25% 52W Zones", instrument),
                ("sans-serif", pt(14.0)).into_font(),
            )
            .margin(px(6.0))
            .x_label_area_size(px(36.0))
            .y_label_area_size(px(64.0))
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Price (USD)")
            .x_label_formatter(&|d: &DateTime<Utc>| d.format("%Y-%m").to_string())
            .y_label_formatter(&|v: &f64| format!("{:.*}", decimals, v))
            .label_style(("sans-serif", pt(9.0)))
            .axis_desc_style(("sans-serif", pt(10.0)))
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(BLACK.mix(0.05))
            .draw()
            .map_err(|e| ChartError::Render(format!("Failed to draw mesh: {}", e)))?;

        let swatch = px(8.0) as i32;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x_min, stats.low), (x_max, stats.lower_band)],
                BOTTOM_ZONE.mix(ZONE_OPACITY).filled(),
            )))
            .map_err(|e| ChartError::Render(format!("Failed to draw bottom zone: {}", e)))?
            .label("Bottom 25% (52W)")
            .legend(move |(x, y)| {
                Rectangle::new(
                    [(x, y - swatch / 2), (x + 2 * swatch, y + swatch / 2)],
                    BOTTOM_ZONE.mix(ZONE_OPACITY * 3.0).filled(),
                )
            });

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x_min, stats.upper_band), (x_max, stats.high)],
                TOP_ZONE.mix(ZONE_OPACITY).filled(),
            )))
            .map_err(|e| ChartError::Render(format!("Failed to draw top zone: {}", e)))?
            .label("Top 25% (52W)")
            .legend(move |(x, y)| {
                Rectangle::new(
                    [(x, y - swatch / 2), (x + 2 * swatch, y + swatch / 2)],
                    TOP_ZONE.mix(ZONE_OPACITY * 3.0).filled(),
                )
            });

        let line_width = px(2.0);
        chart
            .draw_series(LineSeries::new(
                series.points().iter().map(|p| (p.timestamp, p.price)),
                BLACK.stroke_width(line_width),
            ))
            .map_err(|e| ChartError::Render(format!("Failed to draw price line: {}", e)))?
            .label(format!("{} Close", instrument))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 2 * swatch, y)], BLACK.stroke_width(line_width))
            });

        let label_style = ("sans-serif", pt(9.0))
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Bottom));

        for (name, level) in stats.levels() {
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(x_min, level), (x_max, level)],
                    px(4.0),
                    px(2.0),
                    LEVEL_LINE.stroke_width(px(1.0)),
                ))
                .map_err(|e| ChartError::Render(format!("Failed to draw level {}: {}", name, e)))?;

            chart
                .draw_series(std::iter::once(Text::new(
                    format!("  {}: {}", name, format_price(level)),
                    (x_min, level),
                    label_style.clone(),
                )))
                .map_err(|e| ChartError::Render(format!("Failed to label level {}: {}", name, e)))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", pt(9.0)))
            .margin(px(6.0))
            .legend_area_size(px(20.0))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()
            .map_err(|e| ChartError::Render(format!("Failed to draw legend: {}", e)))?;

        draw_stats_box(&side_area, stats, dpi)?;

        root.present()
            .map_err(|e| ChartError::Render(format!("Failed to render chart: {}", e)))?;
    }

    Ok(())
}

/// Text box with the five summary quantities in the upper-right corner
fn draw_stats_box<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    stats: &RangeStats,
    dpi: u32,
) -> Result<(), ChartError> {
    let pt = |points: f64| points * dpi as f64 / 72.0;
    let lines = price_service::stats_table(stats).render_lines();

    let (area_width, _) = area.dim_in_pixel();
    let font_size = pt(10.0);
    let line_height = (font_size * 1.4).round() as i32;
    let inset = pt(8.0).round() as i32;
    let top = pt(30.0).round() as i32;

    let x0 = inset;
    let x1 = area_width as i32 - inset;
    let y0 = top;
    let y1 = top + 2 * inset + line_height * lines.len() as i32;

    area.draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.mix(0.08).filled()))
        .map_err(|e| ChartError::Render(format!("Failed to draw stats box: {}", e)))?;
    area.draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.mix(0.3).stroke_width(1)))
        .map_err(|e| ChartError::Render(format!("Failed to draw stats border: {}", e)))?;

    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.as_str(),
            (x0 + inset, y0 + inset + i as i32 * line_height),
            ("monospace", font_size).into_font(),
        ))
        .map_err(|e| ChartError::Render(format!("Failed to draw stats text: {}", e)))?;
    }

    Ok(())
}
