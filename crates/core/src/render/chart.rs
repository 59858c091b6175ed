use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;

use crate::models::chart::ChartSeries;
use crate::models::settings::NumberGrouping;
use super::escape_html;
use super::format::format_currency;

const WIDTH: i32 = 640;
const HEIGHT: i32 = 240;
const PADDING: f64 = 24.0;
const LINE_COLOR: &str = "#f5c542";
const LINE_WIDTH: f64 = 3.0;
const TICK_COLOR: &str = "#9ca3af";
const MAX_X_TICKS: usize = 4;

fn svg_header(width: i32, height: i32) -> String {
    format!(
        r#"<svg class="portfolio-chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" preserveAspectRatio="none"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:{tick}}}</style>"#,
        w = width,
        h = height,
        tick = TICK_COLOR
    )
}

fn svg_footer() -> &'static str {
    "</svg>"
}

fn x_positions(len: usize, width: f64) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![width / 2.0];
    }

    let inner_width = width - 2.0 * PADDING;
    (0..len)
        .map(|i| PADDING + inner_width * (i as f64 / (len - 1) as f64))
        .collect()
}

/// Map values onto the vertical axis; a flat series sits mid-height.
fn y_positions(values: &[f64], height: f64) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() || min == max {
        return vec![height / 2.0; values.len()];
    }

    // Leave room at the bottom for the date labels.
    let inner_height = height - 3.0 * PADDING;
    values
        .iter()
        .map(|v| PADDING + (1.0 - (v - min) / (max - min)) * inner_height)
        .collect()
}

/// Indices of at most `MAX_X_TICKS` evenly spaced labels, first and last included.
pub fn tick_indices(len: usize) -> Vec<usize> {
    if len <= MAX_X_TICKS {
        return (0..len).collect();
    }
    let mut ticks: Vec<usize> = (0..MAX_X_TICKS)
        .map(|i| i * (len - 1) / (MAX_X_TICKS - 1))
        .collect();
    ticks.dedup();
    ticks
}

fn add_time_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64], height: f64) {
    let y = height - PADDING / 2.0;
    for idx in tick_indices(dates.len()) {
        let anchor = if idx == 0 {
            "start"
        } else if idx + 1 == dates.len() {
            "end"
        } else {
            "middle"
        };
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}">{label}</text>"#,
            x = xs[idx],
            y = y,
            anchor = anchor,
            label = dates[idx].format("%Y-%m-%d")
        ));
    }
}

/// Line chart of the portfolio's value history as inline SVG.
///
/// No legend and no value axis; each point carries a tooltip with the
/// whole-currency value.
pub fn render_history_chart(series: &ChartSeries, symbol: &str, grouping: NumberGrouping) -> String {
    if series.is_empty() {
        return r#"<div class="chart-empty">No history available</div>"#.to_string();
    }

    let width = WIDTH as f64;
    let height = HEIGHT as f64;
    let values: Vec<f64> = series
        .values
        .iter()
        .map(|v| v.to_f64().unwrap_or(0.0))
        .collect();
    let xs = x_positions(values.len(), width);
    let ys = y_positions(&values, height);

    let mut svg = String::new();
    svg.push_str(&svg_header(WIDTH, HEIGHT));

    let coords = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!(
        r#"<polyline fill="none" stroke="{LINE_COLOR}" stroke-width="{LINE_WIDTH}" stroke-linejoin="round" stroke-linecap="round" points="{coords}" />"#
    ));

    for ((x, y), (date, value)) in xs.iter().zip(&ys).zip(series.points()) {
        svg.push_str(&format!(
            r#"<circle cx="{x:.2}" cy="{y:.2}" r="4" fill="transparent"><title>{date}: {value}</title></circle>"#,
            date = date.format("%Y-%m-%d"),
            value = escape_html(&format_currency(value, symbol, 0, grouping))
        ));
    }

    add_time_axis(&mut svg, &series.dates, &xs, height);
    svg.push_str(svg_footer());
    svg
}
