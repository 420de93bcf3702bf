//! Bar chart rendering for the report views.
//!
//! Charts are drawn with the plotters SVG backend into a fresh string buffer
//! per call and returned as a `data:` URI, so a render never carries state
//! over from the previous one and the handler can embed it straight into the
//! page.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;

use crate::errors::AppError;

const CHART_WIDTH: u32 = 900;
const CHART_HEIGHT: u32 = 480;

/// Render a bar chart and return it as an SVG data URI.
///
/// `labels` and `values` must be the same length; they are the x categories
/// and bar heights respectively.
pub fn build_bar_chart(
    labels: &[String],
    values: &[i64],
    x_label: &str,
    y_label: &str,
    title: &str,
) -> Result<String, AppError> {
    if labels.len() != values.len() {
        return Err(AppError::Render(format!(
            "label/value length mismatch: {} labels, {} values",
            labels.len(),
            values.len()
        )));
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        // Keep the axes sane for empty tables and leave headroom above the
        // tallest bar.
        let columns = labels.len().max(1);
        let tallest = values.iter().copied().max().unwrap_or(0).max(1);
        let y_top = tallest + (tallest / 10).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28).into_font())
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d((0..columns).into_segmented(), 0i64..y_top)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .x_labels(columns)
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(values.iter().enumerate().map(|(i, value)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0i64),
                        (SegmentValue::Exact(i + 1), *value),
                    ],
                    BLUE.filled(),
                )
            }))
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }

    Ok(format!(
        "data:image/svg+xml;base64,{}",
        BASE64.encode(svg.as_bytes())
    ))
}

fn render_error<E: std::fmt::Display>(err: E) -> AppError {
    tracing::error!("Chart render error: {}", err);
    AppError::Render(format!("Chart render error: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_returns_svg_data_uri() {
        let uri = build_bar_chart(
            &labels(&["a", "b"]),
            &[3, 1],
            "Topic",
            "Mentions",
            "Topics",
        )
        .unwrap();
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
        assert!(uri.len() > "data:image/svg+xml;base64,".len());
    }

    #[test]
    fn test_consecutive_renders_do_not_bleed() {
        let first = build_bar_chart(&labels(&["a", "b"]), &[3, 1], "x", "y", "t").unwrap();
        let second = build_bar_chart(&labels(&["a", "b"]), &[3, 1], "x", "y", "t").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let result = build_bar_chart(&labels(&["a"]), &[1, 2], "x", "y", "t");
        assert!(matches!(result, Err(AppError::Render(_))));
    }

    #[test]
    fn test_empty_table_still_renders() {
        let uri = build_bar_chart(&[], &[], "x", "y", "t").unwrap();
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
    }
}
