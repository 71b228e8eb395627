use crate::core::{Color, LinearScale, PlotArea, Viewport};
use crate::error::ChartResult;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::chart_config::{ChartConfig, ChartData, ChartKind, Dataset};

const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 12.0;
const MARGIN_TOP: f64 = 28.0;
const MARGIN_BOTTOM: f64 = 28.0;
const FONT_SIZE_PX: f64 = 11.0;
const Y_TICK_COUNT: usize = 5;
const LINE_STROKE_WIDTH: f64 = 2.0;
const POINT_SIZE_PX: f64 = 4.0;
const BAR_BAND_FILL_RATIO: f64 = 0.8;
const LEGEND_SWATCH_PX: f64 = 10.0;
const LEGEND_GAP_PX: f64 = 12.0;

const AXIS_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.25);
const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.1);
const TEXT_COLOR: Color = Color::rgb(0.4, 0.4, 0.4);

/// Materializes the draw list for `config` on a canvas of `viewport` size.
///
/// Output is deterministic for identical input, so tests and renderers see
/// the same geometry.
pub fn build_chart_frame(config: &ChartConfig, viewport: Viewport) -> ChartResult<RenderFrame> {
    viewport.validate()?;
    let mut frame = RenderFrame::new(viewport);

    append_legend(&mut frame, &config.data.datasets);

    let area = PlotArea::inset(viewport, MARGIN_LEFT, MARGIN_TOP, MARGIN_RIGHT, MARGIN_BOTTOM);
    if !area.is_drawable() {
        return Ok(frame);
    }

    let values = config
        .data
        .datasets
        .iter()
        .flat_map(|dataset| dataset.data.iter().copied());
    let include_zero = config.kind == ChartKind::Bar || config.options.scales.y.begin_at_zero;
    let value_scale = LinearScale::covering(values, include_zero)?;

    if config.options.scales.y.display {
        append_value_axis(&mut frame, value_scale, area)?;
    }
    if config.options.scales.x.display {
        append_category_axis(&mut frame, config, area);
    }

    match config.kind {
        ChartKind::Line => append_line_datasets(&mut frame, &config.data, value_scale, area)?,
        ChartKind::Bar => append_bar_datasets(&mut frame, &config.data, value_scale, area)?,
    }

    Ok(frame)
}

/// Horizontal pixel center of category `index` out of `count`.
#[must_use]
pub fn category_center_x(kind: ChartKind, index: usize, count: usize, area: PlotArea) -> f64 {
    match kind {
        ChartKind::Line if count <= 1 => area.left + area.width * 0.5,
        ChartKind::Line => area.left + area.width * index as f64 / (count - 1) as f64,
        ChartKind::Bar => {
            let band = area.width / count.max(1) as f64;
            area.left + band * (index as f64 + 0.5)
        }
    }
}

/// Indices of categories whose labels are drawn under a tick cap.
#[must_use]
pub fn visible_label_indices(count: usize, max_ticks: Option<usize>) -> Vec<usize> {
    let stride = match max_ticks {
        Some(limit) if limit > 0 && count > limit => count.div_ceil(limit),
        _ => 1,
    };
    (0..count).step_by(stride).collect()
}

fn append_legend(frame: &mut RenderFrame, datasets: &[Dataset]) {
    let baseline = MARGIN_TOP * 0.5 + FONT_SIZE_PX * 0.4;
    let mut cursor = MARGIN_LEFT;
    for dataset in datasets {
        let swatch = RectPrimitive::new(
            cursor,
            baseline - LEGEND_SWATCH_PX,
            LEGEND_SWATCH_PX,
            LEGEND_SWATCH_PX,
            dataset.background_color,
        )
        .with_border(1.0, dataset.border_color);
        frame.rects.push(swatch);
        cursor += LEGEND_SWATCH_PX + 4.0;

        if !dataset.label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                dataset.label.clone(),
                cursor,
                baseline,
                FONT_SIZE_PX,
                TEXT_COLOR,
                TextHAlign::Left,
            ));
            cursor += estimate_text_width(&dataset.label);
        }
        cursor += LEGEND_GAP_PX;
    }
}

fn append_value_axis(
    frame: &mut RenderFrame,
    scale: LinearScale,
    area: PlotArea,
) -> ChartResult<()> {
    frame.lines.push(LinePrimitive::new(
        area.left,
        area.top,
        area.left,
        area.bottom(),
        1.0,
        AXIS_COLOR,
    ));

    for tick in scale.ticks(Y_TICK_COUNT) {
        let y = scale.value_to_pixel_y(tick, area)?;
        frame.lines.push(LinePrimitive::new(
            area.left,
            y,
            area.right(),
            y,
            1.0,
            GRID_COLOR,
        ));
        frame.texts.push(TextPrimitive::new(
            format_tick_value(tick),
            area.left - 4.0,
            y + FONT_SIZE_PX * 0.4,
            FONT_SIZE_PX,
            TEXT_COLOR,
            TextHAlign::Right,
        ));
    }
    Ok(())
}

fn append_category_axis(frame: &mut RenderFrame, config: &ChartConfig, area: PlotArea) {
    frame.lines.push(LinePrimitive::new(
        area.left,
        area.bottom(),
        area.right(),
        area.bottom(),
        1.0,
        AXIS_COLOR,
    ));

    let labels = &config.data.labels;
    let count = config.data.category_count();
    let max_ticks = config.options.scales.x.ticks.max_ticks_limit;
    for index in visible_label_indices(labels.len(), max_ticks) {
        let text = labels[index].to_string();
        if text.is_empty() {
            continue;
        }
        frame.texts.push(TextPrimitive::new(
            text,
            category_center_x(config.kind, index, count, area),
            area.bottom() + FONT_SIZE_PX + 4.0,
            FONT_SIZE_PX,
            TEXT_COLOR,
            TextHAlign::Center,
        ));
    }
}

fn append_line_datasets(
    frame: &mut RenderFrame,
    data: &ChartData,
    scale: LinearScale,
    area: PlotArea,
) -> ChartResult<()> {
    let count = data.category_count();
    for dataset in &data.datasets {
        let mut mapped = Vec::with_capacity(dataset.data.len());
        for (index, value) in dataset.data.iter().enumerate() {
            let x = category_center_x(ChartKind::Line, index, count, area);
            let y = scale.value_to_pixel_y(*value, area)?;
            mapped.push((x, y));
        }

        for pair in mapped.windows(2) {
            frame.lines.push(LinePrimitive::new(
                pair[0].0,
                pair[0].1,
                pair[1].0,
                pair[1].1,
                LINE_STROKE_WIDTH,
                dataset.border_color,
            ));
        }
        for (x, y) in mapped {
            let half = POINT_SIZE_PX * 0.5;
            frame.rects.push(
                RectPrimitive::new(
                    x - half,
                    y - half,
                    POINT_SIZE_PX,
                    POINT_SIZE_PX,
                    dataset.background_color,
                )
                .with_border(1.0, dataset.border_color),
            );
        }
    }
    Ok(())
}

fn append_bar_datasets(
    frame: &mut RenderFrame,
    data: &ChartData,
    scale: LinearScale,
    area: PlotArea,
) -> ChartResult<()> {
    let count = data.category_count();
    if count == 0 || data.datasets.is_empty() {
        return Ok(());
    }

    let band = area.width / count as f64;
    let bar_width = band * BAR_BAND_FILL_RATIO / data.datasets.len() as f64;
    let baseline_y = scale.value_to_pixel_y(0.0, area)?;

    for (series_index, dataset) in data.datasets.iter().enumerate() {
        for (index, value) in dataset.data.iter().enumerate() {
            let band_left = area.left + band * index as f64 + band * (1.0 - BAR_BAND_FILL_RATIO) * 0.5;
            let x = band_left + bar_width * series_index as f64;
            let y = scale.value_to_pixel_y(*value, area)?;
            frame.rects.push(
                RectPrimitive::new(
                    x,
                    y.min(baseline_y),
                    bar_width,
                    (y - baseline_y).abs(),
                    dataset.background_color,
                )
                .with_border(1.0, dataset.border_color),
            );
        }
    }
    Ok(())
}

fn format_tick_value(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn estimate_text_width(text: &str) -> f64 {
    text.chars().count() as f64 * FONT_SIZE_PX * 0.6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_values_drop_trailing_zeros() {
        assert_eq!(format_tick_value(2.0), "2");
        assert_eq!(format_tick_value(2.5), "2.5");
        assert_eq!(format_tick_value(-0.0001), "0");
    }

    #[test]
    fn label_stride_respects_tick_cap() {
        assert_eq!(visible_label_indices(5, Some(11)), vec![0, 1, 2, 3, 4]);
        assert_eq!(visible_label_indices(22, Some(11)), (0..22).step_by(2).collect::<Vec<_>>());
        assert_eq!(visible_label_indices(23, Some(11)).len(), 8);
    }

    #[test]
    fn category_centers_span_the_plot_area_for_lines() {
        let area = PlotArea {
            left: 10.0,
            top: 0.0,
            width: 100.0,
            height: 50.0,
        };
        assert_eq!(category_center_x(ChartKind::Line, 0, 3, area), 10.0);
        assert_eq!(category_center_x(ChartKind::Line, 2, 3, area), 110.0);
        assert_eq!(category_center_x(ChartKind::Bar, 0, 4, area), 22.5);
    }
}
