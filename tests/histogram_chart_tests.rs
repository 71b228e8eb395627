use approx::assert_relative_eq;
use genchart::api::AxisLabel;
use genchart::components::{ChartState, HistogramChart, HistogramChartConfig, HistogramResetPolicy};
use genchart::core::HistogramPalette;
use genchart::host::HeadlessHost;
use genchart::render::{NullRenderer, RenderFrame, Renderer};
use genchart::{ChartError, ChartKind, ChartResult};

/// Fails exactly one draw, counting frames from chart construction.
struct FlakyRenderer {
    frames: usize,
    fail_on_frame: usize,
}

impl FlakyRenderer {
    fn failing_on(frame: usize) -> Self {
        Self {
            frames: 0,
            fail_on_frame: frame,
        }
    }
}

impl Renderer for FlakyRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames += 1;
        if self.frames == self.fail_on_frame {
            return Err(ChartError::InvalidData("surface lost".to_owned()));
        }
        Ok(())
    }
}

fn decade_bins() -> Vec<String> {
    vec!["0-10".to_owned(), "10-20".to_owned(), "20-30".to_owned()]
}

fn new_histogram(config: HistogramChartConfig) -> HistogramChart<NullRenderer> {
    let mut host = HeadlessHost::default();
    HistogramChart::new(&mut host, NullRenderer::default(), config).expect("histogram chart")
}

#[test]
fn construction_starts_with_all_zero_bins() {
    let chart = new_histogram(HistogramChartConfig::new(decade_bins(), 400, 200, "speed"));

    assert_eq!(chart.chart().kind(), ChartKind::Bar);
    assert_eq!(chart.chart().data().datasets.len(), 1);
    assert_eq!(chart.values(), &[0.0, 0.0, 0.0]);
    assert_eq!(chart.chart().data().datasets[0].label, "speed");
    assert_eq!(
        chart.chart().data().labels,
        vec![
            AxisLabel::from("0-10"),
            AxisLabel::from("10-20"),
            AxisLabel::from("20-30")
        ]
    );
    assert!(chart.chart().options().scales.y.begin_at_zero);
    assert_eq!(chart.state(), ChartState::Empty);
}

#[test]
fn render_replaces_the_whole_vector() {
    let mut chart = new_histogram(HistogramChartConfig::new(decade_bins(), 400, 200, "speed"));

    chart.render(Some(&[5.0, 3.0, 9.0])).expect("render");
    assert_eq!(chart.values(), &[5.0, 3.0, 9.0]);
    assert_eq!(chart.state(), ChartState::Populated);

    chart.render(Some(&[1.0, 0.0, 2.0])).expect("render again");
    assert_eq!(chart.values(), &[1.0, 0.0, 2.0]);
}

#[test]
fn reset_recreates_chart_from_zeroed_dataset() {
    let mut chart = new_histogram(HistogramChartConfig::new(decade_bins(), 400, 200, "speed"));
    chart.render(Some(&[5.0, 3.0, 9.0])).expect("render");

    chart.reset().expect("reset");

    assert_eq!(chart.values(), &[0.0, 0.0, 0.0]);
    assert_eq!(chart.state(), ChartState::Empty);
    assert_eq!(chart.reset_policy(), HistogramResetPolicy::Recreate);
    let renderer = chart.chart().renderer();
    assert_eq!(renderer.releases, 1);
    assert_eq!(renderer.frames_rendered, 3);
    assert!(!chart.chart().is_destroyed());
    assert_eq!(chart.chart().update_count(), 1);
}

#[test]
fn in_place_reset_zeroes_without_destroying() {
    let config = HistogramChartConfig::new(decade_bins(), 400, 200, "speed")
        .with_reset_policy(HistogramResetPolicy::InPlace);
    let mut chart = new_histogram(config);
    chart.render(Some(&[5.0, 3.0, 9.0])).expect("render");

    chart.reset().expect("reset");

    assert_eq!(chart.values(), &[0.0, 0.0, 0.0]);
    assert_eq!(chart.chart().renderer().releases, 0);
    assert_eq!(chart.chart().update_count(), 3);
}

#[test]
fn render_without_data_is_a_no_op() {
    let mut chart = new_histogram(HistogramChartConfig::new(decade_bins(), 400, 200, "speed"));
    chart.render(Some(&[5.0, 3.0, 9.0])).expect("render");

    chart.render(None).expect("no-op render");

    assert_eq!(chart.values(), &[5.0, 3.0, 9.0]);
    assert_eq!(chart.chart().renderer().frames_rendered, 2);
}

#[test]
fn render_rejects_length_mismatch() {
    let mut chart = new_histogram(HistogramChartConfig::new(decade_bins(), 400, 200, "speed"));

    let err = chart.render(Some(&[1.0, 2.0])).expect_err("too short");
    assert!(matches!(
        err,
        ChartError::LengthMismatch {
            what: "histogram data",
            expected: 3,
            actual: 2
        }
    ));
    assert_eq!(chart.values(), &[0.0, 0.0, 0.0]);
    assert_eq!(chart.state(), ChartState::Empty);
}

#[test]
fn legacy_palette_is_used_without_color() {
    let chart = new_histogram(HistogramChartConfig::new(decade_bins(), 400, 200, "speed"));
    let dataset = &chart.chart().data().datasets[0];

    assert_eq!(chart.palette(), HistogramPalette::legacy());
    assert_eq!(dataset.background_color.to_css(), "rgba(151,187,205,0.5)");
    assert_eq!(dataset.border_color.to_css(), "rgba(151,187,205,0.8)");
    assert_eq!(
        dataset.hover_background_color.map(|color| color.to_css()),
        Some("rgba(151,187,205,0.75)".to_owned())
    );
}

#[test]
fn derived_palette_uses_configured_color() {
    let config = HistogramChartConfig::new(decade_bins(), 400, 200, "size").with_color("#FF0000");
    let chart = new_histogram(config);
    let dataset = &chart.chart().data().datasets[0];

    assert_eq!(dataset.background_color.to_rgb8(), (255, 0, 0));
    assert_relative_eq!(dataset.background_color.alpha, 0.6);
    let hover = dataset.hover_background_color.expect("hover fill");
    assert_relative_eq!(hover.alpha, 0.8);
    assert_relative_eq!(dataset.border_color.alpha, 1.0);
    assert_eq!(dataset.border_color.to_rgb8(), (191, 0, 0));
}

#[test]
fn render_samples_bins_raw_values_over_edges() {
    let config = HistogramChartConfig::from_edges(vec![0.0, 10.0, 20.0, 30.0], 400, 200, "speed")
        .expect("edges config");
    assert_eq!(config.bins, decade_bins());
    let mut chart = new_histogram(config);

    chart
        .render_samples(&[1.0, 9.9, 10.0, 25.0, 30.0, 31.0, -2.0])
        .expect("render samples");

    assert_eq!(chart.values(), &[2.0, 1.0, 2.0]);
}

#[test]
fn render_samples_requires_edges() {
    let mut chart = new_histogram(HistogramChartConfig::new(decade_bins(), 400, 200, "speed"));

    let err = chart.render_samples(&[1.0]).expect_err("no edges");
    assert!(format!("{err}").contains("no bin edges"));
}

#[test]
fn config_rejects_empty_bins_and_mismatched_edges() {
    let err = HistogramChartConfig::new(Vec::new(), 400, 200, "speed")
        .validate()
        .expect_err("no bins");
    assert!(format!("{err}").contains("at least one bin"));

    let mut config = HistogramChartConfig::new(decade_bins(), 400, 200, "speed");
    config.edges = Some(vec![0.0, 1.0]);
    let err = config.validate().expect_err("edge count mismatch");
    assert!(matches!(
        err,
        ChartError::LengthMismatch {
            what: "bin edges",
            expected: 4,
            actual: 2
        }
    ));
}

#[test]
fn config_parses_from_json_with_defaults() {
    let config = HistogramChartConfig::from_json_str(
        r##"{"bins":["a","b"],"width":300,"height":120,"label":"awareness","color":"#336699"}"##,
    )
    .expect("config json");

    assert_eq!(config.reset_policy, HistogramResetPolicy::Recreate);
    assert_eq!(config.color.as_deref(), Some("#336699"));
    assert!(config.edges.is_none());
}

#[test]
fn render_accepts_opposite_extreme_values() {
    let mut chart = new_histogram(HistogramChartConfig::new(
        vec!["low".to_owned(), "high".to_owned()],
        400,
        200,
        "speed",
    ));

    chart
        .render(Some(&[f64::MAX, -f64::MAX]))
        .expect("extreme values");

    assert_eq!(chart.values(), &[f64::MAX, -f64::MAX]);
    assert_eq!(chart.state(), ChartState::Populated);
    assert_eq!(chart.chart().renderer().frames_rendered, 2);
}

#[test]
fn failed_draw_keeps_previous_bins_and_state() {
    let mut host = HeadlessHost::default();
    let mut renderer = FlakyRenderer::failing_on(2);
    let mut chart = HistogramChart::new(
        &mut host,
        &mut renderer,
        HistogramChartConfig::new(decade_bins(), 400, 200, "speed"),
    )
    .expect("histogram chart");

    chart
        .render(Some(&[5.0, 3.0, 9.0]))
        .expect_err("lost surface");
    assert_eq!(chart.values(), &[0.0, 0.0, 0.0]);
    assert_eq!(chart.state(), ChartState::Empty);

    chart.render(Some(&[5.0, 3.0, 9.0])).expect("retry");
    assert_eq!(chart.values(), &[5.0, 3.0, 9.0]);
    assert_eq!(chart.state(), ChartState::Populated);
    assert_eq!(chart.into_renderer().frames, 3);
}
