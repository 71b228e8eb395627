use genchart::components::{HistogramChart, HistogramChartConfig, SeriesChart, SeriesChartConfig, SeriesSpec};
use genchart::host::{CanvasSpec, ChartHost, DEFAULT_CANVAS_STYLE, HeadlessHost};
use genchart::render::NullRenderer;
use genchart::ChartError;

#[test]
fn components_append_canvases_in_construction_order() {
    let mut host = HeadlessHost::default();
    let series = SeriesChart::new(
        &mut host,
        NullRenderer::default(),
        SeriesChartConfig::new(vec![SeriesSpec::new("Organisms", "#3366CC")], 500, 200),
    )
    .expect("series chart");
    let histogram = HistogramChart::new(
        &mut host,
        NullRenderer::default(),
        HistogramChartConfig::new(vec!["1".to_owned(), "2".to_owned()], 300, 150, "speed"),
    )
    .expect("histogram chart");

    assert_eq!(host.canvas_count(), 2);
    assert_eq!(host.container_id(), Some("elements"));
    assert!(series.canvas().id < histogram.canvas().id);
    assert_eq!(series.canvas().container_id, "elements");

    let mounted: Vec<_> = host.canvases().collect();
    assert_eq!(mounted[0].1.viewport.width, 500);
    assert_eq!(mounted[1].1.viewport.height, 150);
    assert!(mounted.iter().all(|(_, spec)| spec.style == DEFAULT_CANVAS_STYLE));
}

#[test]
fn detached_host_refuses_to_mount() {
    let mut host = HeadlessHost::detached();
    let result = SeriesChart::new(
        &mut host,
        NullRenderer::default(),
        SeriesChartConfig::new(vec![SeriesSpec::new("A", "#FF0000")], 400, 200),
    );

    assert!(matches!(result, Err(ChartError::MissingContainer(_))));
    assert_eq!(host.canvas_count(), 0);
}

#[test]
fn custom_container_and_style_are_recorded() {
    let mut host = HeadlessHost::new("dashboard");
    let handle = host
        .mount_canvas(CanvasSpec::new(120, 80).with_style("border:none"))
        .expect("mount");

    assert_eq!(handle.container_id, "dashboard");
    assert_eq!(host.canvas(handle.id).map(|spec| spec.style.as_str()), Some("border:none"));
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let mut host = HeadlessHost::default();
    let err = host.mount_canvas(CanvasSpec::new(0, 10)).expect_err("zero width");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 10 }));
}
