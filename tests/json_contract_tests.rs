use genchart::ChartConfig;
use genchart::components::{
    HistogramChart, HistogramChartConfig, SeriesChart, SeriesChartConfig, SeriesSpec,
};
use genchart::host::HeadlessHost;
use genchart::render::NullRenderer;

fn populated_series_chart() -> SeriesChart<NullRenderer> {
    let mut host = HeadlessHost::default();
    let mut chart = SeriesChart::new(
        &mut host,
        NullRenderer::default(),
        SeriesChartConfig::new(vec![SeriesSpec::new("A", "#FF0000")], 400, 200),
    )
    .expect("series chart");
    chart.render(Some(&[7.0])).expect("render");
    chart
}

#[test]
fn config_json_uses_canvas_key_spelling() {
    let chart = populated_series_chart();
    let json = chart.chart().config().to_json_pretty().expect("json");

    assert!(json.contains("\"type\": \"line\""));
    assert!(json.contains("\"borderColor\": \"rgba(255,0,0,1)\""));
    assert!(json.contains("\"backgroundColor\": \"rgba(255,0,0,0.1)\""));
    assert!(json.contains("\"maxTicksLimit\": 11"));
    assert!(json.contains("\"mode\": \"index\""));
}

#[test]
fn contract_v1_round_trips_through_compat_parser() {
    let chart = populated_series_chart();
    let json = chart.chart().config_json_contract_v1_pretty().expect("contract");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = ChartConfig::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(&parsed, chart.chart().config());

    let bare = chart.chart().config().to_json_pretty().expect("bare json");
    let parsed_bare = ChartConfig::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(&parsed_bare, chart.chart().config());
}

#[test]
fn contract_v1_round_trips_derived_histogram_colors() {
    let mut host = HeadlessHost::default();
    let config = HistogramChartConfig::new(
        vec!["0-10".to_owned(), "10-20".to_owned(), "20-30".to_owned()],
        400,
        200,
        "awareness",
    )
    .with_color("#336699");
    let mut chart =
        HistogramChart::new(&mut host, NullRenderer::default(), config).expect("histogram chart");
    chart.render(Some(&[5.0, 3.0, 9.0])).expect("render");

    let json = chart.chart().config_json_contract_v1_pretty().expect("contract");
    let parsed = ChartConfig::from_json_compat_str(&json).expect("parse contract");

    assert_eq!(&parsed, chart.chart().config());
    assert_eq!(
        parsed.data.datasets[0].border_color,
        chart.palette().border
    );
}

#[test]
fn compat_parser_rejects_unknown_schema_version() {
    let chart = populated_series_chart();
    let json = chart
        .chart()
        .config_json_contract_v1_pretty()
        .expect("contract")
        .replace("\"schema_version\": 1", "\"schema_version\": 2");

    let err = ChartConfig::from_json_compat_str(&json).expect_err("version 2");
    assert!(format!("{err}").contains("unsupported chart config schema version: 2"));
}

#[test]
fn compat_parser_reports_malformed_payload() {
    let err = ChartConfig::from_json_compat_str("{\"type\": \"pie\"}").expect_err("bad kind");
    assert!(format!("{err}").contains("failed to parse chart config json payload"));
}
