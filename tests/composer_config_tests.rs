use rrd_chart::ComposerConfig;
use rrd_chart::core::{Color, GraphSize, Palette};
use rrd_chart::render::ImageFormat;

#[test]
fn defaults_match_collectd_charts() {
    let config = ComposerConfig::default();
    assert_eq!(config.size, GraphSize::new(400, 100));
    assert_eq!(config.image_format, ImageFormat::Png);
    assert_eq!(config.value_format, "%8.2lf %s");
    assert_eq!(config.palette.len(), 10);
    assert_eq!(config.default_channel, "value");
    assert_eq!(config.group_delimiter, '-');
    assert!(config.watermark.starts_with("rrd-chart-rs "));
    config.validate().expect("defaults are valid");
}

#[test]
fn partial_json_keeps_defaults_for_missing_fields() {
    let config = ComposerConfig::from_json_str(
        r##"{ "size": { "width": 800, "height": 200 }, "image_format": "svg", "palette": ["#000000", "#ffffff"] }"##,
    )
    .expect("parse");

    assert_eq!(config.size, GraphSize::new(800, 200));
    assert_eq!(config.image_format, ImageFormat::Svg);
    assert_eq!(
        config.palette,
        Palette::new(vec![Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)]).expect("palette")
    );
    assert_eq!(config.value_format, "%8.2lf %s");
}

#[test]
fn json_round_trip_preserves_config() {
    let config = ComposerConfig::default()
        .with_size(640, 160)
        .with_watermark("ops")
        .with_line_width(2);
    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"#1F77B4\""));
    assert_eq!(ComposerConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn invalid_configs_are_rejected() {
    let err = ComposerConfig::default().with_size(0, 100).validate().expect_err("zero width");
    assert!(format!("{err}").contains("graph size"));

    let err = ComposerConfig::default().with_line_width(0).validate().expect_err("zero line");
    assert!(format!("{err}").contains("line width"));

    let err = ComposerConfig::from_json_str(r#"{ "palette": [] }"#).expect_err("empty palette");
    assert!(format!("{err}").contains("at least one color"));

    let err = ComposerConfig::from_json_str(r#"{ "palette": ["red"] }"#).expect_err("bad color");
    assert!(format!("{err}").contains("failed to parse config"));
}

#[test]
fn config_file_is_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("composer.json");
    std::fs::write(&path, r#"{ "watermark": "collectd" }"#).expect("write");
    let config = ComposerConfig::load(&path).expect("load");
    assert_eq!(config.watermark, "collectd");

    let err = ComposerConfig::load(dir.path().join("missing.json")).expect_err("missing file");
    assert!(format!("{err}").contains("unable to read config"));
}
