use chrono::DateTime;
use rrd_chart::ChartError;
use rrd_chart::core::{ChannelMetadata, SourceFile, inspect_channels};
use rrd_chart::source::parse_info_output;

const IF_OCTETS_INFO: &str = r#"filename = "/var/lib/collectd/host/interface-eth0/if_octets.rrd"
rrd_version = "0003"
step = 10
last_update = 1700000000
header_size = 2872
ds[tx].index = 1
ds[tx].type = "DERIVE"
ds[tx].minimal_heartbeat = 20
ds[rx].index = 0
ds[rx].type = "DERIVE"
ds[rx].minimal_heartbeat = 20
rra[0].cf = "AVERAGE"
rra[0].rows = 1200
"#;

#[test]
fn channels_are_deduplicated_and_sorted() {
    let file = SourceFile::new("host/interface-eth0/if_octets.rrd");
    let metadata = ChannelMetadata::parse_info(IF_OCTETS_INFO);
    let channels = inspect_channels(&file, &metadata).expect("inspect");
    assert_eq!(channels.channels.as_slice(), ["rx", "tx"]);
    assert_eq!(channels.file, file);
}

#[test]
fn numeric_suffixes_sort_naturally() {
    let file = SourceFile::new("host/sensors/sensors.rrd");
    let metadata = ChannelMetadata::for_channels(&["ds10", "ds2", "ds1"]);
    let channels = inspect_channels(&file, &metadata).expect("inspect");
    assert_eq!(channels.channels.as_slice(), ["ds1", "ds2", "ds10"]);
}

#[test]
fn missing_channel_metadata_is_unreadable() {
    let file = SourceFile::new("host/broken/broken.rrd");
    let metadata = ChannelMetadata::parse_info("step = 10\nlast_update = 1700000000\n");
    let err = inspect_channels(&file, &metadata).expect_err("no channels must fail");
    assert!(matches!(err, ChartError::SourceUnreadable { .. }));
}

#[test]
fn info_output_yields_last_update() {
    let file = SourceFile::new("host/interface-eth0/if_octets.rrd");
    let metadata = parse_info_output(&file, IF_OCTETS_INFO).expect("parse");
    assert_eq!(
        metadata.last_update,
        DateTime::from_timestamp(1_700_000_000, 0).expect("timestamp")
    );
    assert_eq!(metadata.channels.get("ds[rx].type"), Some("DERIVE"));
}

#[test]
fn info_output_without_last_update_is_unreadable() {
    let file = SourceFile::new("host/x/x.rrd");
    let err = parse_info_output(&file, "ds[value].index = 0\n").expect_err("must fail");
    assert!(format!("{err}").contains("missing last_update"));
}

#[test]
fn base_label_drops_group_token() {
    assert_eq!(SourceFile::new("h/memory/memory-used.rrd").base_label('-'), "used");
    assert_eq!(SourceFile::new("h/df/df-var-log.rrd").base_label('-'), "var-log");
    assert_eq!(SourceFile::new("h/load/load.rrd").base_label('-'), "load");
    assert_eq!(SourceFile::new("h/odd/odd-.rrd").base_label('-'), "odd-");
}
