use chrono::{DateTime, Utc};
use rrd_chart::ComposeWarning;
use rrd_chart::core::resolve_freshness;

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).expect("valid timestamp")
}

#[test]
fn agreeing_sources_resolve_without_warning() {
    let freshness = resolve_freshness(&[at(1_700_000_000); 3]).expect("resolve");
    assert_eq!(freshness.as_of, at(1_700_000_000));
    assert_eq!(freshness.warning, None);
}

#[test]
fn skewed_sources_resolve_to_latest_and_warn() {
    let freshness =
        resolve_freshness(&[at(1_700_000_020), at(1_700_000_000), at(1_700_000_010)])
            .expect("resolve");

    assert_eq!(freshness.as_of, at(1_700_000_020));
    assert_eq!(
        freshness.warning,
        Some(ComposeWarning::TimestampSkew {
            observed: vec![at(1_700_000_000), at(1_700_000_010), at(1_700_000_020)],
        })
    );
}

#[test]
fn skew_warning_lists_distinct_instants_only() {
    let freshness = resolve_freshness(&[at(10), at(20), at(10)]).expect("resolve");
    let Some(ComposeWarning::TimestampSkew { observed }) = freshness.warning else {
        panic!("expected skew warning");
    };
    assert_eq!(observed, vec![at(10), at(20)]);
}

#[test]
fn no_sources_is_invalid() {
    let err = resolve_freshness(&[]).expect_err("empty input must fail");
    assert!(format!("{err}").contains("without sources"));
}
