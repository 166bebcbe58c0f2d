use std::time::Duration;

use chrono::{TimeZone, Utc};
use insight_crawler::SiteRow;
use insight_snapshot::{
    fetch_dashboard_with_timeout, load_dashboard_file, AbsencePolicy, Batch, DashboardData,
    ReadError, SnapshotWriter, SummaryArtifact, DEMO_SITE,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_batch(day: u32) -> Batch {
    let rows = vec![
        SiteRow {
            name: "GGNetwork".into(),
            players_online: 134_304,
            cash_players: 89_230,
            peak_24h: 145_678,
            seven_day_avg: 125_890,
        },
        SiteRow {
            name: "PokerStars".into(),
            players_online: 55_540,
            cash_players: 38_900,
            peak_24h: 62_340,
            seven_day_avg: 58_720,
        },
    ];
    Batch::collect(rows, Utc.with_ymd_and_hms(2026, 8, day, 6, 0, 0).unwrap())
}

#[test]
fn published_artifacts_round_trip_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    let writer = SnapshotWriter::new(dir.path(), AbsencePolicy::Gap, 365);

    let published = writer.publish(&sample_batch(1)).unwrap();

    let feed = load_dashboard_file(writer.detail_path());
    assert!(feed.is_live());
    let reread = feed.data;
    assert_eq!(reread.summary.total_sites, published.summary.total_sites);
    assert_eq!(
        reread.summary.gg_poker_sites,
        published.summary.gg_poker_sites
    );
    assert_eq!(
        reread.summary.latest_total_players,
        published.summary.latest_total_players
    );
    assert_eq!(reread.summary.total_sites, 2);
    assert_eq!(reread.summary.gg_poker_sites, 1);
    assert_eq!(reread.summary.latest_total_players, 134_304 + 55_540);

    let raw = std::fs::read_to_string(writer.summary_path()).unwrap();
    let summary: SummaryArtifact = serde_json::from_str(&raw).unwrap();
    assert_eq!(summary.summary, reread.summary);
    assert_eq!(summary.latest_sites["GGNetwork"].players_online, 134_304);
    assert_eq!(summary.latest_sites["GGNetwork"].date, "2026-08-01");
}

#[test]
fn successive_runs_extend_the_series() {
    let dir = tempfile::tempdir().unwrap();
    let writer = SnapshotWriter::new(dir.path(), AbsencePolicy::Gap, 365);

    writer.publish(&sample_batch(1)).unwrap();
    let detail = writer.publish(&sample_batch(2)).unwrap();

    assert_eq!(detail.dates, vec!["2026-08-01", "2026-08-02"]);
    let series = &detail.sites["GGNetwork"].data;
    assert_eq!(series.dates.len(), 2);
    assert_eq!(series.players_online, vec![134_304, 134_304]);
}

#[test]
fn hand_edited_keys_survive_a_republish() {
    let dir = tempfile::tempdir().unwrap();
    let writer = SnapshotWriter::new(dir.path(), AbsencePolicy::Gap, 365);
    writer.publish(&sample_batch(1)).unwrap();

    // Simulate a curated annotation added by hand next to the data.
    let raw = std::fs::read_to_string(writer.detail_path()).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value.as_object_mut().unwrap().insert(
        "maintenance_notice".into(),
        serde_json::Value::String("GG splits regions on 2026-09-01".into()),
    );
    std::fs::write(
        writer.detail_path(),
        serde_json::to_vec_pretty(&value).unwrap(),
    )
    .unwrap();

    writer.publish(&sample_batch(2)).unwrap();

    let raw = std::fs::read_to_string(writer.detail_path()).unwrap();
    let reread: DashboardData = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        reread.extra["maintenance_notice"],
        serde_json::Value::String("GG splits regions on 2026-09-01".into())
    );
}

#[test]
fn corrupt_existing_artifact_starts_the_history_over() {
    let dir = tempfile::tempdir().unwrap();
    let writer = SnapshotWriter::new(dir.path(), AbsencePolicy::Gap, 365);

    std::fs::write(writer.detail_path(), "{ not json").unwrap();
    let detail = writer.publish(&sample_batch(1)).unwrap();

    assert_eq!(detail.dates, vec!["2026-08-01"]);
    assert_eq!(detail.summary.total_sites, 2);
}

#[tokio::test]
async fn reader_serves_live_data_when_the_artifact_is_reachable() {
    let dir = tempfile::tempdir().unwrap();
    let writer = SnapshotWriter::new(dir.path(), AbsencePolicy::Gap, 365);
    writer.publish(&sample_batch(1)).unwrap();
    let body = std::fs::read_to_string(writer.detail_path()).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let feed = fetch_dashboard_with_timeout(&server.uri(), Duration::from_secs(5)).await;
    assert!(feed.is_live());
    assert_eq!(feed.data.summary.total_sites, 2);
}

#[tokio::test]
async fn reader_times_out_into_demo_mode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let feed = fetch_dashboard_with_timeout(&server.uri(), Duration::from_millis(200)).await;
    assert!(!feed.is_live());
    assert!(matches!(feed.degraded, Some(ReadError::Http(_))));
    assert!(feed.data.sites.contains_key(DEMO_SITE));
    assert_eq!(feed.data.summary.latest_total_players, 0);
}

#[tokio::test]
async fn reader_degrades_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let feed = fetch_dashboard_with_timeout(&server.uri(), Duration::from_secs(5)).await;
    assert!(matches!(feed.degraded, Some(ReadError::Status(s)) if s.as_u16() == 404));
    assert!(feed.data.sites.contains_key(DEMO_SITE));
}
