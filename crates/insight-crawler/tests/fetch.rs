use std::time::Duration;

use insight_crawler::{fetch_listing, FetchConfig, FetchError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> FetchConfig {
    FetchConfig {
        source_url: server.uri(),
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn downloads_the_listing_with_a_browser_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("accept-language", "en-US,en;q=0.5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<table class="rankTable"></table>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = fetch_listing(&config_for(&server)).await.unwrap();
    assert!(page.contains("rankTable"));
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetch_listing(&config_for(&server)).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 503));
}

#[tokio::test]
async fn challenge_interstitial_is_reported_as_such() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Just a moment...</title></head><body></body></html>",
        ))
        .mount(&server)
        .await;

    let err = fetch_listing(&config_for(&server)).await.unwrap_err();
    assert!(matches!(err, FetchError::Challenge));
}

#[tokio::test]
async fn slow_origin_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<table class="rankTable"></table>"#)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = FetchConfig {
        timeout_secs: 1,
        ..config_for(&server)
    };
    let err = fetch_listing(&config).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout(1)));
}
