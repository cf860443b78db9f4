use std::time::Duration;

use carsheet_engine::{
    FailureKind, FetchSettings, Fetcher, HttpPageSource, PageSource, ReqwestFetcher,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing_html(next_disabled: bool) -> String {
    let disabled = if next_disabled { " disabled" } else { "" };
    format!(
        r##"<html><body>
        <table id="specs">
          <thead><tr><th>Make</th><th>Model</th><th>Year</th><th>Engine</th></tr></thead>
          <tbody>
            <tr><td>Audi</td><td>R8</td><td>2024</td><td>5.2L V10</td></tr>
            <tr><td>BMW</td><td>M4</td><td>2024</td><td>3.0L I6</td></tr>
          </tbody>
        </table>
        <ul class="pagination">
          <li class="paginate_button page-item next{disabled}"><a href="#">Next</a></li>
        </ul>
        </body></html>"##
    )
}

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        base_url: format!("{}/cars/", server.uri()),
        ..FetchSettings::default()
    }
}

#[tokio::test]
async fn listing_page_is_fetched_decoded_and_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars/"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(listing_html(false), "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let source = HttpPageSource::new(settings_for(&server)).expect("build source");
    let listing = source.listing_page(1).await.expect("fetch ok");

    assert_eq!(listing.entries.len(), 2);
    assert!(listing.has_more);
    assert_eq!(listing.entries[0].brand, "Audi");
    assert_eq!(listing.entries[0].model, "R8");
    assert_eq!(listing.entries[0].year, Some(2024));
    assert_eq!(
        listing.entries[1].specs.get("Engine").map(String::as_str),
        Some("3.0L I6")
    );
}

#[tokio::test]
async fn page_index_lands_in_the_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars/"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(listing_html(true), "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpPageSource::new(settings_for(&server)).expect("build source");
    let listing = source.listing_page(3).await.expect("fetch ok");

    assert!(!listing.has_more);
}

#[tokio::test]
async fn http_error_status_ends_pagination_instead_of_failing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpPageSource::new(settings_for(&server)).expect("build source");
    let listing = source.listing_page(7).await.expect("end of data, not error");

    assert!(listing.entries.is_empty());
    assert!(!listing.has_more);
}

#[tokio::test]
async fn timeout_is_a_recoverable_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(listing_html(false), "text/html"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let source = HttpPageSource::new(settings).expect("build source");
    let err = source.listing_page(1).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn non_html_content_type_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"cars":[]}"#, "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("build fetcher");
    let err = fetcher.fetch(1).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "application/json".to_string()
        }
    );
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .insert_header("Content-Length", "11")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let fetcher = ReqwestFetcher::new(settings).expect("build fetcher");
    let err = fetcher.fetch(1).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn invalid_base_url_is_reported_not_panicked() {
    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: "not a url".to_string(),
        ..FetchSettings::default()
    })
    .expect("client builds regardless");

    let err = fetcher.fetch(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
