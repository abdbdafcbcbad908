use chrono::NaiveDate;
use statcast_api::{Client, PitchLogQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(),
    )
}

#[tokio::test]
async fn get_pitcher_log_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("pitch_log.csv");

    Mock::given(method("GET"))
        .and(path("/statcast_search/csv"))
        .and(query_param("pitchers_lookup[]", "669373"))
        .and(query_param("game_date_gt", "2024-06-15"))
        .and(query_param("game_date_lt", "2024-06-16"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let (start, end) = window();
    let result = client
        .get_pitch_log(&PitchLogQuery::pitcher(669373, start, end))
        .await;
    assert!(result.is_ok());

    let rows = result.unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].pitcher, 669373);
    assert_eq!(rows[0].batter, 660271);
    assert_eq!(rows[2].events.as_deref(), Some("strikeout"));
}

#[tokio::test]
async fn get_league_log_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("pitch_log_empty.csv");

    Mock::given(method("GET"))
        .and(path("/statcast_search/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let (start, end) = window();
    let rows = client
        .get_pitch_log(&PitchLogQuery::league(start, end))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn get_pitch_log_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/statcast_search/csv"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let (start, end) = window();
    let result = client
        .get_pitch_log(&PitchLogQuery::league(start, end))
        .await;
    assert!(matches!(
        result,
        Err(statcast_api::Error::HttpStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn get_pitch_log_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/statcast_search/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not,a,pitch\n1,2,3\n"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let (start, end) = window();
    let result = client
        .get_pitch_log(&PitchLogQuery::league(start, end))
        .await;
    assert!(matches!(result, Err(statcast_api::Error::MalformedCsv)));
}
