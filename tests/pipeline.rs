//! End-to-end tests: a mocked VK API behind the real reqwest transport,
//! with the produced RSS parsed back by feed-rs.

use serde_json::{Value, json};
use vk_rss::{Config, FeedError, MediaToggles, WallFeed};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> Config {
    let mut config = Config::new("token", "apiclub");
    config.api_base_url = format!("{}/", server.uri());
    config.toggles = MediaToggles::all();
    config
}

fn group_response() -> Value {
    json!({
        "response": [{
            "id": 1,
            "name": "API Club",
            "description": "News about the API",
            "photo_200": "https://pp.userapi.com/200.jpg",
            "photo_100": "https://pp.userapi.com/100.jpg",
            "photo_50": "https://pp.userapi.com/50.jpg"
        }]
    })
}

fn wall_response() -> Value {
    json!({
        "response": {
            "count": 2,
            "items": [
                {
                    "owner_id": 1,
                    "id": 100,
                    "date": 1_500_000_000,
                    "text": "",
                    "copy_history": [{
                        "owner_id": 2,
                        "id": 50,
                        "date": 1_400_000_000,
                        "text": "hi",
                        "attachments": [
                            {"type": "photo", "photo": {"photo_604": "https://pp.userapi.com/604.jpg"}}
                        ]
                    }]
                },
                {
                    "owner_id": 1,
                    "id": 99,
                    "date": 1_499_000_000,
                    "text": "first line\nsecond line",
                    "attachments": [
                        {"type": "doc", "doc": {"url": "https://vk.com/doc1_2", "title": "notes.txt"}},
                        {"type": "audio", "audio": {"artist": "Kino", "title": "Zvezda"}}
                    ]
                }
            ]
        }
    })
}

async fn mount(server: &MockServer, api_method: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{api_method}")))
        .and(query_param("access_token", "token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_feed_round_trips_through_rss_parser() {
    let server = MockServer::start().await;
    mount(&server, "groups.getById", group_response()).await;
    mount(&server, "wall.get", wall_response()).await;

    let feed = WallFeed::new(test_config(&server)).unwrap();
    let xml = feed.render().await.unwrap();

    let parsed = feed_rs::parser::parse(xml.as_bytes()).unwrap();

    assert_eq!(parsed.title.map(|t| t.content).as_deref(), Some("API Club"));
    assert_eq!(parsed.entries.len(), 2);

    let ids: Vec<&str> = parsed.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1_100", "1_99"]);

    let links: Vec<&str> = parsed
        .entries
        .iter()
        .map(|e| e.links[0].href.as_str())
        .collect();
    assert_eq!(
        links,
        vec!["https://vk.com/wall1_100", "https://vk.com/wall1_99"]
    );
}

#[tokio::test]
async fn test_repost_body_and_attachment_order_in_document() {
    let server = MockServer::start().await;
    mount(&server, "groups.getById", group_response()).await;
    mount(&server, "wall.get", wall_response()).await;

    let xml = WallFeed::new(test_config(&server))
        .unwrap()
        .render()
        .await
        .unwrap();

    assert!(xml.contains("<![CDATA[hi<br><img src='https://pp.userapi.com/604.jpg'><br>]]>"));
    assert!(xml.contains(
        "<![CDATA[first line<br>second line<br>🎧 Kino - Zvezda<br>💾 <a href='https://vk.com/doc1_2'>notes.txt</a><br>]]>"
    ));
    assert!(xml.contains("<url>https://pp.userapi.com/200.jpg</url>"));
    assert!(xml.contains("<lastBuildDate>Fri, 14 Jul 2017 02:40:00 +0000</lastBuildDate>"));
}

#[tokio::test]
async fn test_profile_failure_fails_the_whole_feed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "groups.getById",
        json!({"error": {"error_code": 100, "error_msg": "One of the parameters specified was missing or invalid"}}),
    )
    .await;
    mount(&server, "wall.get", wall_response()).await;

    let result = WallFeed::new(test_config(&server)).unwrap().render().await;

    match result {
        Err(FeedError::UpstreamApi { code, message }) => {
            assert_eq!(code, Some(100));
            assert!(message.starts_with("One of the parameters"));
        }
        other => panic!("expected UpstreamApi, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_wall_is_reported() {
    let server = MockServer::start().await;
    mount(&server, "groups.getById", group_response()).await;
    mount(&server, "wall.get", json!({"response": {"count": 0, "items": []}})).await;

    let result = WallFeed::new(test_config(&server)).unwrap().render().await;

    assert!(matches!(result, Err(FeedError::EmptyPage)));
}

#[tokio::test]
async fn test_http_error_status_is_surfaced() {
    let server = MockServer::start().await;
    mount(&server, "groups.getById", group_response()).await;
    Mock::given(method("GET"))
        .and(path("/wall.get"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = WallFeed::new(test_config(&server)).unwrap().render().await;

    assert!(matches!(result, Err(FeedError::HttpStatus(503))));
}
