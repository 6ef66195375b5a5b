use pairwise_core::api::ScoringApi;
use pairwise_core::comparison::{Comparison, CriteriaScore};
use pairwise_core::config::ClientConfig;
use pairwise_core::PairwiseError;
use pairwise_interaction::HttpScoringClient;
use pairwise_infrastructure::InMemoryCredentialStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One canned HTTP response.
struct Canned {
    status: u16,
    body: &'static str,
    delay: Duration,
}

impl Canned {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
        }
    }
}

/// Serves `responses` in order, one connection each, and returns the raw
/// requests it received.
async fn serve(responses: Vec<Canned>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut captured = Vec::new();
        for canned in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            captured.push(read_request(&mut socket).await);

            tokio::time::sleep(canned.delay).await;
            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                canned.status,
                canned.body.len(),
                canned.body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        captured
    });

    (format!("http://{}/", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let lower = line.to_ascii_lowercase();
                    lower
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

fn client(base_url: &str, token: Option<&str>, timeout_secs: u64) -> HttpScoringClient {
    let config = ClientConfig {
        api_url: base_url.to_string(),
        timeout_secs,
        default_rating_public: false,
    };
    let credentials = match token {
        Some(token) => InMemoryCredentialStore::with_token(token),
        None => InMemoryCredentialStore::new(),
    };
    let local = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpScoringClient::new(&config, Arc::new(credentials))
        .unwrap()
        .with_http_client(local)
}

const COMPARISON_JSON: &str = r#"{"video_a":{"video_id":"aaaaaaaaaaa"},"video_b":{"video_id":"bbbbbbbbbbb"},"criteria_scores":[{"criteria":"reliability","score":2.0,"weight":1.0}],"duration_ms":500}"#;

#[tokio::test]
async fn test_get_comparison_sends_bearer_token() {
    let (base_url, server) = serve(vec![Canned::new(200, COMPARISON_JSON)]).await;
    let client = client(&base_url, Some("secret-token"), 5);

    let comparison = client
        .get_comparison("aaaaaaaaaaa", "bbbbbbbbbbb")
        .await
        .unwrap();
    assert_eq!(comparison.duration_ms, 500);

    let requests = server.await.unwrap();
    let request = &requests[0];
    assert!(request.starts_with("GET /users/me/comparisons/aaaaaaaaaaa/bbbbbbbbbbb/ HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer secret-token"));
    assert!(request.to_ascii_lowercase().contains("accept: application/json"));
}

#[tokio::test]
async fn test_no_token_means_no_authorization_header() {
    let (base_url, server) = serve(vec![Canned::new(401, r#"{"detail":"no creds"}"#)]).await;
    let client = client(&base_url, None, 5);

    let err = client.get_video("aaaaaaaaaaa").await.unwrap_err();
    assert!(err.is_unauthenticated(), "got {err:?}");

    let requests = server.await.unwrap();
    assert!(!requests[0].to_ascii_lowercase().contains("authorization:"));
}

#[tokio::test]
async fn test_status_mapping() {
    let (base_url, server) = serve(vec![
        Canned::new(404, r#"{"detail":"Not found."}"#),
        Canned::new(409, r#"{"detail":"exists"}"#),
        Canned::new(403, r#"{"detail":"forbidden"}"#),
        Canned::new(500, "oops"),
    ])
    .await;
    let client = client(&base_url, Some("t"), 5);

    let not_found = client.get_comparison("aaaaaaaaaaa", "bbbbbbbbbbb").await.unwrap_err();
    assert!(not_found.is_not_found());

    let draft = Comparison::new(
        "aaaaaaaaaaa",
        "bbbbbbbbbbb",
        vec![CriteriaScore::new("reliability", 1.0)],
        10,
    );
    let conflict = client.create_comparison(&draft).await.unwrap_err();
    assert!(conflict.is_conflict());

    let forbidden = client.add_rate_later("aaaaaaaaaaa").await.unwrap_err();
    assert!(forbidden.is_unauthenticated());

    match client.list_rate_later().await.unwrap_err() {
        PairwiseError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "oops");
        }
        other => panic!("unexpected error {other:?}"),
    }

    let requests = server.await.unwrap();
    assert!(requests[1].starts_with("POST /users/me/comparisons/ HTTP/1.1"));
    assert!(requests[1].contains(r#""video_a":{"video_id":"aaaaaaaaaaa"}"#));
    assert!(requests[2].contains(r#"{"video":{"video_id":"aaaaaaaaaaa"}}"#));
}

#[tokio::test]
async fn test_update_uses_put_with_partial_body() {
    let (base_url, server) = serve(vec![Canned::new(200, COMPARISON_JSON)]).await;
    let client = client(&base_url, Some("t"), 5);

    let draft = Comparison::new(
        "aaaaaaaaaaa",
        "bbbbbbbbbbb",
        vec![CriteriaScore::new("reliability", 2.0)],
        500,
    );
    client
        .update_comparison("aaaaaaaaaaa", "bbbbbbbbbbb", &draft.to_update())
        .await
        .unwrap();

    let requests = server.await.unwrap();
    assert!(
        requests[0].starts_with("PUT /users/me/comparisons/aaaaaaaaaaa/bbbbbbbbbbb/ HTTP/1.1")
    );
    assert!(requests[0].contains(r#""duration_ms":500"#));
    assert!(!requests[0].contains("video_a"));
}

#[tokio::test]
async fn test_timeout_maps_to_timeout_error() {
    let (base_url, _server) = serve(vec![Canned {
        status: 200,
        body: COMPARISON_JSON,
        delay: Duration::from_secs(3),
    }])
    .await;
    let client = client(&base_url, Some("t"), 1);

    let err = client
        .get_comparison("aaaaaaaaaaa", "bbbbbbbbbbb")
        .await
        .unwrap_err();
    assert!(matches!(err, PairwiseError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn test_find_videos_uses_catalog_filter() {
    let (base_url, server) = serve(vec![Canned::new(
        200,
        r#"{"count":1,"next":null,"previous":null,"results":[{"video_id":"aaaaaaaaaaa","rating_n_contributors":3}]}"#,
    )])
    .await;
    let client = client(&base_url, None, 5);

    let page = client
        .find_videos(&pairwise_core::VideoFilter::by_video_id("aaaaaaaaaaa"))
        .await
        .unwrap();
    assert_eq!(page.results[0].rating_n_contributors, 3);

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET /video/?video_id=aaaaaaaaaaa HTTP/1.1"));
}

const RATING_JSON: &str = r#"{"video":{"video_id":"aaaaaaaaaaa"},"is_public":true,"n_comparisons":4}"#;

#[tokio::test]
async fn test_contributor_rating_requests() {
    let (base_url, server) = serve(vec![
        Canned::new(201, RATING_JSON),
        Canned::new(200, RATING_JSON),
        Canned::new(200, "{}"),
    ])
    .await;
    let client = client(&base_url, Some("t"), 5);

    let created = client
        .create_contributor_rating("aaaaaaaaaaa", true)
        .await
        .unwrap();
    assert_eq!(created.video.video_id, "aaaaaaaaaaa");

    let updated = client
        .set_rating_visibility("aaaaaaaaaaa", true)
        .await
        .unwrap();
    assert!(updated.is_public);
    assert_eq!(updated.n_comparisons, 4);

    client.set_all_ratings_visibility(false).await.unwrap();

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("POST /users/me/contributor_ratings/ HTTP/1.1"));
    assert!(requests[0].contains(r#"{"video_id":"aaaaaaaaaaa","is_public":true}"#));
    assert!(
        requests[1].starts_with("PATCH /users/me/contributor_ratings/aaaaaaaaaaa/ HTTP/1.1")
    );
    assert!(requests[1].contains(r#"{"is_public":true}"#));
    assert!(requests[2].starts_with("PATCH /users/me/contributor_ratings/_all/ HTTP/1.1"));
    assert!(requests[2].contains(r#"{"is_public":false}"#));
}

#[tokio::test]
async fn test_catalog_and_queue_requests() {
    let (base_url, server) = serve(vec![
        Canned::new(201, r#"{"video_id":"aaaaaaaaaaa"}"#),
        Canned::new(
            200,
            r#"{"count":1,"next":null,"previous":null,"results":[{"video_a":{"video_id":"aaaaaaaaaaa"},"video_b":{"video_id":"bbbbbbbbbbb"},"criteria_scores":[],"duration_ms":0}]}"#,
        ),
        Canned::new(204, ""),
    ])
    .await;
    let client = client(&base_url, Some("t"), 5);

    let video = client.create_video("aaaaaaaaaaa").await.unwrap();
    assert_eq!(video.video_id, "aaaaaaaaaaa");

    let page = client.list_comparisons(Some("aaaaaaaaaaa")).await.unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].video_b.video_id, "bbbbbbbbbbb");

    client.remove_rate_later("aaaaaaaaaaa").await.unwrap();

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("POST /video/ HTTP/1.1"));
    assert!(requests[0].contains(r#"{"video_id":"aaaaaaaaaaa"}"#));
    assert!(requests[1].starts_with("GET /users/me/comparisons/aaaaaaaaaaa/ HTTP/1.1"));
    assert!(
        requests[2].starts_with("DELETE /users/me/video_rate_later/aaaaaaaaaaa/ HTTP/1.1")
    );
}
