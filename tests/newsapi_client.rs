// tests/newsapi_client.rs
// Real HTTP client against a local mock upstream.

use std::time::Duration;

use civic_newsfeed::error::FetchError;
use civic_newsfeed::ingest::newsapi::{FetchQuery, NewsApi, NewsApiClient};
use mockito::Matcher;

const OK_BODY: &str = r#"{
  "status": "ok",
  "totalResults": 2,
  "articles": [
    {"source": {"id": null, "name": "City Post"}, "author": "A. Reporter",
     "title": "Ward 9 gets new water line", "description": "Work starts Monday",
     "url": "https://citypost.test/water", "urlToImage": "https://citypost.test/w.jpg",
     "publishedAt": "2024-06-01T06:00:00Z", "content": "..."},
    {"source": {"id": null, "name": "City Post"}, "author": null,
     "title": "Library hours change", "description": null,
     "url": "https://citypost.test/lib", "urlToImage": null,
     "publishedAt": "2024-06-01T05:00:00Z", "content": null}
  ]
}"#;

fn client(base: &str) -> NewsApiClient {
    NewsApiClient::new(base, "test-key", Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn top_headlines_sends_country_page_size_and_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("country".into(), "in".into()),
            Matcher::UrlEncoded("pageSize".into(), "20".into()),
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(OK_BODY)
        .create_async()
        .await;

    let items = client(&server.url())
        .fetch(&FetchQuery::TopHeadlines {
            country: "in".into(),
            page_size: 20,
        })
        .await
        .expect("ok response");

    mock.assert_async().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title.as_deref(), Some("Ward 9 gets new water line"));
    assert!(items[1].description.is_none());
}

#[tokio::test]
async fn everything_adds_language_and_sort() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/everything")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "metro OR traffic".into()),
            Matcher::UrlEncoded("language".into(), "en".into()),
            Matcher::UrlEncoded("sortBy".into(), "publishedAt".into()),
            Matcher::UrlEncoded("pageSize".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(OK_BODY)
        .create_async()
        .await;

    let base = format!("{}/", server.url());
    let items = client(&base)
        .fetch(&FetchQuery::Everything {
            query: "metro OR traffic".into(),
            page_size: 10,
        })
        .await
        .expect("ok response");

    mock.assert_async().await;
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn server_error_maps_to_http_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let err = client(&server.url())
        .fetch(&FetchQuery::TopHeadlines {
            country: "in".into(),
            page_size: 20,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::UpstreamHttp { status: 500 }));
    assert_eq!(err.kind(), "http");
}

#[tokio::test]
async fn upstream_error_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"error","code":"rateLimited","message":"Too many requests"}"#)
        .create_async()
        .await;

    let err = client(&server.url())
        .fetch(&FetchQuery::TopHeadlines {
            country: "in".into(),
            page_size: 20,
        })
        .await
        .unwrap_err();
    match err {
        FetchError::UpstreamApi { message } => assert_eq!(message, "Too many requests"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    // Port 9 on localhost: nothing listens there in CI.
    let err = client("http://127.0.0.1:9")
        .fetch(&FetchQuery::TopHeadlines {
            country: "in".into(),
            page_size: 1,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
}
