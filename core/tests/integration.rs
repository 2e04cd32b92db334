//! Every verb against the live mock server over real HTTP.
//!
//! # Design
//! Starts the mock server on a random port inside the test runtime, then
//! drives the builder through the reqwest transport so request building,
//! content-type dispatch and schema validation are checked end to end.

use messager_core::{Decoded, Messager, MessagerError, Params, Typed};
use mock_server::{Echo, User};
use serde::Deserialize;
use serde_json::json;

/// Start the mock server on a random port and return its base URL.
async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run(listener).await });
    format!("http://{addr}")
}

#[derive(Debug, Deserialize, PartialEq)]
struct NumericA {
    a: i64,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct StringA {
    a: String,
}

#[tokio::test]
async fn get_json_without_schema() {
    let base = start_server().await;

    let fetched = Messager::default()
        .url(format!("{base}/json"))
        .get()
        .await
        .unwrap();

    assert_eq!(fetched.rs.status, 200);
    assert_eq!(fetched.data, Some(Decoded::Json(json!({ "a": 1 }))));
}

#[tokio::test]
async fn get_json_with_matching_schema() {
    let base = start_server().await;

    let fetched = Messager::default()
        .url(format!("{base}/json"))
        .schema(Typed::<NumericA>::new())
        .get()
        .await
        .unwrap();

    assert_eq!(fetched.data, Some(NumericA { a: 1 }));
}

#[tokio::test]
async fn get_json_with_mismatched_schema_fails() {
    let base = start_server().await;

    let err = Messager::default()
        .url(format!("{base}/json"))
        .schema(Typed::<StringA>::new())
        .get()
        .await
        .unwrap_err();

    assert!(matches!(err, MessagerError::Validation(_)));
}

#[tokio::test]
async fn not_found_is_a_result_not_an_error() {
    let base = start_server().await;

    let fetched = Messager::default()
        .url_with(&format!("{base}/users/:id"), &Params::new().set("id", 0))
        .unwrap()
        .schema(Typed::<User>::new())
        .get()
        .await
        .unwrap();

    assert_eq!(fetched.rs.status, 404);
    assert!(fetched.data.is_none());
}

#[tokio::test]
async fn templated_url_reaches_the_server() {
    let base = start_server().await;

    let fetched = Messager::default()
        .url_with(&format!("{base}/users/:id"), &Params::new().set("id", 42))
        .unwrap()
        .schema(Typed::<User>::new())
        .get()
        .await
        .unwrap();

    assert_eq!(
        fetched.data,
        Some(User {
            id: 42,
            name: "user-42".to_string()
        })
    );
}

#[tokio::test]
async fn encoded_parameter_is_decoded_by_the_server() {
    let base = start_server().await;

    let m = Messager::default()
        .url_with(&format!("{base}/search/:q"), &Params::new().set("q", "a b/c"))
        .unwrap();
    assert!(m.current_url().ends_with("/search/a%20b%2Fc"));

    let fetched = m.get().await.unwrap();
    let data = fetched.data.unwrap();
    assert_eq!(data.as_json().unwrap()["q"], "a b/c");
}

#[tokio::test]
async fn text_body_is_decoded_as_text() {
    let base = start_server().await;

    let fetched = Messager::default()
        .url(format!("{base}/text"))
        .get()
        .await
        .unwrap();

    assert_eq!(fetched.data, Some(Decoded::Text("hello there".to_string())));
}

#[tokio::test]
async fn unsupported_content_type_is_undecoded() {
    let base = start_server().await;

    let fetched = Messager::default()
        .url(format!("{base}/html"))
        .get()
        .await
        .unwrap();

    assert_eq!(fetched.data, Some(Decoded::Undecoded));
    assert_eq!(fetched.rs.body, "<p>hello</p>");
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let base = start_server().await;

    let err = Messager::default()
        .url(format!("{base}/broken-json"))
        .get()
        .await
        .unwrap_err();

    assert!(matches!(err, MessagerError::Decode(_)));
}

#[tokio::test]
async fn post_sends_json_body_and_bearer_token() {
    let base = start_server().await;

    let fetched = Messager::default()
        .url(format!("{base}/echo"))
        .with_bearer_token("secret")
        .schema(Typed::<Echo>::new())
        .post(Some(&json!({ "title": "Buy milk" })))
        .await
        .unwrap();

    let echo = fetched.data.unwrap();
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.authorization.as_deref(), Some("Bearer secret"));
    assert_eq!(echo.content_type.as_deref(), Some("application/json"));
    assert_eq!(echo.body, Some(json!({ "title": "Buy milk" })));
}

#[tokio::test]
async fn patch_without_body() {
    let base = start_server().await;

    let fetched = Messager::default()
        .url(format!("{base}/echo"))
        .header("x-trace", "t-1")
        .schema(Typed::<Echo>::new())
        .patch_empty()
        .await
        .unwrap();

    let echo = fetched.data.unwrap();
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.trace.as_deref(), Some("t-1"));
    assert!(echo.body.is_none());
}

#[tokio::test]
async fn bearer_token_replaces_custom_headers_on_the_wire() {
    let base = start_server().await;

    let fetched = Messager::default()
        .url(format!("{base}/echo"))
        .header("x-trace", "dropped")
        .with_bearer_token("abc")
        .schema(Typed::<Echo>::new())
        .get()
        .await
        .unwrap();

    let echo = fetched.data.unwrap();
    assert_eq!(echo.authorization.as_deref(), Some("Bearer abc"));
    assert!(echo.trace.is_none());
}

#[tokio::test]
async fn delete_returns_only_the_raw_response() {
    let base = start_server().await;

    let deleted = Messager::default()
        .url_with(&format!("{base}/items/:id"), &Params::new().set("id", 5))
        .unwrap()
        .delete()
        .await
        .unwrap();

    assert_eq!(deleted.req.status, 204);
    assert!(deleted.req.body.is_empty());
}

#[tokio::test]
async fn one_builder_serves_several_verbs() {
    let base = start_server().await;

    let m = Messager::default()
        .url(format!("{base}/echo"))
        .schema(Typed::<Echo>::new());

    let get = m.get().await.unwrap().data.unwrap();
    let post = m.post(Some(&json!([1, 2]))).await.unwrap().data.unwrap();
    assert_eq!(get.method, "GET");
    assert_eq!(post.method, "POST");
    assert_eq!(post.body, Some(json!([1, 2])));
}

#[tokio::test]
async fn verbs_without_url_fail_before_any_request() {
    let m = Messager::default();

    assert!(matches!(m.get().await, Err(MessagerError::NoUrlConfigured)));
    assert!(matches!(m.post_empty().await, Err(MessagerError::NoUrlConfigured)));
    assert!(matches!(m.patch_empty().await, Err(MessagerError::NoUrlConfigured)));
    assert!(matches!(m.delete().await, Err(MessagerError::NoUrlConfigured)));
}

#[tokio::test]
async fn connection_failure_surfaces_the_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = Messager::default()
        .url(format!("http://{addr}/json"))
        .get()
        .await
        .unwrap_err();

    let MessagerError::Transport(source) = err else {
        panic!("expected transport error");
    };
    let reqwest_err = source.downcast_ref::<reqwest::Error>().unwrap();
    assert!(reqwest_err.is_connect());
}

#[tokio::test]
async fn builders_share_one_client_by_reference() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let json = Messager::new(&client).url(format!("{base}/json"));
    let text = Messager::new(&client).url(format!("{base}/text"));
    assert!(std::ptr::eq(*json.transport(), *text.transport()));

    let (json, text) = tokio::join!(json.get(), text.get());
    assert_eq!(json.unwrap().data, Some(Decoded::Json(json!({ "a": 1 }))));
    assert_eq!(
        text.unwrap().data,
        Some(Decoded::Text("hello there".to_string()))
    );
}
