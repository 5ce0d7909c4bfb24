use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sidekick::web::{build_app, AppState};
use sidekick::{build_orchestrator, ClientConfig};

struct Upstreams {
    completions: MockServer,
    wikipedia: MockServer,
}

impl Upstreams {
    async fn start() -> Self {
        Self {
            completions: MockServer::start().await,
            wikipedia: MockServer::start().await,
        }
    }

    fn app(&self) -> Router {
        let config = ClientConfig {
            api_key: "sk-test".to_string(),
            api_url: self.completions.uri(),
            model: "gpt-4o-mini".to_string(),
            wikipedia_url: self.wikipedia.uri(),
            system_prompt: None,
            verbose: false,
        };
        build_app(AppState::new(build_orchestrator(&config)), None)
    }
}

fn completion(message: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl_test",
        "choices": [{ "index": 0, "message": message, "finish_reason": "stop" }]
    }))
}

fn post_chat(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_chat_without_tools() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "tool_choice": "auto" })))
        .respond_with(completion(json!({ "role": "assistant", "content": "Hello there!" })))
        .expect(1)
        .mount(&upstreams.completions)
        .await;

    let body = json!({
        "message": "Hi",
        "history": [
            { "role": "user", "content": "Earlier question" },
            { "role": "assistant", "content": "Earlier answer" }
        ]
    });
    let (status, response) = send(upstreams.app(), post_chat(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({ "answer": "Hello there!", "usedTools": [] }));

    let requests = upstreams.completions.received_requests().await.unwrap();
    let sent: Value = requests[0].body_json().unwrap();
    let roles: Vec<&str> = sent["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
    assert_eq!(sent["messages"][3]["content"], "Hi");
}

#[tokio::test]
async fn test_chat_with_wikipedia_lookup() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path("/page/summary/Rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Rust",
            "extract": "Rust is a general-purpose programming language."
        })))
        .expect(1)
        .mount(&upstreams.wikipedia)
        .await;
    let assistant_reply = json!({
        "role": "assistant",
        "content": null,
        "refusal": null,
        "tool_calls": [{
            "id": "call_abc",
            "type": "function",
            "function": { "name": "searchWikipedia", "arguments": "{\"query\":\"Rust\"}" },
            "extra_content": { "google": { "thought_signature": "sig_abc" } }
        }]
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "tool_choice": "auto" })))
        .respond_with(completion(assistant_reply.clone()))
        .with_priority(1)
        .expect(1)
        .mount(&upstreams.completions)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion(json!({
            "role": "assistant",
            "content": "Rust is a programming language."
        })))
        .expect(1)
        .mount(&upstreams.completions)
        .await;

    let (status, response) = send(
        upstreams.app(),
        post_chat(json!({ "message": "What is Rust?" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ "answer": "Rust is a programming language.", "usedTools": ["searchWikipedia"] })
    );

    let requests = upstreams.completions.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let second: Value = requests[1].body_json().unwrap();
    assert!(second.get("tools").is_none());
    assert!(second.get("tool_choice").is_none());

    let messages = second["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2], assistant_reply);
    assert_eq!(
        messages[3],
        json!({
            "role": "tool",
            "content": "Rust is a general-purpose programming language.",
            "tool_call_id": "call_abc",
            "name": "searchWikipedia"
        })
    );
}

#[tokio::test]
async fn test_unknown_tool_still_answers() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "tool_choice": "auto" })))
        .respond_with(completion(json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": { "name": "getWeather", "arguments": "{}" }
            }]
        })))
        .with_priority(1)
        .mount(&upstreams.completions)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion(json!({ "role": "assistant", "content": "No weather here." })))
        .mount(&upstreams.completions)
        .await;

    let (status, response) = send(
        upstreams.app(),
        post_chat(json!({ "message": "Weather?" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["usedTools"], json!(["getWeather"]));

    let requests = upstreams.completions.received_requests().await.unwrap();
    let second: Value = requests[1].body_json().unwrap();
    assert_eq!(second["messages"][3]["content"], "Tool not implemented: getWeather");
}

#[tokio::test]
async fn test_invalid_bodies_are_rejected_without_upstream_calls() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("POST"))
        .respond_with(completion(json!({ "role": "assistant", "content": "unreachable" })))
        .expect(0)
        .mount(&upstreams.completions)
        .await;

    let cases = [
        (json!({ "history": [] }).to_string(), "missing field `message`"),
        (
            json!({ "message": "Hi", "history": [{ "role": "robot", "content": "beep" }] })
                .to_string(),
            "unknown variant `robot`",
        ),
        (json!({ "message": "" }).to_string(), "message: must not be empty"),
        ("{\"message\": ".to_string(), "Failed to parse the request body as JSON"),
    ];

    for (body, expected) in cases {
        let (status, response) = send(upstreams.app(), post_chat(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        let error = response["error"].as_str().unwrap();
        assert!(error.contains(expected), "body: {body}, error: {error}");
    }
}

#[tokio::test]
async fn test_missing_content_type_is_a_bad_request() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("POST"))
        .respond_with(completion(json!({ "role": "assistant", "content": "unreachable" })))
        .expect(0)
        .mount(&upstreams.completions)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .body(Body::from(json!({ "message": "Hi" }).to_string()))
        .unwrap();
    let (status, response) = send(upstreams.app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = response["error"].as_str().unwrap();
    assert!(error.contains("Content-Type: application/json"), "error: {error}");
}

#[tokio::test]
async fn test_upstream_error_is_a_bad_request() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .expect(1)
        .mount(&upstreams.completions)
        .await;

    let (status, response) = send(
        upstreams.app(),
        post_chat(json!({ "message": "Hello" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = response["error"].as_str().unwrap();
    assert!(error.contains("Incorrect API key provided"), "error: {error}");
}

#[tokio::test]
async fn test_static_files_are_served() {
    let upstreams = Upstreams::start().await;
    let public = tempfile::tempdir().unwrap();
    std::fs::write(public.path().join("index.html"), "<h1>sidekick</h1>").unwrap();

    let config = ClientConfig {
        api_key: "sk-test".to_string(),
        api_url: upstreams.completions.uri(),
        model: "gpt-4o-mini".to_string(),
        wikipedia_url: upstreams.wikipedia.uri(),
        system_prompt: None,
        verbose: false,
    };
    let app = build_app(AppState::new(build_orchestrator(&config)), Some(public.path()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>sidekick</h1>");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("POST"))
        .respond_with(completion(json!({ "role": "assistant", "content": "Hi" })))
        .mount(&upstreams.completions)
        .await;

    let mut request = post_chat(json!({ "message": "Hello" }).to_string());
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://localhost:5173".parse().unwrap());

    let response = upstreams.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
