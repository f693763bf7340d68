use super::*;
use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use shared::{error::ApiException, protocol::GenerationRequest, template::BUILTIN_WORD_TEMPLATE};
use tower::ServiceExt;

struct OfflineGenerator;

impl api::PoemGenerator for OfflineGenerator {
    fn generate(&self, _request: &GenerationRequest) -> Result<String, ApiException> {
        Err(ApiException::new(ErrorCode::Internal, "generator offline"))
    }
}

fn test_app() -> Router {
    build_router(Arc::new(AppState {
        api: ApiContext {
            generator: Arc::new(SkeletonGenerator),
        },
        word_template: Arc::from(BUILTIN_WORD_TEMPLATE),
    }))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

fn post_generate(body: impl Into<Body>) -> Request<Body> {
    Request::post(generate_route())
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let response = test_app()
        .oneshot(Request::get(health_route()).body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn word_template_is_served_as_html() {
    let response = test_app()
        .oneshot(
            Request::get(word_template_route())
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(body_text(response).await, BUILTIN_WORD_TEMPLATE);
}

#[tokio::test]
async fn generate_returns_plain_text_poem() {
    let response = test_app()
        .oneshot(post_generate(r#"{"rhyme":[1,2]}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "rhyme: w1 w2");
}

#[tokio::test]
async fn generate_rejects_unknown_device_with_api_error() {
    let response = test_app()
        .oneshot(post_generate(r#"{"rhymeswith":[1]}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ApiError = serde_json::from_str(&body_text(response).await).expect("api error");
    assert!(matches!(error.code, ErrorCode::Validation));
}

fn rhyme_body(count: u64) -> String {
    let ids: Vec<String> = (0..count).map(|id| id.to_string()).collect();
    format!(r#"{{"rhyme":[{}]}}"#, ids.join(","))
}

#[tokio::test]
async fn generate_rejects_oversized_payload() {
    // One just over the limit, one past the 2 MiB default of the body extractor.
    for body in [rhyme_body(20_000), rhyme_body(400_000)] {
        assert!(body.len() > MAX_REQUEST_BYTES);
        let response = test_app()
            .oneshot(post_generate(body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let error: ApiError =
            serde_json::from_str(&body_text(response).await).expect("api error");
        assert_eq!(error.code, ErrorCode::PayloadTooLarge);
    }
}

#[tokio::test]
async fn generator_failure_maps_to_server_error() {
    let app = build_router(Arc::new(AppState {
        api: ApiContext {
            generator: Arc::new(OfflineGenerator),
        },
        word_template: Arc::from(BUILTIN_WORD_TEMPLATE),
    }));

    let response = app
        .oneshot(post_generate(r#"{"alliteration":[0]}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: ApiError = serde_json::from_str(&body_text(response).await).expect("api error");
    assert_eq!(error.message, "generator offline");
}
