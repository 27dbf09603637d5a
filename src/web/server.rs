use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::ReferenceCatalog;
use crate::cli::ServeArgs;
use crate::matching::engine::ReferenceDecoder;
use crate::utils::validation::{validate_batch_size, validate_reference, ValidationError};

/// Request body limit; fits a full batch of maximum-length references
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;
pub const MAX_CONCURRENT_REQUESTS: usize = 100;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared application state
pub struct AppState {
    pub catalog: ReferenceCatalog,
}

/// Error body returned for rejected requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

#[derive(Deserialize)]
struct DecodeQuery {
    reference: String,
}

#[derive(Deserialize)]
struct DecodeRequest {
    references: Vec<String>,
    #[serde(default)]
    explain: bool,
}

fn error_response(status: StatusCode, error_type: &str, error: &ValidationError) -> Response {
    tracing::warn!("Rejected request ({error_type}): {error}");
    let body = ErrorResponse {
        error: error.to_string(),
        error_type: error_type.to_string(),
    };
    (status, Json(body)).into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the tokio runtime cannot
/// be created, or the server fails to start.
pub fn run(args: ServeArgs, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = ReferenceCatalog::load(catalog_path.as_deref())?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, catalog).await })
}

/// Create the application router with all routes and middleware configured.
pub fn create_router(catalog: ReferenceCatalog) -> Router {
    let state = Arc::new(AppState { catalog });

    Router::new()
        .route("/api/decode", get(decode_get_handler).post(decode_post_handler))
        .route("/api/catalog", get(catalog_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(REQUEST_TIMEOUT_SECS),
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs, catalog: ReferenceCatalog) -> anyhow::Result<()> {
    tracing::info!(
        families = catalog.len(),
        overrides = catalog.override_reference_count(),
        "catalog loaded"
    );
    let app = create_router(catalog);

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting watch-ref API server at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Decode a single reference from the query string
async fn decode_get_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DecodeQuery>,
) -> Response {
    if let Err(e) = validate_reference(&query.reference) {
        return error_response(StatusCode::BAD_REQUEST, "invalid_reference", &e);
    }

    let decoder = ReferenceDecoder::new(&state.catalog);
    Json(decoder.decode(&query.reference)).into_response()
}

/// Decode a list of references, optionally with explanations
async fn decode_post_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DecodeRequest>,
) -> Response {
    match validate_batch_size(request.references.len()) {
        Err(e @ ValidationError::TooManyReferences(_)) => {
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, "too_many_references", &e);
        }
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "empty_batch", &e),
        Ok(()) => {}
    }
    // Individual entries are never rejected: unusable ones decode to sentinels
    for reference in &request.references {
        if let Err(e) = validate_reference(reference) {
            tracing::warn!("Batch entry decoded as-is: {e}");
        }
    }

    let decoder = ReferenceDecoder::new(&state.catalog);
    let results = if request.explain {
        let explanations: Vec<_> = request
            .references
            .iter()
            .map(|r| decoder.explain(r))
            .collect();
        serde_json::json!(explanations)
    } else {
        let decoded: Vec<_> = request
            .references
            .iter()
            .map(|r| decoder.decode(r))
            .collect();
        serde_json::json!(decoded)
    };

    tracing::debug!(count = request.references.len(), "decoded batch request");
    Json(serde_json::json!({ "results": results })).into_response()
}

/// Return catalog table sizes, version and brand
async fn catalog_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use crate::core::decoded::DecodedReference;
    use crate::utils::validation::MAX_BATCH_REFERENCES;

    fn app() -> Router {
        create_router(ReferenceCatalog::load_embedded().unwrap())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/decode")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_decode_get() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/decode?reference=16710BLNR")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );

        let decoded: DecodedReference = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(decoded.model, "GMT Master II");
        assert_eq!(decoded.bezel, "Finely Engine Turned");
        assert_eq!(decoded.case_material, "Stainless");
        assert_eq!(decoded.reference_letters_meaning, "Bleu Noir (Blue Black)");
    }

    #[tokio::test]
    async fn test_decode_get_percent_encoded() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/decode?reference=6542%2F8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["reference_number"], "6542/8");
        assert_eq!(json["model"], "GMT Master");
    }

    #[tokio::test]
    async fn test_decode_get_rejects_long_reference() {
        let long = "1".repeat(100);
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/decode?reference={long}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error_type"], "invalid_reference");
    }

    #[tokio::test]
    async fn test_decode_post_batch() {
        let body = r#"{"references": ["116610LN", "1655", "---"]}"#.to_string();
        let response = app().oneshot(post_json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["model"], "Submariner");
        assert_eq!(results[1]["bezel"], "N/A");
        assert_eq!(results[2]["model"], "Unknown Model");
    }

    #[tokio::test]
    async fn test_decode_post_keeps_unusual_entries() {
        let long = format!("116610 {}", "x".repeat(72));
        let body = serde_json::json!({
            "references": ["116610LN", long, "16710BLNR\nverified"],
        })
        .to_string();
        let response = app().oneshot(post_json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[1]["model"], "Submariner Date");
        assert_eq!(results[2]["model"], "GMT Master II");
    }

    #[tokio::test]
    async fn test_decode_post_explain() {
        let body = r#"{"references": ["116610LN"], "explain": true}"#.to_string();
        let response = app().oneshot(post_json(body)).await.unwrap();

        let json = body_json(response).await;
        let first = &json["results"][0];
        assert_eq!(first["resolution"]["rule"], "override");
        assert_eq!(first["decoded"]["model"], "Submariner");
        assert_eq!(first["numeric_part"], "116610");
    }

    #[tokio::test]
    async fn test_decode_post_too_many_references() {
        let references = vec!["1"; MAX_BATCH_REFERENCES + 1];
        let body = serde_json::json!({ "references": references }).to_string();
        let response = app().oneshot(post_json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert_eq!(json["error_type"], "too_many_references");
    }

    #[tokio::test]
    async fn test_decode_post_empty_batch() {
        let response = app()
            .oneshot(post_json(r#"{"references": []}"#.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error_type"], "empty_batch");
    }

    #[tokio::test]
    async fn test_catalog_summary() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/catalog")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["bezels"], 7);
        assert_eq!(json["case_materials"], 10);
        assert_eq!(json["reference_letters"], 28);
    }
}
