//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use infcraft_domain::{DomainError, RoomId, SortMode, Word};
use infcraft_shared::{
    CraftNounRequest, CraftNounResponse, ErrorCode, ErrorResponse, ListNounsQuery, NounData,
};

use crate::app::App;
use crate::infrastructure::ports::GenerationCause;
use crate::stores::VocabularyError;
use crate::use_cases::CraftError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/rooms/{room_id}/nouns", get(list_nouns))
        .route("/api/rooms/{room_id}/craft", post(craft_noun))
}

async fn health() -> &'static str {
    "OK"
}

async fn list_nouns(
    State(app): State<Arc<App>>,
    Path(room_id): Path<String>,
    Query(query): Query<ListNounsQuery>,
) -> Result<Json<Vec<NounData>>, ApiError> {
    let room = parse_room(room_id)?;
    let sort = match query.sort.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<SortMode>()?,
        _ => SortMode::default(),
    };

    let words = app.use_cases.vocabulary.list.execute(&room, sort).await?;
    Ok(Json(words.iter().map(noun_data).collect()))
}

async fn craft_noun(
    State(app): State<Arc<App>>,
    Path(room_id): Path<String>,
    payload: Result<Json<CraftNounRequest>, JsonRejection>,
) -> Result<Json<CraftNounResponse>, ApiError> {
    let room = parse_room(room_id)?;
    let Json(request) = payload?;
    let a = Word::new(&request.a.text, &request.a.emoji)?;
    let b = Word::new(&request.b.text, &request.b.emoji)?;

    let result = app.use_cases.craft.craft.craft(&room, a, b).await?;
    Ok(Json(CraftNounResponse {
        text: result.word.text().to_string(),
        emoji: result.word.emoji().to_string(),
        is_new_to_room: result.is_new_to_vocabulary,
    }))
}

fn parse_room(raw: String) -> Result<RoomId, ApiError> {
    RoomId::new(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn noun_data(word: &Word) -> NounData {
    NounData {
        text: word.text().to_string(),
        emoji: word.emoji().to_string(),
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    BadGateway(String),
    GatewayTimeout(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::ValidationError, msg),
            ),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(ErrorCode::Unauthorized, msg),
            ),
            ApiError::BadGateway(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new(ErrorCode::ServiceUnavailable, msg),
            ),
            ApiError::GatewayTimeout(msg) => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorResponse::new(ErrorCode::Timeout, msg),
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::InternalError, "Internal error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<VocabularyError> for ApiError {
    fn from(e: VocabularyError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<CraftError> for ApiError {
    fn from(e: CraftError) -> Self {
        match e {
            CraftError::Validation(e) => ApiError::BadRequest(e.to_string()),
            CraftError::Generation(e) => match e.cause {
                GenerationCause::Unauthorized => ApiError::Unauthorized(e.to_string()),
                GenerationCause::Timeout => ApiError::GatewayTimeout(e.to_string()),
                GenerationCause::Unavailable | GenerationCause::InvalidResponse => {
                    ApiError::BadGateway(e.to_string())
                }
            },
            CraftError::Storage(e) => e.into(),
            CraftError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use chrono::Utc;
    use infcraft_domain::CandidateWord;
    use tower::ServiceExt;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::persistence::InMemoryVocabularyRepo;
    use crate::infrastructure::ports::{GenerationError, MockWordGeneratorPort};

    fn router(generator: MockWordGeneratorPort) -> Router {
        let app = App::new(
            Arc::new(InMemoryVocabularyRepo::new()),
            Arc::new(generator),
            Arc::new(FixedClock(Utc::now())),
        );
        routes().with_state(Arc::new(app))
    }

    fn craft_request(room: &str, a: &str, b: &str) -> Request<Body> {
        let body = serde_json::json!({
            "a": { "text": a, "emoji": "" },
            "b": { "text": b, "emoji": "" },
        });
        Request::builder()
            .method("POST")
            .uri(format!("/api/rooms/{room}/craft"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_responds_ok() {
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = router(MockWordGeneratorPort::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn nouns_default_to_alphabetical() {
        let request = Request::builder()
            .uri("/api/rooms/infinite-craft/nouns")
            .body(Body::empty())
            .unwrap();
        let response = router(MockWordGeneratorPort::new())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let texts: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["Earth", "Fire", "Water", "Wind"]);
    }

    #[tokio::test]
    async fn nouns_honor_sort_query() {
        let request = Request::builder()
            .uri("/api/rooms/infinite-craft/nouns?sort=time")
            .body(Body::empty())
            .unwrap();
        let response = router(MockWordGeneratorPort::new())
            .oneshot(request)
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body[0], serde_json::json!({ "text": "Water", "emoji": "💧" }));
    }

    #[tokio::test]
    async fn unknown_sort_is_a_bad_request() {
        let request = Request::builder()
            .uri("/api/rooms/infinite-craft/nouns?sort=random")
            .body(Body::empty())
            .unwrap();
        let response = router(MockWordGeneratorPort::new())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn invalid_room_id_is_a_bad_request() {
        let request = Request::builder()
            .uri("/api/rooms/Not%20A%20Room/nouns")
            .body(Body::empty())
            .unwrap();
        let response = router(MockWordGeneratorPort::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn craft_returns_new_word() {
        let mut generator = MockWordGeneratorPort::new();
        generator
            .expect_generate()
            .returning(|_| Ok(CandidateWord::new("Steam", "💨")));

        let response = router(generator)
            .oneshot(craft_request("infinite-craft", "Water", "Fire"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "text": "Steam", "emoji": "💨", "isNewToRoom": true })
        );
    }

    #[tokio::test]
    async fn self_craft_is_a_bad_request() {
        let mut generator = MockWordGeneratorPort::new();
        generator.expect_generate().never();

        let response = router(generator)
            .oneshot(craft_request("infinite-craft", "Water", "water"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn malformed_body_gets_error_envelope() {
        let mut generator = MockWordGeneratorPort::new();
        generator.expect_generate().never();
        let request = Request::builder()
            .method("POST")
            .uri("/api/rooms/infinite-craft/craft")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"a": {"text": "Water"}}"#))
            .unwrap();

        let response = router(generator).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn generation_failures_map_to_gateway_statuses() {
        let cases = [
            (GenerationError::unauthorized("bad key"), StatusCode::UNAUTHORIZED, "unauthorized"),
            (GenerationError::timeout("slow"), StatusCode::GATEWAY_TIMEOUT, "timeout"),
            (
                GenerationError::unavailable("down"),
                StatusCode::BAD_GATEWAY,
                "service_unavailable",
            ),
            (
                GenerationError::invalid_response("not json"),
                StatusCode::BAD_GATEWAY,
                "service_unavailable",
            ),
        ];

        for (error, status, code) in cases {
            let mut generator = MockWordGeneratorPort::new();
            generator
                .expect_generate()
                .returning(move |_| Err(error.clone()));

            let response = router(generator)
                .oneshot(craft_request("infinite-craft", "Water", "Fire"))
                .await
                .unwrap();

            assert_eq!(response.status(), status);
            assert_eq!(json_body(response).await["error"], code);
        }
    }
}
