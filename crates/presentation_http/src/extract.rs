//! Request extractors

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body extractor accepting either JSON or an urlencoded form
///
/// `application/json` bodies go through [`Json`]; everything else is read
/// as a form. Rejections become 400 responses in the API's error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
}

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct CityBody {
        city: String,
    }

    async fn echo(JsonOrForm(body): JsonOrForm<CityBody>) -> String {
        body.city
    }

    fn app() -> Router {
        Router::new().route("/", post(echo))
    }

    async fn send(content_type: &str, body: &'static str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn accepts_json() {
        let (status, body) = send("application/json", r#"{"city":"Paris"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Paris");
    }

    #[tokio::test]
    async fn accepts_json_with_charset() {
        let (status, body) =
            send("application/json; charset=utf-8", r#"{"city":"Oslo"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Oslo");
    }

    #[tokio::test]
    async fn accepts_form() {
        let (status, body) = send("application/x-www-form-urlencoded", "city=San+Jose").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "San Jose");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, body) = send("application/json", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("bad_request"));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (status, _) = send("application/x-www-form-urlencoded", "country=fr").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
