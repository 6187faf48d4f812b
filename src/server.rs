// http server mode - serve both scorers as a json api

use axum::{
    Json, Router,
    extract::{FromRequest, Request, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{Error, ScoreResult, TextScorer, UrlScorer, validate_url};

#[derive(Deserialize)]
struct TextRequest {
    content: String,
}

#[derive(Deserialize)]
struct UrlRequest {
    url: String,
}

// field name -> the type reported back when a body gets rejected
trait BodyFields {
    const FIELDS: &'static [(&'static str, &'static str)];

    fn expected(field: &str) -> Option<&'static str> {
        Self::FIELDS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, ty)| *ty)
    }
}

impl BodyFields for TextRequest {
    const FIELDS: &'static [(&'static str, &'static str)] = &[("content", "string")];
}

impl BodyFields for UrlRequest {
    const FIELDS: &'static [(&'static str, &'static str)] = &[("url", "http(s) url")];
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

// json body whose rejections come back as 422 invalid input
struct Payload<T>(T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + BodyFields,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_body::<T>(rejection)),
        }
    }
}

fn invalid_body<T: BodyFields>(rejection: JsonRejection) -> Error {
    let message = rejection.body_text();
    let field = match &rejection {
        JsonRejection::JsonDataError(_) => field_from_message(&message),
        _ => None,
    };

    // no single field at fault means the body as a whole was wrong
    let expected = match &field {
        Some(name) => T::expected(name),
        None => Some("json object"),
    };

    Error::InvalidInput {
        field,
        expected: expected.map(str::to_string),
        reason: message,
    }
}

// pulls the offending field out of serde's message, e.g.
// "missing field `content`" or "url: invalid type: integer `5`, ..."
fn field_from_message(message: &str) -> Option<String> {
    if let Some((_, rest)) = message.split_once("missing field `") {
        return rest.split_once('`').map(|(field, _)| field.to_string());
    }

    let detail = message
        .split_once("target type: ")
        .map_or(message, |(_, detail)| detail);
    let (path, _) = detail.split_once(": ")?;
    path.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
        .then(|| path.to_string())
}

pub struct Server;

impl Server {
    pub fn router() -> Router {
        let api = Router::new()
            .route("/analyze-text", post(analyze_text))
            .route("/analyze-url", post(analyze_url));

        // any origin for now, this isn't a security boundary
        Router::new()
            .route("/health", get(health))
            .nest("/api", api)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    pub async fn run(host: &str, port: u16) -> Result<(), Error> {
        let addr = format!("{host}:{port}");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        tracing::info!("server running at http://{addr}");

        axum::serve(listener, Self::router())
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn analyze_text(Payload(req): Payload<TextRequest>) -> Json<ScoreResult> {
    let result = TextScorer::score(&req.content);
    tracing::debug!(label = %result.label, score = result.risk_score, "scored text");
    Json(result)
}

async fn analyze_url(Payload(req): Payload<UrlRequest>) -> Result<Json<ScoreResult>, Error> {
    let url = validate_url(&req.url)?;
    let result = UrlScorer::score(url.as_str());
    tracing::debug!(label = %result.label, score = result.risk_score, "scored url");
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::field_from_message;

    #[test]
    fn finds_missing_field() {
        let msg = "Failed to deserialize the JSON body into the target type: missing field `content` at line 1 column 2";
        assert_eq!(field_from_message(msg).as_deref(), Some("content"));
    }

    #[test]
    fn finds_mistyped_field_path() {
        let msg = "Failed to deserialize the JSON body into the target type: url: invalid type: integer `5`, expected a string at line 1 column 8";
        assert_eq!(field_from_message(msg).as_deref(), Some("url"));
    }

    #[test]
    fn no_field_for_top_level_errors() {
        let msg = "Failed to deserialize the JSON body into the target type: invalid type: sequence, expected struct TextRequest at line 1 column 0";
        assert_eq!(field_from_message(msg), None);
    }
}
