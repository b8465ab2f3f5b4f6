use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Maps a storage failure to a generic 500, logging the operation and
    /// the underlying error first. Clients only ever see `msg`.
    pub fn storage(op: &'static str, msg: &'static str) -> impl FnOnce(sqlx::Error) -> ApiError {
        move |e| {
            log::error!("{op}: {e:?}");
            ApiError::Internal(msg)
        }
    }
}

#[derive(Serialize)]
struct ApiErrBody {
    success: bool,
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrBody {
            success: false,
            error: self.to_string(),
        })
    }
}

/// Router-boundary fallback for 500s that did not come out of a handler as
/// JSON (a handler panic surfaced by actix, a misbehaving middleware).
/// Handler-produced envelopes already carry their message and pass through
/// untouched.
pub fn render_internal_error<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let already_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .map_or(false, |v| v.as_bytes().starts_with(b"application/json"));
    if already_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    if let Some(err) = res.response().error() {
        log::error!("unhandled error on {}: {err:?}", res.request().path());
    }
    let (req, _) = res.into_parts();
    let res = HttpResponse::InternalServerError()
        .json(serde_json::json!({ "error": "Internal Server Error" }));
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res).map_into_right_body(),
    ))
}
