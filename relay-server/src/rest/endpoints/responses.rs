use actix_web::{http::header::ContentType, HttpResponse, HttpResponseBuilder};
use serde_json::json;

pub fn bad_request(msg: &str) -> HttpResponse {
    error_response(HttpResponse::BadRequest(), msg)
}

/// Upstream failures end up here, `msg` is passed to the caller as is.
pub fn internal_server_error(msg: &str) -> HttpResponse {
    error_response(HttpResponse::InternalServerError(), msg)
}

fn error_response(mut builder: HttpResponseBuilder, msg: &str) -> HttpResponse {
    let payload = json!({
        "error": msg,
    });

    builder.content_type(ContentType::json()).body(payload.to_string())
}
