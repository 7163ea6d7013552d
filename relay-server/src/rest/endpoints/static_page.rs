use actix_web::{get, http::header::ContentType, web, HttpRequest, HttpResponse, Responder};
use entities::image::ImageToken;
use serde::Deserialize;
use util::base64_encode_decode::encode_image;

use crate::rest::web_app::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../../static/index.html");
const CLIENT_SCRIPT: &str = include_str!("../../../static/pumpfun-client.js");

const SERVER_URL_PLACEHOLDER: &str = "{{SERVER_URL}}";
const CACHED_IMAGE_PLACEHOLDER: &str = "{{CACHED_IMAGE}}";
const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    /// Token returned by `/upload_image`
    pub image: Option<String>,
}

#[get("/")]
pub async fn index(req: HttpRequest, query: web::Query<IndexQuery>, state: web::Data<AppState>) -> impl Responder {
    let cached_image = query
        .image
        .as_deref()
        .and_then(|token| state.image_cache.get(&ImageToken::from(token)))
        .map(|payload| encode_image(&payload));

    let page = render_index(&server_url(&req), cached_image.as_deref());

    HttpResponse::Ok().content_type(ContentType::html()).body(page)
}

#[get("/pumpfun-client.js")]
pub async fn client_script() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(CLIENT_SCRIPT)
}

/// Base URL the page should call back, `https` when a proxy in front terminated TLS.
pub fn server_url(req: &HttpRequest) -> String {
    let conn = req.connection_info();
    let scheme = req
        .headers()
        .get(FORWARDED_PROTO_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| conn.scheme().to_string());

    format!("{scheme}://{}", conn.host())
}

pub fn render_index(server_url: &str, cached_image: Option<&str>) -> String {
    let cached_image = cached_image.map(js_literal).unwrap_or_else(|| "null".to_string());

    INDEX_TEMPLATE
        .replace(SERVER_URL_PLACEHOLDER, &js_literal(server_url))
        .replace(CACHED_IMAGE_PLACEHOLDER, &cached_image)
}

// Escaping `<` keeps a value from closing the surrounding <script> tag.
fn js_literal(value: &str) -> String {
    serde_json::Value::from(value).to_string().replace('<', "\\u003c")
}
