use actix_web::{post, web, HttpResponse, Responder};
use entities::dto::{UploadImageRequest, UploadImageResponse, STATUS_SUCCESS};
use tracing::debug;
use util::base64_encode_decode::decode_image;

use crate::rest::endpoints::responses::bad_request;
use crate::rest::web_app::AppState;

/// Keeps an image for a while so the page can show it again without a second upload.
#[post("/upload_image")]
pub async fn upload_image(req: web::Json<UploadImageRequest>, state: web::Data<AppState>) -> impl Responder {
    let payload = match decode_image(&req.image) {
        Ok(payload) => payload,
        Err(e) => return bad_request(&e.to_string()),
    };

    let size = payload.len();
    let token = state.image_cache.put(payload);
    debug!("Cached image '{token}', {size} bytes");

    HttpResponse::Ok().json(UploadImageResponse { token: token.to_string(), status: STATUS_SUCCESS.to_string() })
}
