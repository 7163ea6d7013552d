use actix_web::{get, HttpResponse, Responder};
use entities::dto::{HealthResponse, STATUS_HEALTHY};

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: STATUS_HEALTHY.to_string() })
}
