use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};
use base64::{prelude::BASE64_STANDARD, Engine};
use entities::dto::{BroadcastTxRequest, BroadcastTxResponse, CreateTxResponse, STATUS_SUCCESS};
use interfaces::l1_service::BroadcastError;
use tracing::{info, warn};
use util::transaction::decode_transaction;

use crate::rest::endpoints::responses::{bad_request, internal_server_error};
use crate::rest::{marshalling, web_app::AppState};

/// Accepts the token form as `multipart/form-data`, registers the metadata upstream
/// and returns the unsigned create transaction together with the new mint keypair.
#[post("/create_tx")]
pub async fn create_tx(payload: Multipart, state: web::Data<AppState>) -> impl Responder {
    let req = match marshalling::read_create_token_form(payload).await {
        Ok(req) => req,
        Err(e) => {
            warn!("Rejected create_tx request: {e}");
            return bad_request(&e.to_string());
        }
    };

    info!("Creating token '{}' ({}) for '{}'", req.name, req.symbol, req.user_public_key);

    match state.token_service.create_token_transaction(req).await {
        Ok(draft) => HttpResponse::Ok().json(CreateTxResponse {
            unsigned_tx: BASE64_STANDARD.encode(&draft.unsigned_tx),
            mint_keypair: draft.mint_keypair_bs58(),
            mint_public_key: draft.mint_public_key,
        }),
        Err(e) => internal_server_error(&e.to_string()),
    }
}

/// This endpoint accepts a fully signed transaction and sends it to Solana as is.
#[post("/broadcast_tx")]
pub async fn broadcast_tx(req: web::Json<BroadcastTxRequest>, state: web::Data<AppState>) -> impl Responder {
    if req.signed_tx.trim().is_empty() {
        return bad_request("Missing required field: signed_tx");
    }
    let Ok(tx) = decode_transaction(&req.signed_tx) else {
        return bad_request("Malformed transaction");
    };

    match state.token_service.broadcast_transaction(tx).await {
        Ok(result) => HttpResponse::Ok().json(BroadcastTxResponse {
            status: STATUS_SUCCESS.to_string(),
            signature: result.signature,
            transaction_url: result.transaction_url,
        }),
        Err(e) => {
            if let Some(BroadcastError::MissingSignatures(_)) = e.downcast_ref::<BroadcastError>() {
                bad_request(&e.to_string())
            } else {
                internal_server_error(&e.to_string())
            }
        }
    }
}
