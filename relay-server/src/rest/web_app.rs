use actix_web::{
    error::InternalError,
    web::{Data, JsonConfig, ServiceConfig},
    App, HttpServer,
};
use interfaces::{image_cache::ImageCache, token_service::TokenService};
use launchpad_integration::pump_portal::PumpPortalClient;
use service::token_service_impl::TokenServiceImpl;
use solana_integration::l1_service_solana::SolanaService;
use std::{io, sync::Arc, time::Duration};
use storage::image_cache_memory::InMemoryImageCache;
use tracing::info;
use tracing_actix_web::TracingLogger;
use util::config::Settings;

use crate::rest::endpoints::{
    health_check::health,
    images::upload_image,
    responses::bad_request,
    static_page::{client_script, index},
    token_tx::{broadcast_tx, create_tx},
};
use crate::rest::marshalling::PAYLOAD_LIMIT;

pub async fn start_up_rest_server(cfg: &Settings) -> io::Result<()> {
    info!("Starting server");
    info!("Using upstream: {:?}", cfg.upstream);

    let app_state = AppState::create_app_state(cfg).await;

    HttpServer::new(move || {
        App::new()
            .configure(app_state.make_endpoints())
            .wrap(TracingLogger::default())
    })
    .bind((cfg.rest_server.host, cfg.rest_server.port))?
    .run()
    .await?;

    Ok(())
}

#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<dyn TokenService + Sync + Send>,
    pub image_cache: Arc<dyn ImageCache + Sync + Send>,
}

impl AppState {
    pub async fn create_app_state(cfg: &Settings) -> AppState {
        let launch_api = Arc::new(PumpPortalClient::new(&cfg.upstream));

        let solana_service = Arc::new(SolanaService::new(&cfg.solana.url));

        let token_service = Arc::new(TokenServiceImpl {
            launch_api,
            l1_service: solana_service,
            explorer_tx_url: cfg.solana.explorer_tx_url.clone(),
        });

        let image_cache = Arc::new(InMemoryImageCache::new(Duration::from_secs(cfg.image_cache.ttl_secs)));
        InMemoryImageCache::spawn_sweeper(&image_cache, Duration::from_secs(cfg.image_cache.sweep_interval_secs));

        AppState { token_service, image_cache }
    }

    pub fn make_endpoints(&self) -> impl FnOnce(&mut ServiceConfig) + '_ {
        let app_state = self.clone();

        |serv_cfg: &mut ServiceConfig| {
            serv_cfg
                .app_data(Data::new(app_state))
                .app_data(json_config())
                .service(health)
                .service(create_tx)
                .service(broadcast_tx)
                .service(upload_image)
                .service(index)
                .service(client_script);
        }
    }
}

/// Image data URIs arrive as JSON, the default 32 KiB limit is too small for them.
/// Malformed JSON bodies get the same `{ "error": ... }` shape as every other client error.
fn json_config() -> JsonConfig {
    JsonConfig::default().limit(PAYLOAD_LIMIT).error_handler(|err, _req| {
        let response = bad_request(&err.to_string());
        InternalError::from_response(err, response).into()
    })
}
