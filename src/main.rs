use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use inference_relay::config::Settings;
use inference_relay::provider::HfInferenceClient;
use inference_relay::relay::Relay;
use inference_relay::server;
use inference_relay::util::init_tracing;
use std::sync::Arc;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing(&settings.log_level);

    if settings.provider.api_token.is_none() {
        warn!("HF_API_TOKEN is not set: requests to the provider are unauthenticated");
    }
    if settings.provider.model.is_none() {
        warn!("HF_MODEL is not set: every prediction will fail");
    }

    let provider = HfInferenceClient::new(&settings.provider)
        .context("failed to build the inference provider client")?;
    info!("relaying predictions through {provider:?}");

    let relay = web::Data::new(Relay::new(Arc::new(provider), settings.provider.model.clone()));
    let relay_settings = web::Data::new(settings.relay.clone());
    let cors_settings = settings.cors.clone();

    let mut http = HttpServer::new(move || {
        App::new()
            .wrap(server::cors(&cors_settings))
            .wrap(middleware::Logger::default())
            .app_data(relay.clone())
            .app_data(relay_settings.clone())
            .configure(server::configure)
    });
    if let Some(workers) = settings.server.workers {
        http = http.workers(workers);
    }

    info!(
        "listening on http://{}:{}",
        settings.server.host, settings.server.port
    );
    http.bind((settings.server.host.as_str(), settings.server.port))?
        .run()
        .await?;

    Ok(())
}
