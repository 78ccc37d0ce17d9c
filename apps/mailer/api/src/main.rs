//! Mailer API entry point.
//!
//! Serves `POST /v1/email` and delivers through Postmark, falling back to
//! SendGrid.

use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_mailing::{
    EmailProvider, MailDispatcher, MailService, PostmarkProvider, SendGridProvider, handlers,
};
use eyre::WrapErr;
use tracing::info;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Missing provider keys stop the process here
    let config = Config::from_env()?;

    init_tracing(&config.environment);
    info!(
        name = %config.app.name,
        version = %config.app.version,
        "Starting mailer API"
    );

    // One client for every provider; it carries the per-attempt timeout
    let client = config
        .http
        .build_client()
        .wrap_err("Failed to build provider HTTP client")?;
    info!(timeout = ?config.http.timeout, "Provider HTTP client ready");

    // Priority order: Postmark, then SendGrid
    let providers: Vec<Box<dyn EmailProvider>> = vec![
        Box::new(PostmarkProvider::new(config.postmark.clone(), client.clone())),
        Box::new(SendGridProvider::new(config.sendgrid.clone(), client)),
    ];
    let dispatcher = MailDispatcher::new(providers).wrap_err("Invalid provider chain")?;
    info!(providers = ?dispatcher.provider_names(), "Provider chain configured");

    let api_routes = handlers::router(MailService::new(dispatcher));
    let app = create_router::<handlers::ApiDoc>(api_routes).merge(health_router(config.app));

    create_app(app, &config.server)
        .await
        .wrap_err("Server error")?;

    info!("Mailer API shutdown complete");
    Ok(())
}
