use std::{
    net::Ipv4Addr,
    panic::{set_hook, take_hook},
    process::exit,
};

use anyhow::{anyhow, Error};
use axum::serve;
use log::{error, info, warn};
use storefront_pager::{api, config::CONFIG, state::STATE};
use tokio::{net::TcpListener, signal};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let default_panic = take_hook();
    set_hook(Box::new(move |info| {
        error!("Panic: {}", info);
        default_panic(info);
        exit(1);
    }));

    // Request spans from tower_http are only wanted while developing.
    let (default_level, http_level) = match CONFIG.is_dev {
        true => (LevelFilter::DEBUG, "debug"),
        false => (LevelFilter::INFO, "info"),
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env()?
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive(format!("tower_http={http_level}").parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();

    let policy = &STATE.budgets;
    info!(
        "Page buttons: {} at >= {}px, {} below; default page size {}",
        policy.wide.get(),
        policy.breakpoint,
        policy.narrow.get(),
        STATE.default_page_size
    );

    let app = api::app(STATE.clone());
    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, CONFIG.port)).await?;
    info!("Server is listening on http://0.0.0.0:{}", CONFIG.port);
    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("Server error: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
