#![allow(non_snake_case)]

use std::{error::Error, sync::Arc, time::Duration};

use axum_server::tls_rustls::RustlsConfig;
use crudUsuarioWebapi::models::validacion::ValidadorUsuario;
use crudUsuarioWebapi::routes;
use crudUsuarioWebapi::services::*;
use tracing_subscriber::EnvFilter;

async fn shutdownSignal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    //load environment vars. A missing .env is fine, real env vars are enough
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }

    //Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let appConfig = config::Config::fromEnv()?;

    let repositorio: Arc<dyn repositorio::RepositorioUsuarios> = match appConfig.almacen {
        config::TipoAlmacen::Postgres => {
            let databaseUrl = appConfig.databaseUrl.as_deref().ok_or(config::ConfigError::FaltaDatabaseUrl)?;
            let dbState = db::dbState::connect(databaseUrl).await?;
            dbState.migrateDb().await?;
            Arc::new(dbState)
        },
        config::TipoAlmacen::Memoria => {
            tracing::warn!("using the in-memory store, data is lost on restart");
            Arc::new(memoria::RepositorioMemoria::new())
        }
    };

    let appState = appState::AppState {
        usuarios: usuarios::ServicioUsuarios::new(repositorio, ValidadorUsuario::new(appConfig.generosPermitidos.clone()))
    };

    let app = routes::app(appState);

    tracing::info!(addr = %appConfig.bindAddr, tls = appConfig.tls.is_some(), generos = ?appConfig.generosPermitidos, "listening");

    match &appConfig.tls {
        Some(tls) => {
            let rustlsConfig = RustlsConfig::from_pem_file(&tls.certPath, &tls.keyPath).await?;

            let handle = axum_server::Handle::new();
            let shutdownHandle = handle.clone();
            tokio::spawn(async move {
                shutdownSignal().await;
                shutdownHandle.graceful_shutdown(Some(Duration::from_secs(10)));
            });

            axum_server::bind_rustls(appConfig.bindAddr, rustlsConfig)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        },
        None => {
            axum::Server::bind(&appConfig.bindAddr)
                .serve(app.into_make_service())
                .with_graceful_shutdown(shutdownSignal())
                .await?;
        }
    }

    Ok(())
}
