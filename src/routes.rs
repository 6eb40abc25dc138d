#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

pub mod endpoints;
pub mod usuarios;

use axum::routing::get;
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::appState::AppState;

/// Builds the full application router over an already assembled state.
pub fn app(appState: AppState) -> Router {
    //All routes nested under /api, each reachable with and without the trailing slash
    let api: Router = axum::Router::new()
        .route("/usuarios", get(usuarios::listarUsuarios).post(usuarios::crearUsuario))
        .route("/usuarios/", get(usuarios::listarUsuarios).post(usuarios::crearUsuario))
        .route("/usuarios/:id", get(usuarios::obtenerUsuario).patch(usuarios::actualizarUsuario).delete(usuarios::eliminarUsuario))
        .route("/usuarios/:id/", get(usuarios::obtenerUsuario).patch(usuarios::actualizarUsuario).delete(usuarios::eliminarUsuario))
        .route("/generos", get(usuarios::getGenerosPermitidos))
        .route("/generos/", get(usuarios::getGenerosPermitidos))
        .with_state(appState);

    return axum::Router::new()
        .nest("/api", api)
        .fallback(endpoints::pageNotFound)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive());
}
