#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};

/// Error body for everything that is not a field-level validation failure.
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct Detalle {
    pub detalle: String
}

pub fn detalle(status: StatusCode, mensaje: impl Into<String>) -> Response {
    return (status, Json(Detalle { detalle: mensaje.into() })).into_response();
}

pub async fn pageNotFound() -> impl IntoResponse {
    return detalle(StatusCode::NOT_FOUND, "Página no encontrada.");
}
