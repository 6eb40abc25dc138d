#![allow(non_snake_case)]
#![allow(clippy::needless_return)]
#![allow(clippy::missing_errors_doc)]

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json
};

use super::endpoints::detalle;
use crate::{
    models::{InputTypes::{FiltroUsuarios, NuevoUsuario, UsuarioParcial}, usuario::UserError, validacion::ErroresValidacion},
    services::appState::AppState
};

pub const MENSAJE_CORREO_DUPLICADO: &str = "Ya existe un usuario con este correo.";
pub const MENSAJE_NO_ENCONTRADO: &str = "No encontrado.";

fn respuestaError(err: UserError) -> Response {
    return match err {
        UserError::Validacion(errores) => (StatusCode::BAD_REQUEST, Json(errores)).into_response(),
        UserError::CorreoDuplicado(_) => {
            let mut errores = ErroresValidacion::default();
            errores.agregar("correo", MENSAJE_CORREO_DUPLICADO);
            (StatusCode::BAD_REQUEST, Json(errores)).into_response()
        },
        UserError::NoEncontrado(_) => detalle(StatusCode::NOT_FOUND, MENSAJE_NO_ENCONTRADO),
        UserError::DbError(err) => {
            tracing::error!(error = %err, "fallo del almacén de usuarios");
            detalle(StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor.")
        }
    };
}

//Malformed JSON or wrongly typed values never reach validation
fn rechazoJson(rechazo: JsonRejection) -> Response {
    return detalle(StatusCode::BAD_REQUEST, rechazo.body_text());
}

//Non numeric ids can't exist, so they are reported like any other missing id
fn idUsuario(id: Result<Path<i64>, PathRejection>) -> Result<i64, Response> {
    return match id {
        Ok(Path(id)) => Ok(id),
        Err(_) => Err(detalle(StatusCode::NOT_FOUND, MENSAJE_NO_ENCONTRADO))
    };
}

pub async fn listarUsuarios(State(appState): State<AppState>, Query(filtro): Query<FiltroUsuarios>) -> Response {
    return match appState.usuarios.listar(filtro).await {
        Ok(usuarios) => (StatusCode::OK, Json(usuarios)).into_response(),
        Err(err) => respuestaError(err)
    };
}

pub async fn crearUsuario(State(appState): State<AppState>, payload: Result<Json<NuevoUsuario>, JsonRejection>) -> Response {
    let nuevo = match payload {
        Ok(Json(nuevo)) => nuevo,
        Err(rechazo) => return rechazoJson(rechazo)
    };

    return match appState.usuarios.crear(nuevo).await {
        Ok(usuario) => (StatusCode::CREATED, Json(usuario)).into_response(),
        Err(err) => respuestaError(err)
    };
}

pub async fn obtenerUsuario(State(appState): State<AppState>, id: Result<Path<i64>, PathRejection>) -> Response {
    let id = match idUsuario(id) {
        Ok(id) => id,
        Err(res) => return res
    };

    return match appState.usuarios.obtener(id).await {
        Ok(usuario) => (StatusCode::OK, Json(usuario)).into_response(),
        Err(err) => respuestaError(err)
    };
}

pub async fn actualizarUsuario(State(appState): State<AppState>, id: Result<Path<i64>, PathRejection>, payload: Result<Json<UsuarioParcial>, JsonRejection>) -> Response {
    let id = match idUsuario(id) {
        Ok(id) => id,
        Err(res) => return res
    };
    let parcial = match payload {
        Ok(Json(parcial)) => parcial,
        Err(rechazo) => return rechazoJson(rechazo)
    };

    return match appState.usuarios.actualizar(id, parcial).await {
        Ok(usuario) => (StatusCode::OK, Json(usuario)).into_response(),
        Err(err) => respuestaError(err)
    };
}

pub async fn eliminarUsuario(State(appState): State<AppState>, id: Result<Path<i64>, PathRejection>) -> Response {
    let id = match idUsuario(id) {
        Ok(id) => id,
        Err(res) => return res
    };

    return match appState.usuarios.eliminar(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => respuestaError(err)
    };
}

pub async fn getGenerosPermitidos(State(appState): State<AppState>) -> impl IntoResponse {
    return Json(appState.usuarios.generosPermitidos().to_vec());
}
