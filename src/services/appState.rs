#![allow(non_snake_case, non_camel_case_types)]

use super::usuarios::ServicioUsuarios;

#[derive(Clone)]
pub struct AppState {
    pub usuarios: ServicioUsuarios
}
