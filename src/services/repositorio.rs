#![allow(non_snake_case)]

use async_trait::async_trait;

use crate::models::usuario::{CambiosUsuario, DatosUsuario, UserError, Usuario};

/// Storage port for `Usuario` records.
///
/// Implementations enforce email uniqueness themselves, atomically with the
/// write, and must leave the store untouched whenever they return an error.
#[async_trait]
pub trait RepositorioUsuarios: Send + Sync {
    /// Inserts a validated record and returns it with its new id.
    async fn crear(&self, datos: &DatosUsuario) -> Result<Usuario, UserError>;

    async fn obtener(&self, id: i64) -> Result<Usuario, UserError>;

    /// Every stored record, ordered by id.
    async fn listar(&self) -> Result<Vec<Usuario>, UserError>;

    async fn buscarPorCorreo(&self, correo: &str) -> Result<Option<Usuario>, UserError>;

    /// Merges the supplied fields into the stored record in a single step.
    async fn actualizar(&self, id: i64, cambios: &CambiosUsuario) -> Result<Usuario, UserError>;

    async fn eliminar(&self, id: i64) -> Result<(), UserError>;

    async fn contar(&self) -> Result<i64, UserError>;
}
