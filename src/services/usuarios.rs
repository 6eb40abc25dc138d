#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use std::sync::Arc;

use super::repositorio::RepositorioUsuarios;
use crate::models::{
    InputTypes::{FiltroUsuarios, NuevoUsuario, UsuarioParcial},
    usuario::{Genero, UserError, Usuario},
    validacion::ValidadorUsuario
};

/// Entity store for `Usuario`: validates, then delegates to the injected repository.
/// Nothing reaches the repository unless it passed validation.
#[derive(Clone)]
pub struct ServicioUsuarios {
    repositorio: Arc<dyn RepositorioUsuarios>,
    validador: Arc<ValidadorUsuario>
}

impl ServicioUsuarios {
    pub fn new(repositorio: Arc<dyn RepositorioUsuarios>, validador: ValidadorUsuario) -> ServicioUsuarios {
        return ServicioUsuarios { repositorio, validador: Arc::new(validador) };
    }

    pub fn generosPermitidos(&self) -> &[Genero] {
        return self.validador.generosPermitidos();
    }

    #[tracing::instrument(skip_all)]
    pub async fn crear(&self, nuevo: NuevoUsuario) -> Result<Usuario, UserError> {
        let datos = self.validador.validarNuevo(&nuevo).map_err(|errores| {
            tracing::debug!(%errores, "alta rechazada");
            errores
        })?;

        let usuario = self.repositorio.crear(&datos).await?;
        tracing::info!(id = usuario.id, "usuario creado");
        return Ok(usuario);
    }

    #[tracing::instrument(skip(self))]
    pub async fn obtener(&self, id: i64) -> Result<Usuario, UserError> {
        return self.repositorio.obtener(id).await;
    }

    #[tracing::instrument(skip(self))]
    pub async fn listar(&self, filtro: FiltroUsuarios) -> Result<Vec<Usuario>, UserError> {
        return match filtro.correo {
            Some(correo) => Ok(self.repositorio.buscarPorCorreo(correo.trim()).await?.into_iter().collect()),
            None => self.repositorio.listar().await
        };
    }

    /// PATCH semantics: only supplied fields are validated and written; any invalid one aborts the whole update.
    #[tracing::instrument(skip(self, parcial))]
    pub async fn actualizar(&self, id: i64, parcial: UsuarioParcial) -> Result<Usuario, UserError> {
        let actual = self.repositorio.obtener(id).await?;

        let cambios = self.validador.validarCambios(&parcial).map_err(|errores| {
            tracing::debug!(%errores, "actualización rechazada");
            errores
        })?;

        if cambios.estaVacio() {
            return Ok(actual);
        }

        let usuario = self.repositorio.actualizar(id, &cambios).await?;
        tracing::info!(id, "usuario actualizado");
        return Ok(usuario);
    }

    #[tracing::instrument(skip(self))]
    pub async fn eliminar(&self, id: i64) -> Result<(), UserError> {
        self.repositorio.eliminar(id).await?;
        tracing::info!(id, "usuario eliminado");
        return Ok(());
    }

    pub async fn contar(&self) -> Result<i64, UserError> {
        return self.repositorio.contar().await;
    }
}
