#![allow(non_snake_case, non_camel_case_types)]
#![allow(clippy::needless_return)]

use async_trait::async_trait;

use super::repositorio::RepositorioUsuarios;
use crate::models::usuario::{CambiosUsuario, DatosUsuario, UserError, Usuario};

//SQLSTATE for unique_violation. The only unique index besides the PK is usuario_correo_key.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct dbState {
    pub dbPool: sqlx::PgPool
}

impl dbState {
    pub async fn connect(databaseUrl: &str) -> sqlx::Result<dbState> {
        let dbPool = sqlx::PgPool::connect(databaseUrl).await?;
        return Ok(dbState { dbPool });
    }

    pub async fn migrateDb(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.dbPool).await?;
        return Ok(());
    }
}

fn traducirError(err: sqlx::Error, correo: Option<&str>) -> UserError {
    if let sqlx::Error::Database(dbErr) = &err {
        if dbErr.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return UserError::CorreoDuplicado(correo.unwrap_or_default().to_string());
        }
    }
    return UserError::DbError(err);
}

#[async_trait]
impl RepositorioUsuarios for dbState {
    async fn crear(&self, datos: &DatosUsuario) -> Result<Usuario, UserError> {
        let usuario = sqlx::query_as::<_, Usuario>("INSERT INTO usuario(nombre, direccion, telefono, correo, genero, edad) VALUES($1, $2, $3, $4, $5, $6) RETURNING *")
            .bind(&datos.nombre)
            .bind(&datos.direccion)
            .bind(&datos.telefono)
            .bind(&datos.correo)
            .bind(datos.genero)
            .bind(datos.edad)
            .fetch_one(&self.dbPool)
            .await
            .map_err(|err| traducirError(err, Some(&datos.correo)))?;

        return Ok(usuario);
    }

    async fn obtener(&self, id: i64) -> Result<Usuario, UserError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuario WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.dbPool)
            .await?;

        return usuario.ok_or(UserError::NoEncontrado(id));
    }

    async fn listar(&self) -> Result<Vec<Usuario>, UserError> {
        let usuarios = sqlx::query_as::<_, Usuario>("SELECT * FROM usuario ORDER BY id")
            .fetch_all(&self.dbPool)
            .await?;

        return Ok(usuarios);
    }

    async fn buscarPorCorreo(&self, correo: &str) -> Result<Option<Usuario>, UserError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuario WHERE correo = $1")
            .bind(correo)
            .fetch_optional(&self.dbPool)
            .await?;

        return Ok(usuario);
    }

    //One statement, so the merge is atomic. NULL parameters keep the stored column.
    async fn actualizar(&self, id: i64, cambios: &CambiosUsuario) -> Result<Usuario, UserError> {
        let usuario = sqlx::query_as::<_, Usuario>("UPDATE usuario SET nombre = COALESCE($1, nombre), direccion = COALESCE($2, direccion), telefono = COALESCE($3, telefono), correo = COALESCE($4, correo), genero = COALESCE($5, genero), edad = COALESCE($6, edad) WHERE id = $7 RETURNING *")
            .bind(&cambios.nombre)
            .bind(&cambios.direccion)
            .bind(&cambios.telefono)
            .bind(&cambios.correo)
            .bind(cambios.genero)
            .bind(cambios.edad)
            .bind(id)
            .fetch_optional(&self.dbPool)
            .await
            .map_err(|err| traducirError(err, cambios.correo.as_deref()))?;

        return usuario.ok_or(UserError::NoEncontrado(id));
    }

    async fn eliminar(&self, id: i64) -> Result<(), UserError> {
        let res = sqlx::query("DELETE FROM usuario WHERE id = $1")
            .bind(id)
            .execute(&self.dbPool)
            .await?;

        return match res.rows_affected() {
            0 => Err(UserError::NoEncontrado(id)),
            _ => Ok(())
        };
    }

    async fn contar(&self) -> Result<i64, UserError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM usuario")
            .fetch_one(&self.dbPool)
            .await?;

        return Ok(total);
    }
}
