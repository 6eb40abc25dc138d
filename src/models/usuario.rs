#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use std::fmt;

use strum::IntoEnumIterator;

use super::validacion::ErroresValidacion;

/// Gender codes known to the system. Which of them are accepted on input is
/// decided by `ValidadorUsuario`, not by this enum.
#[derive(sqlx::Type, serde::Serialize, serde::Deserialize, strum::EnumString, strum::EnumIter, strum::AsRefStr, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[sqlx(type_name = "genero")]
pub enum Genero {
    #[sqlx(rename = "M")]
    #[serde(rename = "M")]
    #[strum(serialize = "M")]
    Masculino,

    #[sqlx(rename = "F")]
    #[serde(rename = "F")]
    #[strum(serialize = "F")]
    Femenino,

    #[sqlx(rename = "O")]
    #[serde(rename = "O")]
    #[strum(serialize = "O")]
    Otro
}

impl fmt::Display for Genero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(self.as_ref());
    }
}

impl Genero {
    /// Every known code, comma separated, in declaration order.
    pub fn codigosConocidos() -> String {
        return Genero::iter().map(|g| g.as_ref().to_owned()).collect::<Vec<_>>().join(",");
    }
}

#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    pub correo: String,
    pub genero: Genero,
    pub edad: i32
}

//A user is shown by its name, everywhere.
impl fmt::Display for Usuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.nombre);
    }
}

/// A complete, already validated set of fields ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatosUsuario {
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    pub correo: String,
    pub genero: Genero,
    pub edad: i32
}

impl DatosUsuario {
    pub fn conId(self, id: i64) -> Usuario {
        return Usuario {
            id,
            nombre: self.nombre,
            direccion: self.direccion,
            telefono: self.telefono,
            correo: self.correo,
            genero: self.genero,
            edad: self.edad
        };
    }
}

/// Validated subset of fields for a partial update. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CambiosUsuario {
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub genero: Option<Genero>,
    pub edad: Option<i32>
}

impl CambiosUsuario {
    pub fn estaVacio(&self) -> bool {
        return *self == CambiosUsuario::default();
    }

    pub fn aplicar(&self, usuario: &mut Usuario) {
        if let Some(nombre) = &self.nombre { usuario.nombre = nombre.clone(); }
        if let Some(direccion) = &self.direccion { usuario.direccion = direccion.clone(); }
        if let Some(telefono) = &self.telefono { usuario.telefono = telefono.clone(); }
        if let Some(correo) = &self.correo { usuario.correo = correo.clone(); }
        if let Some(genero) = self.genero { usuario.genero = genero; }
        if let Some(edad) = self.edad { usuario.edad = edad; }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UserError {
    #[error("datos de usuario inválidos: {0}")]
    Validacion(ErroresValidacion),

    #[error("ya existe un usuario con el correo {0}")]
    CorreoDuplicado(String),

    #[error("no existe un usuario con id {0}")]
    NoEncontrado(i64),

    #[error(transparent)]
    DbError(#[from] sqlx::Error)
}

impl From<ErroresValidacion> for UserError {
    fn from(errores: ErroresValidacion) -> Self {
        return UserError::Validacion(errores);
    }
}
