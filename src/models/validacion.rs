#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

//! Field rules for `Usuario`.
//!
//! Every field owns an ordered list of named rules. Creation runs the rules of
//! every field and reports missing ones as required; a partial update only runs
//! the rules of the fields it supplies. Rules stop at the first failure per field.

use std::{collections::BTreeMap, fmt, str::FromStr};

use validator::ValidateEmail;

use super::{InputTypes::{NuevoUsuario, UsuarioParcial}, usuario::{CambiosUsuario, DatosUsuario, Genero}};

pub const MENSAJE_REQUERIDO: &str = "Este campo es obligatorio.";
pub const MENSAJE_NULO: &str = "Este campo no puede ser nulo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Valor<'a> {
    Texto(&'a str),
    Entero(i64)
}

impl<'a> Valor<'a> {
    fn texto(self) -> Option<String> {
        return match self {
            Valor::Texto(s) => Some(s.to_string()),
            Valor::Entero(_) => None
        };
    }

    fn genero(self) -> Option<Genero> {
        return match self {
            Valor::Texto(s) => Genero::from_str(s).ok(),
            Valor::Entero(_) => None
        };
    }

    fn edad(self) -> Option<i32> {
        return match self {
            Valor::Entero(n) => i32::try_from(n).ok(),
            Valor::Texto(_) => None
        };
    }
}

pub struct Regla {
    pub nombre: &'static str,
    cumple: fn(Valor<'_>, &ValidadorUsuario) -> bool,
    mensaje: fn(Valor<'_>) -> String
}

fn noVacio(valor: Valor<'_>, _: &ValidadorUsuario) -> bool {
    return matches!(valor, Valor::Texto(s) if !s.trim().is_empty());
}

fn correoValido(valor: Valor<'_>, _: &ValidadorUsuario) -> bool {
    return matches!(valor, Valor::Texto(s) if s.validate_email());
}

fn generoConocido(valor: Valor<'_>, _: &ValidadorUsuario) -> bool {
    return valor.genero().is_some();
}

fn generoPermitido(valor: Valor<'_>, validador: &ValidadorUsuario) -> bool {
    return valor.genero().map_or(false, |g| validador.generosPermitidos.contains(&g));
}

fn edadNoNegativa(valor: Valor<'_>, _: &ValidadorUsuario) -> bool {
    return matches!(valor, Valor::Entero(n) if n >= 0);
}

fn edadEnRango(valor: Valor<'_>, _: &ValidadorUsuario) -> bool {
    return valor.edad().is_some();
}

fn enBlanco(_: Valor<'_>) -> String {
    return String::from("Este campo no puede estar en blanco.");
}

fn correoInvalido(_: Valor<'_>) -> String {
    return String::from("Introduzca una dirección de correo electrónico válida.");
}

fn edadNegativa(_: Valor<'_>) -> String {
    return String::from("Asegúrese de que este valor es mayor o igual a 0.");
}

fn edadFueraDeRango(_: Valor<'_>) -> String {
    return format!("Asegúrese de que este valor es menor o igual a {}.", i32::MAX);
}

fn eleccionInvalida(valor: Valor<'_>) -> String {
    return match valor {
        Valor::Texto(s) => format!("\"{}\" no es una elección válida.", s),
        Valor::Entero(n) => format!("\"{}\" no es una elección válida.", n)
    };
}

pub const NO_VACIO: Regla = Regla {
    nombre: "no_vacio",
    cumple: noVacio,
    mensaje: enBlanco
};

pub const CORREO_VALIDO: Regla = Regla {
    nombre: "correo_valido",
    cumple: correoValido,
    mensaje: correoInvalido
};

pub const GENERO_CONOCIDO: Regla = Regla {
    nombre: "genero_conocido",
    cumple: generoConocido,
    mensaje: eleccionInvalida
};

pub const GENERO_PERMITIDO: Regla = Regla {
    nombre: "genero_permitido",
    cumple: generoPermitido,
    mensaje: eleccionInvalida
};

pub const EDAD_NO_NEGATIVA: Regla = Regla {
    nombre: "edad_no_negativa",
    cumple: edadNoNegativa,
    mensaje: edadNegativa
};

pub const EDAD_EN_RANGO: Regla = Regla {
    nombre: "edad_en_rango",
    cumple: edadEnRango,
    mensaje: edadFueraDeRango
};

pub struct Campo {
    pub nombre: &'static str,
    pub reglas: &'static [Regla]
}

impl Campo {
    pub fn revisar(&self, valor: Valor<'_>, validador: &ValidadorUsuario) -> Result<(), String> {
        for regla in self.reglas {
            if !(regla.cumple)(valor, validador) {
                tracing::trace!(campo = self.nombre, regla = regla.nombre, "regla incumplida");
                return Err((regla.mensaje)(valor));
            }
        }
        return Ok(());
    }
}

pub const NOMBRE: Campo = Campo { nombre: "nombre", reglas: &[NO_VACIO] };
pub const DIRECCION: Campo = Campo { nombre: "direccion", reglas: &[NO_VACIO] };
pub const TELEFONO: Campo = Campo { nombre: "telefono", reglas: &[NO_VACIO] };
pub const CORREO_CAMPO: Campo = Campo { nombre: "correo", reglas: &[NO_VACIO, CORREO_VALIDO] };
pub const GENERO: Campo = Campo { nombre: "genero", reglas: &[GENERO_CONOCIDO, GENERO_PERMITIDO] };
pub const EDAD: Campo = Campo { nombre: "edad", reglas: &[EDAD_NO_NEGATIVA, EDAD_EN_RANGO] };

/// Field name -> messages, in field name order.
#[derive(serde::Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ErroresValidacion {
    campos: BTreeMap<&'static str, Vec<String>>
}

impl ErroresValidacion {
    pub fn agregar(&mut self, campo: &'static str, mensaje: impl Into<String>) {
        self.campos.entry(campo).or_default().push(mensaje.into());
    }

    pub fn estaVacio(&self) -> bool {
        return self.campos.is_empty();
    }

    pub fn contiene(&self, campo: &str) -> bool {
        return self.campos.contains_key(campo);
    }

    pub fn mensajes(&self, campo: &str) -> Option<&[String]> {
        return self.campos.get(campo).map(|m| m.as_slice());
    }

    pub fn campos(&self) -> impl Iterator<Item = &'static str> + '_ {
        return self.campos.keys().copied();
    }
}

impl fmt::Display for ErroresValidacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut primero = true;
        for (campo, mensajes) in &self.campos {
            if !primero { f.write_str("; ")?; }
            primero = false;
            write!(f, "{}: {}", campo, mensajes.join(" "))?;
        }
        return Ok(());
    }
}

impl std::error::Error for ErroresValidacion {}

//Outer None: key omitted. Inner None: explicit null.
fn texto(campo: &Option<Option<String>>) -> Option<Option<Valor<'_>>> {
    return campo.as_ref().map(|v| v.as_deref().map(|s| Valor::Texto(s.trim())));
}

fn entero(campo: Option<Option<i64>>) -> Option<Option<Valor<'static>>> {
    return campo.map(|v| v.map(Valor::Entero));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidadorUsuario {
    generosPermitidos: Vec<Genero>
}

impl Default for ValidadorUsuario {
    fn default() -> Self {
        return ValidadorUsuario::new(vec![Genero::Masculino, Genero::Femenino]);
    }
}

impl ValidadorUsuario {
    pub fn new(generosPermitidos: Vec<Genero>) -> ValidadorUsuario {
        return ValidadorUsuario { generosPermitidos };
    }

    pub fn generosPermitidos(&self) -> &[Genero] {
        return &self.generosPermitidos;
    }

    //Returns the value back only when it was supplied and passed every rule.
    fn comprobar<'a>(&self, campo: &Campo, valor: Option<Option<Valor<'a>>>, requerido: bool, errores: &mut ErroresValidacion) -> Option<Valor<'a>> {
        let valor = match valor {
            Some(Some(v)) => v,
            Some(None) => {
                errores.agregar(campo.nombre, MENSAJE_NULO);
                return None;
            },
            None => {
                if requerido {
                    errores.agregar(campo.nombre, MENSAJE_REQUERIDO);
                }
                return None;
            }
        };

        if let Err(mensaje) = campo.revisar(valor, self) {
            errores.agregar(campo.nombre, mensaje);
            return None;
        }
        return Some(valor);
    }

    pub fn validarNuevo(&self, nuevo: &NuevoUsuario) -> Result<DatosUsuario, ErroresValidacion> {
        let mut errores = ErroresValidacion::default();

        let nombre = self.comprobar(&NOMBRE, texto(&nuevo.nombre), true, &mut errores).and_then(Valor::texto);
        let direccion = self.comprobar(&DIRECCION, texto(&nuevo.direccion), true, &mut errores).and_then(Valor::texto);
        let telefono = self.comprobar(&TELEFONO, texto(&nuevo.telefono), true, &mut errores).and_then(Valor::texto);
        let correo = self.comprobar(&CORREO_CAMPO, texto(&nuevo.correo), true, &mut errores).and_then(Valor::texto);
        let genero = self.comprobar(&GENERO, texto(&nuevo.genero), true, &mut errores).and_then(Valor::genero);
        let edad = self.comprobar(&EDAD, entero(nuevo.edad), true, &mut errores).and_then(Valor::edad);

        return match (nombre, direccion, telefono, correo, genero, edad) {
            (Some(nombre), Some(direccion), Some(telefono), Some(correo), Some(genero), Some(edad)) if errores.estaVacio() => {
                Ok(DatosUsuario { nombre, direccion, telefono, correo, genero, edad })
            },
            _ => Err(errores)
        };
    }

    pub fn validarCambios(&self, parcial: &UsuarioParcial) -> Result<CambiosUsuario, ErroresValidacion> {
        let mut errores = ErroresValidacion::default();

        let cambios = CambiosUsuario {
            nombre: self.comprobar(&NOMBRE, texto(&parcial.nombre), false, &mut errores).and_then(Valor::texto),
            direccion: self.comprobar(&DIRECCION, texto(&parcial.direccion), false, &mut errores).and_then(Valor::texto),
            telefono: self.comprobar(&TELEFONO, texto(&parcial.telefono), false, &mut errores).and_then(Valor::texto),
            correo: self.comprobar(&CORREO_CAMPO, texto(&parcial.correo), false, &mut errores).and_then(Valor::texto),
            genero: self.comprobar(&GENERO, texto(&parcial.genero), false, &mut errores).and_then(Valor::genero),
            edad: self.comprobar(&EDAD, entero(parcial.edad), false, &mut errores).and_then(Valor::edad)
        };

        if !errores.estaVacio() {
            return Err(errores);
        }
        return Ok(cambios);
    }
}
