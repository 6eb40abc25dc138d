#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use std::{net::SocketAddr, str::FromStr};

use crate::models::usuario::Genero;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4433";
pub const DEFAULT_GENEROS: &str = "M,F";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoAlmacen {
    Postgres,
    Memoria
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub certPath: String,
    pub keyPath: String
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub almacen: TipoAlmacen,
    pub databaseUrl: Option<String>,
    pub bindAddr: SocketAddr,
    pub generosPermitidos: Vec<Genero>,
    pub tls: Option<TlsConfig>
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ALMACEN must be 'postgres' or 'memoria', got '{0}'")]
    AlmacenInvalido(String),

    #[error("DATABASE_URL is required when ALMACEN=postgres")]
    FaltaDatabaseUrl,

    #[error("BIND_ADDR '{0}' is not a valid socket address")]
    BindAddrInvalido(String),

    #[error("unknown gender code '{0}' in GENEROS_PERMITIDOS, known codes are {1}")]
    GeneroInvalido(String, String),

    #[error("GENEROS_PERMITIDOS must name at least one gender code")]
    SinGeneros,

    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    TlsIncompleto
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn fromEnv() -> Result<Config, ConfigError> {
        return Config::fromLookup(|key| std::env::var(key).ok());
    }

    pub fn fromLookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {
        //Empty values count as unset
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let almacen = match get("ALMACEN").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("postgres") => TipoAlmacen::Postgres,
            Some("memoria") => TipoAlmacen::Memoria,
            Some(otro) => return Err(ConfigError::AlmacenInvalido(otro.to_string()))
        };

        let databaseUrl = get("DATABASE_URL");
        if almacen == TipoAlmacen::Postgres && databaseUrl.is_none() {
            return Err(ConfigError::FaltaDatabaseUrl);
        }

        let bindAddr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bindAddr = SocketAddr::from_str(&bindAddr).map_err(|_| ConfigError::BindAddrInvalido(bindAddr.clone()))?;

        let generosPermitidos = parseGeneros(&get("GENEROS_PERMITIDOS").unwrap_or_else(|| DEFAULT_GENEROS.to_string()))?;

        let tls = match (get("TLS_CERT_PATH"), get("TLS_KEY_PATH")) {
            (Some(certPath), Some(keyPath)) => Some(TlsConfig { certPath, keyPath }),
            (None, None) => None,
            _ => return Err(ConfigError::TlsIncompleto)
        };

        return Ok(Config { almacen, databaseUrl, bindAddr, generosPermitidos, tls });
    }
}

fn parseGeneros(valor: &str) -> Result<Vec<Genero>, ConfigError> {
    let mut generos: Vec<Genero> = Vec::new();
    for codigo in valor.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let genero = Genero::from_str(codigo).map_err(|_| ConfigError::GeneroInvalido(codigo.to_string(), Genero::codigosConocidos()))?;
        if !generos.contains(&genero) {
            generos.push(genero);
        }
    }

    if generos.is_empty() {
        return Err(ConfigError::SinGeneros);
    }
    return Ok(generos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cargar(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        return Config::fromLookup(|key| vars.get(key).cloned());
    }

    #[test]
    fn defaults_with_database_url() {
        let config = cargar(&[("DATABASE_URL", "postgres://localhost/crud")]).unwrap();
        assert_eq!(config.almacen, TipoAlmacen::Postgres);
        assert_eq!(config.bindAddr, SocketAddr::from(([0, 0, 0, 0], 4433)));
        assert_eq!(config.generosPermitidos, vec![Genero::Masculino, Genero::Femenino]);
        assert_eq!(config.tls, None);
    }

    #[test]
    fn postgres_needs_database_url() {
        assert_eq!(cargar(&[]), Err(ConfigError::FaltaDatabaseUrl));
        assert_eq!(cargar(&[("DATABASE_URL", "  ")]), Err(ConfigError::FaltaDatabaseUrl));
    }

    #[test]
    fn memory_store_needs_nothing_else() {
        let config = cargar(&[("ALMACEN", "Memoria")]).unwrap();
        assert_eq!(config.almacen, TipoAlmacen::Memoria);
        assert_eq!(config.databaseUrl, None);
    }

    #[test]
    fn unknown_store() {
        assert_eq!(cargar(&[("ALMACEN", "redis")]), Err(ConfigError::AlmacenInvalido(String::from("redis"))));
    }

    #[test]
    fn gender_set_is_configurable() {
        let config = cargar(&[("ALMACEN", "memoria"), ("GENEROS_PERMITIDOS", "F, M ,O,F")]).unwrap();
        assert_eq!(config.generosPermitidos, vec![Genero::Femenino, Genero::Masculino, Genero::Otro]);

        let err = cargar(&[("ALMACEN", "memoria"), ("GENEROS_PERMITIDOS", "M,X")]).unwrap_err();
        assert_eq!(err, ConfigError::GeneroInvalido(String::from("X"), String::from("M,F,O")));
        assert_eq!(err.to_string(), "unknown gender code 'X' in GENEROS_PERMITIDOS, known codes are M,F,O");
        assert_eq!(cargar(&[("ALMACEN", "memoria"), ("GENEROS_PERMITIDOS", " , ")]), Err(ConfigError::SinGeneros));
    }

    #[test]
    fn bad_bind_addr() {
        assert_eq!(cargar(&[("ALMACEN", "memoria"), ("BIND_ADDR", "localhost")]), Err(ConfigError::BindAddrInvalido(String::from("localhost"))));
    }

    #[test]
    fn tls_paths_go_together() {
        assert_eq!(cargar(&[("ALMACEN", "memoria"), ("TLS_CERT_PATH", "cert.pem")]), Err(ConfigError::TlsIncompleto));

        let config = cargar(&[("ALMACEN", "memoria"), ("TLS_CERT_PATH", "cert.pem"), ("TLS_KEY_PATH", "key.pem")]).unwrap();
        assert_eq!(config.tls, Some(TlsConfig { certPath: String::from("cert.pem"), keyPath: String::from("key.pem") }));
    }
}
