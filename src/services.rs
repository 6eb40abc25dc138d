pub mod appState;
pub mod config;
pub mod db;
pub mod memoria;
pub mod repositorio;
pub mod usuarios;
