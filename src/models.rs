pub mod usuario;
pub mod validacion;
pub mod InputTypes;
