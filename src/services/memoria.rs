#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repositorio::RepositorioUsuarios;
use crate::models::usuario::{CambiosUsuario, DatosUsuario, UserError, Usuario};

#[derive(Default)]
struct Tabla {
    ultimoId: i64,
    usuarios: BTreeMap<i64, Usuario>
}

impl Tabla {
    //Unique "index" on correo. `excepto` skips the record being updated.
    fn correoOcupado(&self, correo: &str, excepto: Option<i64>) -> bool {
        return self.usuarios.values().any(|u| u.correo == correo && Some(u.id) != excepto);
    }
}

/// In-process store. Every write happens under the write lock, so checks and
/// mutations are atomic with respect to each other.
#[derive(Default)]
pub struct RepositorioMemoria {
    tabla: RwLock<Tabla>
}

impl RepositorioMemoria {
    pub fn new() -> RepositorioMemoria {
        return RepositorioMemoria::default();
    }
}

#[async_trait]
impl RepositorioUsuarios for RepositorioMemoria {
    async fn crear(&self, datos: &DatosUsuario) -> Result<Usuario, UserError> {
        let mut tabla = self.tabla.write().await;

        if tabla.correoOcupado(&datos.correo, None) {
            return Err(UserError::CorreoDuplicado(datos.correo.clone()));
        }

        tabla.ultimoId += 1;
        let usuario = datos.clone().conId(tabla.ultimoId);
        tabla.usuarios.insert(usuario.id, usuario.clone());
        return Ok(usuario);
    }

    async fn obtener(&self, id: i64) -> Result<Usuario, UserError> {
        let tabla = self.tabla.read().await;
        return tabla.usuarios.get(&id).cloned().ok_or(UserError::NoEncontrado(id));
    }

    async fn listar(&self) -> Result<Vec<Usuario>, UserError> {
        let tabla = self.tabla.read().await;
        return Ok(tabla.usuarios.values().cloned().collect());
    }

    async fn buscarPorCorreo(&self, correo: &str) -> Result<Option<Usuario>, UserError> {
        let tabla = self.tabla.read().await;
        return Ok(tabla.usuarios.values().find(|u| u.correo == correo).cloned());
    }

    async fn actualizar(&self, id: i64, cambios: &CambiosUsuario) -> Result<Usuario, UserError> {
        let mut tabla = self.tabla.write().await;

        if !tabla.usuarios.contains_key(&id) {
            return Err(UserError::NoEncontrado(id));
        }
        if let Some(correo) = &cambios.correo {
            if tabla.correoOcupado(correo, Some(id)) {
                return Err(UserError::CorreoDuplicado(correo.clone()));
            }
        }

        let usuario = tabla.usuarios.get_mut(&id).ok_or(UserError::NoEncontrado(id))?;
        cambios.aplicar(usuario);
        return Ok(usuario.clone());
    }

    async fn eliminar(&self, id: i64) -> Result<(), UserError> {
        let mut tabla = self.tabla.write().await;
        return match tabla.usuarios.remove(&id) {
            Some(_) => Ok(()),
            None => Err(UserError::NoEncontrado(id))
        };
    }

    async fn contar(&self) -> Result<i64, UserError> {
        let tabla = self.tabla.read().await;
        return Ok(tabla.usuarios.len() as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::models::usuario::Genero;

    fn datos(correo: &str) -> DatosUsuario {
        return DatosUsuario {
            nombre: String::from("Usuario Uno"),
            direccion: String::from("Dirección 1"),
            telefono: String::from("111222333"),
            correo: String::from(correo),
            genero: Genero::Masculino,
            edad: 30
        };
    }

    #[tokio::test]
    async fn ids_are_assigned_and_never_reused() {
        let repo = RepositorioMemoria::new();
        let uno = repo.crear(&datos("uno@test.com")).await.unwrap();
        let dos = repo.crear(&datos("dos@test.com")).await.unwrap();
        assert_ne!(uno.id, dos.id);

        repo.eliminar(dos.id).await.unwrap();
        let tres = repo.crear(&datos("tres@test.com")).await.unwrap();
        assert!(tres.id > dos.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_write() {
        let repo = RepositorioMemoria::new();
        repo.crear(&datos("duplicado@test.com")).await.unwrap();

        let res = repo.crear(&datos("duplicado@test.com")).await;
        assert!(matches!(res, Err(UserError::CorreoDuplicado(ref c)) if c == "duplicado@test.com"));
        assert_eq!(repo.contar().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_duplicates_only_one_wins() {
        let repo = Arc::new(RepositorioMemoria::new());

        let tareas: Vec<_> = (0..8).map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.crear(&datos("carrera@test.com")).await })
        }).collect();

        let mut exitos = 0;
        for tarea in tareas {
            if tarea.await.unwrap().is_ok() {
                exitos += 1;
            }
        }
        assert_eq!(exitos, 1);
        assert_eq!(repo.contar().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_to_taken_email_leaves_record_alone() {
        let repo = RepositorioMemoria::new();
        repo.crear(&datos("uno@test.com")).await.unwrap();
        let dos = repo.crear(&datos("dos@test.com")).await.unwrap();

        let cambios = CambiosUsuario {
            nombre: Some(String::from("Otro")),
            correo: Some(String::from("uno@test.com")),
            ..Default::default()
        };
        assert!(matches!(repo.actualizar(dos.id, &cambios).await, Err(UserError::CorreoDuplicado(_))));
        assert_eq!(repo.obtener(dos.id).await.unwrap(), dos);
    }

    #[tokio::test]
    async fn keeping_own_email_is_not_a_duplicate() {
        let repo = RepositorioMemoria::new();
        let uno = repo.crear(&datos("uno@test.com")).await.unwrap();

        let cambios = CambiosUsuario { correo: Some(String::from("uno@test.com")), ..Default::default() };
        assert_eq!(repo.actualizar(uno.id, &cambios).await.unwrap(), uno);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let repo = RepositorioMemoria::new();
        let uno = repo.crear(&datos("uno@test.com")).await.unwrap();

        repo.eliminar(uno.id).await.unwrap();
        assert!(matches!(repo.eliminar(uno.id).await, Err(UserError::NoEncontrado(id)) if id == uno.id));
        assert!(matches!(repo.obtener(uno.id).await, Err(UserError::NoEncontrado(_))));
    }

    #[tokio::test]
    async fn lookup_by_email() {
        let repo = RepositorioMemoria::new();
        let uno = repo.crear(&datos("uno@test.com")).await.unwrap();
        assert_eq!(repo.buscarPorCorreo("uno@test.com").await.unwrap(), Some(uno));
        assert_eq!(repo.buscarPorCorreo("nadie@test.com").await.unwrap(), None);
    }
}
