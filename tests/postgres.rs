#![allow(non_snake_case)]

//! Store contract against a real PostgreSQL.
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use crudUsuarioWebapi::models::usuario::{CambiosUsuario, DatosUsuario, Genero, UserError};
use crudUsuarioWebapi::services::{db::dbState, repositorio::RepositorioUsuarios};

async fn conectar() -> dbState {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point to a test database");
    let state = dbState::connect(&url).await.unwrap();
    state.migrateDb().await.unwrap();
    return state;
}

//Unique per run so tests can share a database
fn correoUnico(prefijo: &str) -> String {
    let nanos = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_nanos();
    return format!("{}-{}@test.com", prefijo, nanos);
}

fn datos(correo: &str) -> DatosUsuario {
    return DatosUsuario {
        nombre: String::from("Usuario Postgres"),
        direccion: String::from("Calle Test 123"),
        telefono: String::from("123456789"),
        correo: correo.to_string(),
        genero: Genero::Femenino,
        edad: 30
    };
}

#[tokio::test]
#[ignore]
async fn crud_roundtrip() {
    let repo = conectar().await;
    let correo = correoUnico("crud");

    let creado = repo.crear(&datos(&correo)).await.unwrap();
    assert_eq!(repo.obtener(creado.id).await.unwrap(), creado);
    assert_eq!(repo.buscarPorCorreo(&correo).await.unwrap(), Some(creado.clone()));

    let cambios = CambiosUsuario { nombre: Some(String::from("Usuario Actualizado")), genero: Some(Genero::Masculino), ..Default::default() };
    let actualizado = repo.actualizar(creado.id, &cambios).await.unwrap();
    assert_eq!(actualizado.nombre, "Usuario Actualizado");
    assert_eq!(actualizado.genero, Genero::Masculino);
    assert_eq!(actualizado.direccion, creado.direccion);
    assert_eq!(actualizado.edad, creado.edad);

    repo.eliminar(creado.id).await.unwrap();
    assert!(matches!(repo.obtener(creado.id).await, Err(UserError::NoEncontrado(_))));
    assert!(matches!(repo.eliminar(creado.id).await, Err(UserError::NoEncontrado(_))));
}

#[tokio::test]
#[ignore]
async fn unique_index_rejects_duplicates() {
    let repo = conectar().await;
    let correo = correoUnico("duplicado");

    let primero = repo.crear(&datos(&correo)).await.unwrap();

    assert!(matches!(repo.crear(&datos(&correo)).await, Err(UserError::CorreoDuplicado(ref c)) if *c == correo));
    assert_eq!(repo.buscarPorCorreo(&correo).await.unwrap(), Some(primero.clone()));

    let otro = repo.crear(&datos(&correoUnico("otro"))).await.unwrap();
    let cambios = CambiosUsuario { correo: Some(correo.clone()), ..Default::default() };
    assert!(matches!(repo.actualizar(otro.id, &cambios).await, Err(UserError::CorreoDuplicado(_))));
    assert_eq!(repo.obtener(otro.id).await.unwrap(), otro);

    repo.eliminar(primero.id).await.unwrap();
    repo.eliminar(otro.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn update_missing_id() {
    let repo = conectar().await;
    let cambios = CambiosUsuario { nombre: Some(String::from("Nadie")), ..Default::default() };
    assert!(matches!(repo.actualizar(i64::MAX, &cambios).await, Err(UserError::NoEncontrado(_))));
}
