#![allow(non_snake_case)]

pub mod models;
pub mod routes;
pub mod services;
