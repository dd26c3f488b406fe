#[macro_use]
extern crate rocket;

pub mod app;
pub mod args;
pub mod error;
pub mod inference;
pub mod logging;
pub mod models;
pub mod routes;
pub mod state;
