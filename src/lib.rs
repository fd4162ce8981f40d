#[macro_use]
extern crate diesel;

pub mod actions;
pub mod db;
pub mod display;
pub mod error;
pub mod mode;
pub mod models;
pub mod routes;
#[rustfmt::skip]
pub mod schema;
pub mod setup;
