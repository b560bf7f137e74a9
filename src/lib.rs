pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod notice;
pub mod schema;
pub mod validate;
pub mod visibility;
