//! Route modules. Each defines an Axum router for one API surface area;
//! the routers are assembled in `app.rs`.

pub mod auth;
pub mod testing;
pub mod user;
