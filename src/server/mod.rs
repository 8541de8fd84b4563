//! HTTP decision service
//!
//! Exposes the authorization engine to collaborating services over actix-web.

pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;


pub use server::HttpServer;
pub use state::AppState;
