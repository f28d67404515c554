pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use routes::AppState;
