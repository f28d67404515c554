mod error;
mod inscription;

pub use error::*;
pub use inscription::*;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}
