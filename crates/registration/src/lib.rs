pub mod backup;
mod cipher;
mod command;
mod query;
mod validate;

pub use cipher::*;
pub use command::*;
pub use query::*;
pub use validate::*;
