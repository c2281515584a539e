pub mod connection;
pub mod error;
pub mod query;
pub mod repositories;

pub use connection::*;
pub use error::*;
pub use query::*;
pub use repositories::*;
