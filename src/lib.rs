// Re-export core modules
pub mod db;
pub mod models;

// Re-export common types
pub use db::{ with_database, Database, DbConfig, ExecuteResult };
pub use db::{ StoreError, StoreResult, StructuredError };
pub use db::{ prepare, prepare_with_record, ComposedQuery, Record };
pub use db::repositories::{ Repository, UserRepository };
pub use models::User;
