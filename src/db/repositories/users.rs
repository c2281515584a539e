use std::collections::HashMap;

use sqlx::FromRow;

use crate::db::connection::{ with_database, DbConfig, ExecuteResult };
use crate::db::error::{ StoreError, StoreResult, StructuredError };
use crate::db::query::{ prepare_with_record, Record };
use crate::db::repositories::Repository;
use crate::models::user::User;

/// Repository for user rows in the `users` table.
pub struct UserRepository {
    config: DbConfig,
}

impl UserRepository {
    /// Create a new repository instance targeting the given database.
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    /// Insert a user and return the row the database persisted.
    ///
    /// The returned record is canonical over the input: the database may have
    /// applied defaults or transformations. Each call opens one connection,
    /// runs one implicit transaction and closes the connection again.
    pub async fn save(&self, user: &User) -> StoreResult<User> {
        let query = prepare_with_record(&insert_sql(), user)?;

        with_database(self.config.clone(), |db| {
            Box::pin(async move {
                match db.execute(query).await? {
                    ExecuteResult::Rows(rows) =>
                        match rows.into_iter().next() {
                            Some(row) =>
                                User::from_row(&row).map_err(|e|
                                    StoreError::Decode(e.to_string())
                                ),
                            None => Err(insert_returned_no_row()),
                        }
                    // INSERT ... RETURNING must yield a row; reaching this arm
                    // means the statement behaved like a plain mutation.
                    ExecuteResult::Affected(_) => Err(insert_returned_no_row()),
                }
            })
        }).await
    }
}

impl Repository for UserRepository {
    fn config(&self) -> &DbConfig {
        &self.config
    }
}

/// Build the insert template from the record's field descriptor. Column list,
/// placeholder list and RETURNING list all come from the same ordered source.
fn insert_sql() -> String {
    let columns = User::FIELDS.join(", ");
    let placeholders = User::FIELDS.iter()
        .map(|f| format!("{{{}}}", f))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO users ({}) VALUES ({}) RETURNING {}",
        columns,
        placeholders,
        columns
    )
}

fn insert_returned_no_row() -> StoreError {
    let mut details = HashMap::new();
    details.insert("table".to_string(), serde_json::Value::String("users".to_string()));

    StoreError::InvariantViolation(StructuredError {
        message: "INSERT ... RETURNING produced no row".to_string(),
        code: 0,
        domain: "users".to_string(),
        reason: "insert_returned_no_row".to_string(),
        details,
    })
}
