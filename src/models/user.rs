use serde::{ Deserialize, Serialize };
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

use crate::db::query::Record;

/// A user account row as stored in the `users` table.
///
/// Every field is required; the row returned by the database is the canonical
/// value after a save, since the database may apply its own transformations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub phone_number: String,
    pub country: String,
    pub lang: String,
    pub hashed_password: String,
}

impl Record for User {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "username",
        "display_name",
        "email",
        "phone_number",
        "country",
        "lang",
        "hashed_password",
    ];

    fn add_field(&self, name: &str, args: &mut PgArguments) -> bool {
        match name {
            "id" => args.add(self.id),
            "username" => args.add(self.username.clone()),
            "display_name" => args.add(self.display_name.clone()),
            "email" => args.add(self.email.clone()),
            "phone_number" => args.add(self.phone_number.clone()),
            "country" => args.add(self.country.clone()),
            "lang" => args.add(self.lang.clone()),
            "hashed_password" => args.add(self.hashed_password.clone()),
            _ => {
                return false;
            }
        }
        true
    }
}
