use sqlx::postgres::PgArguments;
use userstore::{ Record, User };

fn sample_user() -> User {
    User {
        id: 42,
        username: "bob".to_string(),
        display_name: "Bob".to_string(),
        email: "b@x.com".to_string(),
        phone_number: "555-0100".to_string(),
        country: "DE".to_string(),
        lang: "de".to_string(),
        hashed_password: "argon2id$...".to_string(),
    }
}

// FIELDS is the single source of truth for column names and their order
#[test]
fn test_field_descriptor_order() {
    assert_eq!(User::FIELDS, [
        "id",
        "username",
        "display_name",
        "email",
        "phone_number",
        "country",
        "lang",
        "hashed_password",
    ]);
}

// The descriptor and the struct's serialized shape must agree on names
#[test]
fn test_field_descriptor_matches_serde_fields() {
    let value = serde_json::to_value(sample_user()).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), User::FIELDS.len());
    for field in User::FIELDS {
        assert!(object.contains_key(*field), "serde output missing field {}", field);
    }
}

#[test]
fn test_add_field_accepts_every_declared_field() {
    let user = sample_user();
    for field in User::FIELDS {
        let mut args = PgArguments::default();
        assert!(user.add_field(field, &mut args), "add_field rejected {}", field);
    }
}

#[test]
fn test_add_field_rejects_unknown_name() {
    let mut args = PgArguments::default();
    assert!(!sample_user().add_field("password", &mut args));
}

#[test]
fn test_user_round_trips_through_json() {
    let user = sample_user();
    let json = serde_json::to_string(&user).unwrap();
    let back: User = serde_json::from_str(&json).unwrap();
    assert_eq!(back, user);
}
