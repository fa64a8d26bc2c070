//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "507f1f77bcf86cd799439011";

#[fixture]
fn created_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

#[fixture]
fn user(created_at: DateTime<Utc>) -> User {
    User::new(
        UserId::new(VALID_ID).expect("valid id"),
        Username::new("ada").expect("valid username"),
        EmailAddress::new("Ada@Example.com").expect("valid email"),
        created_at,
    )
}

#[rstest]
fn user_id_normalises_case() {
    let id = UserId::new(VALID_ID.to_ascii_uppercase()).expect("upper-case hex is accepted");
    assert_eq!(id.as_ref(), VALID_ID);
}

#[rstest]
fn empty_user_id_is_rejected() {
    assert_eq!(UserId::new(""), Err(UserValidationError::EmptyId));
}

#[rstest]
fn invalid_user_id_message_names_the_input() {
    let err = UserId::new("not-an-id").expect_err("malformed id must fail");
    assert_eq!(err.to_string(), "not-an-id is not a valid ObjectId");
}

#[rstest]
#[case("  ada  ", "ada")]
#[case("grace.hopper", "grace.hopper")]
#[case("alan_t-1", "alan_t-1")]
fn username_accepts_valid_input(#[case] raw: &str, #[case] expected: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("ab", UserValidationError::UsernameLength { min: USERNAME_MIN, max: USERNAME_MAX })]
#[case("abcdefghijklmnopqrstuvwxyz0123456", UserValidationError::UsernameLength { min: USERNAME_MIN, max: USERNAME_MAX })]
#[case("bad$char", UserValidationError::UsernameInvalidCharacters)]
#[case("has space", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn username_normalisation_is_case_insensitive() {
    let upper = Username::new("Ada").expect("valid username");
    let lower = Username::new("ada").expect("valid username");
    assert_eq!(upper.normalized(), lower.normalized());
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("ada", UserValidationError::InvalidEmail)]
#[case("ada@example", UserValidationError::InvalidEmail)]
#[case("ada @example.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn email_is_lower_cased() {
    let email = EmailAddress::new(" Ada@Example.COM ").expect("valid email");
    assert_eq!(email.as_ref(), "ada@example.com");
}

#[rstest]
fn user_serialises_camel_case(user: User) {
    let value = serde_json::to_value(&user).expect("user serialises");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "username": "ada",
            "email": "ada@example.com",
            "createdAt": "2023-11-14T22:13:20Z",
        })
    );
}

#[rstest]
fn user_deserialisation_revalidates_fields() {
    let result = serde_json::from_value::<User>(json!({
        "id": "not-an-id",
        "username": "ada",
        "email": "ada@example.com",
        "createdAt": "2023-11-14T22:13:20Z",
    }));
    assert!(result.is_err());
}

#[rstest]
fn user_round_trips_through_json(user: User) {
    let encoded = serde_json::to_string(&user).expect("user serialises");
    let decoded: User = serde_json::from_str(&encoded).expect("user deserialises");
    assert_eq!(decoded, user);
}
