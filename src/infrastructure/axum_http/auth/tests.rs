use super::*;
use jsonwebtoken::{EncodingKey, Header, encode};

const SECRET: &str = "supersecretjwtsecretforunittesting123";

#[test]
fn test_issue_and_validate_access_token() {
    let secrets = JwtSecrets {
        secret: SECRET.to_string(),
        refresh_secret: "refreshsecretforunittesting456".to_string(),
        access_ttl_seconds: 900,
        refresh_ttl_seconds: 604800,
    };

    let user_id = Uuid::new_v4();
    let pair = issue_token_pair(user_id, UserRole::Student, &secrets).unwrap();

    let claims = validate_token(&pair.access, SECRET, TOKEN_USE_ACCESS)
        .expect("Valid access token should pass");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, "student");

    let refresh_claims = validate_token(
        &pair.refresh,
        "refreshsecretforunittesting456",
        TOKEN_USE_REFRESH,
    )
    .expect("Valid refresh token should pass");
    assert_eq!(refresh_claims.token_use, "refresh");
}

#[test]
fn test_validate_token_rejects_wrong_use() {
    let secrets = JwtSecrets {
        secret: SECRET.to_string(),
        refresh_secret: SECRET.to_string(),
        access_ttl_seconds: 900,
        refresh_ttl_seconds: 604800,
    };

    let pair = issue_token_pair(Uuid::new_v4(), UserRole::Admin, &secrets).unwrap();

    // Refresh token presented where an access token is expected.
    let result = validate_token(&pair.refresh, SECRET, TOKEN_USE_ACCESS);
    assert!(result.is_err());
}

#[test]
fn test_validate_token_expired() {
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        role: "student".to_string(),
        token_use: TOKEN_USE_ACCESS.to_string(),
        exp: 1, // past
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token, SECRET, TOKEN_USE_ACCESS);
    assert!(result.is_err());
}

#[test]
fn test_validate_token_invalid_signature() {
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        role: "student".to_string(),
        token_use: TOKEN_USE_ACCESS.to_string(),
        exp: 9999999999,
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(b"wrongsecret"),
    )
    .unwrap();

    let result = validate_token(&token, SECRET, TOKEN_USE_ACCESS);
    assert!(result.is_err());
}
