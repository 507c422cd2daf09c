use anyhow::Result;

use super::config_model::{Database, DotEnvyConfig, JwtSecrets, Server, Smtp};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let jwt = load_jwt_secrets()?;

    // SMTP is optional; when absent the mailer logs and skips sending.
    let smtp = std::env::var("SMTP_URL").ok().map(|url| Smtp {
        url,
        from_address: std::env::var("SMTP_FROM_ADDRESS").expect("SMTP_FROM_ADDRESS is invalid"),
    });

    let reset_token_ttl_seconds = std::env::var("RESET_TOKEN_TTL_SECONDS")
        .unwrap_or_else(|_| "3600".to_string())
        .parse()?;

    Ok(DotEnvyConfig {
        server,
        database,
        jwt,
        smtp,
        reset_token_ttl_seconds,
    })
}

pub fn load_jwt_secrets() -> Result<JwtSecrets> {
    dotenvy::dotenv().ok();

    Ok(JwtSecrets {
        secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
        refresh_secret: std::env::var("JWT_REFRESH_SECRET").expect("JWT_REFRESH_SECRET is invalid"),
        access_ttl_seconds: std::env::var("JWT_ACCESS_TTL_SECONDS")
            .unwrap_or_else(|_| "900".to_string())
            .parse()?,
        refresh_ttl_seconds: std::env::var("JWT_REFRESH_TTL_SECONDS")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()?,
    })
}
