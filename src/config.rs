use std::{env, net::SocketAddr, str::FromStr};

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://notes.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
/// One year.
const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// How `POST /api/notes` treats the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesAuth {
    /// Header ignored, notes are created without an owner.
    Anonymous,
    /// A valid bearer token is required and its subject owns the note.
    Bearer,
}

#[derive(Debug, Error)]
#[error("expected `bearer` or `anonymous`, got {0:?}")]
pub struct ParseNotesAuthError(String);

impl FromStr for NotesAuth {
    type Err = ParseNotesAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anonymous" => Ok(NotesAuth::Anonymous),
            "bearer" => Ok(NotesAuth::Bearer),
            _ => Err(ParseNotesAuthError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub notes_auth: NotesAuth,
    pub db_max_connections: u32,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_minutes: i64 =
            parse_or(&lookup, "TOKEN_TTL_MINUTES", Some(DEFAULT_TOKEN_TTL_MINUTES))?;
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&token_ttl_minutes) {
            return Err(ConfigError::Invalid {
                name: "TOKEN_TTL_MINUTES",
                value: token_ttl_minutes.to_string(),
            });
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?,
            jwt_secret,
            token_ttl_minutes,
            notes_auth: parse_or(&lookup, "NOTES_AUTH", Some(NotesAuth::Bearer))?,
            db_max_connections: parse_or(
                &lookup,
                "DB_MAX_CONNECTIONS",
                Some(DEFAULT_DB_MAX_CONNECTIONS),
            )?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => default.ok_or(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(
        pairs: &[(&'static str, &'static str)],
    ) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr.port(), 3001);
        assert_eq!(config.token_ttl_minutes, 60);
        assert_eq!(config.notes_auth, NotesAuth::Bearer);
        assert_eq!(config.db_max_connections, 5);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn notes_auth_is_parsed_case_insensitively() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("NOTES_AUTH", "Anonymous"),
        ]))
        .unwrap();
        assert_eq!(config.notes_auth, NotesAuth::Anonymous);
    }

    #[test]
    fn bad_number_reports_variable_name() {
        let err = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_TTL_MINUTES", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for TOKEN_TTL_MINUTES: \"soon\"");
    }

    #[test]
    fn token_ttl_out_of_range_is_invalid() {
        for ttl in ["0", "-5", "525601", "9223372036854775807"] {
            let err = Config::from_lookup(lookup_from(&[
                ("JWT_SECRET", "s3cret"),
                ("TOKEN_TTL_MINUTES", ttl),
            ]))
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: "TOKEN_TTL_MINUTES", .. }),
                "{ttl}: {err}"
            );
        }

        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_TTL_MINUTES", "525600"),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl_minutes, 525_600);
    }

    #[test]
    fn unknown_notes_auth_is_invalid() {
        let err = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("NOTES_AUTH", "basic"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "NOTES_AUTH", .. }));

        let err = "basic".parse::<NotesAuth>().unwrap_err();
        assert_eq!(err.to_string(), "expected `bearer` or `anonymous`, got \"basic\"");
    }
}
