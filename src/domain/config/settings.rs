use thiserror::Error;

use super::{
    local::{LocalConfig, Provider, UnknownProvider},
    secrets::{GitHubSecrets, Secrets, SupabaseSecrets, GITHUB_API_BASE},
};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FOLDER: &str = "uploads";
const DEFAULT_BUCKET: &str = "files";
const DEFAULT_BRANCH: &str = "main";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub local: LocalConfig,
    pub secrets: Secrets,
    pub database_max_connections: u32,
}

impl Settings {
    /// Reads the process environment, loading `.env` first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let provider = match get("STORAGE_PROVIDER") {
            Some(value) => value
                .parse::<Provider>()
                .map_err(|UnknownProvider(value)| ConfigError::Invalid {
                    name: "STORAGE_PROVIDER",
                    value,
                })?,
            None => Provider::Supabase,
        };

        let port = match get("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        });

        let supabase_secrets = match provider {
            Provider::Supabase => Some(SupabaseSecrets {
                url: require("SUPABASE_URL")?.trim_end_matches('/').to_string(),
                api_key: require("SUPABASE_KEY")?,
                bucket_name: get("SUPABASE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            }),
            Provider::GitHub => None,
        };

        let github_secrets = match provider {
            Provider::GitHub => Some(GitHubSecrets {
                owner: require("GITHUB_OWNER")?,
                repo: require("GITHUB_REPO")?,
                token: require("GITHUB_TOKEN")?,
                branch: get("GITHUB_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
                api_url: get("GITHUB_API_URL")
                    .unwrap_or_else(|| GITHUB_API_BASE.to_string())
                    .trim_end_matches('/')
                    .to_string(),
            }),
            Provider::Supabase => None,
        };

        Ok(Settings {
            local: LocalConfig {
                provider,
                default_folder: get("DEFAULT_FOLDER")
                    .map(|f| f.trim().trim_matches('/').to_string())
                    .filter(|f| !f.is_empty())
                    .unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
                port,
                cors_allowed_origins,
            },
            secrets: Secrets {
                database_url: require("DATABASE_URL")?,
                access_password: get("APP_PASSWORD"),
                supabase_secrets,
                github_secrets,
            },
            database_max_connections,
        })
    }
}
