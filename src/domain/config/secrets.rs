use serde::{Deserialize, Serialize};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseSecrets {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    #[serde(rename = "url")]
    pub url: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GitHubSecrets {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub branch: String,
    #[serde(rename = "apiUrl")]
    pub api_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Secrets {
    #[serde(rename = "databaseUrl")]
    pub database_url: String,
    #[serde(rename = "accessPassword")]
    pub access_password: Option<String>,
    #[serde(rename = "supabaseSecrets")]
    pub supabase_secrets: Option<SupabaseSecrets>,
    #[serde(rename = "githubSecrets")]
    pub github_secrets: Option<GitHubSecrets>,
}
