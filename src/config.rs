use serde::Deserialize;

use crate::store::Variant;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Catalog (TMDb) API key
    pub tmdb_api_key: String,

    /// Catalog API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that relative poster paths are appended to
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Encyclopedia summary endpoint, the page title is appended
    #[serde(default = "default_wiki_api_url")]
    pub wiki_api_url: String,

    /// Directory holding the local storage files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Which client flavour's storage keys to use
    #[serde(default)]
    pub variant: Variant,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_wiki_api_url() -> String {
    "https://en.wikipedia.org/api/rest_v1/page/summary/".to_string()
}

fn default_data_dir() -> String {
    ".cinelist".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the local HTTP shell binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
