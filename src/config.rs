use std::time;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub identity: Identity,
    pub store: Store,
    #[serde(default)]
    pub http: Http,
}

/// Remote identity service.
#[derive(Clone, Debug, Deserialize)]
pub struct Identity {
    pub url: String,
    pub api_key: String,
}

/// Remote document store holding the tickets.
#[derive(Clone, Debug, Deserialize)]
pub struct Store {
    pub url: String,
    pub project_id: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Http {
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl Http {
    /// Builds the HTTP client shared by both remote services.
    pub fn client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().timeout(self.timeout).build()
    }
}

impl Default for Http {
    fn default() -> Self {
        Self {
            timeout: time::Duration::from_secs(10),
        }
    }
}

fn default_collection() -> String {
    "orders".into()
}
