use crate::domain::model::CONDA_FORGE_CHANNEL;
use crate::domain::ports::AvailabilityChecker;
use crate::utils::error::Result;
use crate::utils::validation::{validate_package_name, validate_url};
use async_trait::async_trait;
use reqwest::{redirect, Client, StatusCode};
use url::Url;

pub const DEFAULT_FORGE_URL: &str = "https://anaconda.org/";
pub const FORGE_URL_ENV: &str = "BENI_FORGE_URL";
/// anaconda.org answers anonymous requests with 401.
pub const USER_AGENT: &str = "beni";

#[derive(Debug, Clone)]
pub struct ForgeConfig {
    pub base_url: String,
    pub channel: String,
    pub user_agent: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FORGE_URL.to_string(),
            channel: CONDA_FORGE_CHANNEL.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ForgeConfig {
    /// Default configuration, with the base URL taken from `BENI_FORGE_URL`
    /// when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(FORGE_URL_ENV) {
            tracing::debug!("Using forge URL from {}: {}", FORGE_URL_ENV, url);
            config.base_url = url;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Checks package pages on anaconda.org: 200 means the channel hosts the
/// package, anything else (the 302 for unknown names included) means it
/// does not.
pub struct ForgeChecker {
    client: Client,
    base_url: Url,
    channel: String,
}

impl ForgeChecker {
    pub fn new(config: ForgeConfig) -> Result<Self> {
        validate_url("forge_url", &config.base_url)?;

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            channel: config.channel,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ForgeConfig::from_env())
    }

    pub fn package_url(&self, package: &str) -> Result<Url> {
        validate_package_name("package", package)?;
        Ok(self
            .base_url
            .join(&format!("{}/{}/", self.channel, package))?)
    }
}

#[async_trait]
impl AvailabilityChecker for ForgeChecker {
    async fn is_available(&self, package: &str) -> Result<bool> {
        let url = self.package_url(package)?;

        tracing::debug!("Checking {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("{} -> {}", package, status);

        Ok(status == StatusCode::OK)
    }
}
