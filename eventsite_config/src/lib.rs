use std::{collections::HashMap, net::IpAddr, path::Path};

use anyhow::{bail, Context};
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use eventsite_models::email_address::EmailAddressWithName;
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files take precedence.
pub const CONFIG_PATHS_ENV: &str = "EVENTSITE_CONFIG";

/// Prefix of environment variables overriding single config values, e.g.
/// `EVENTSITE_HTTP__PORT=8080` or `EVENTSITE_HTTP__ALLOWED_ORIGINS=https://a.com,https://b.com`.
pub const ENV_PREFIX: &str = "EVENTSITE";

/// Load the configuration from the files listed in `EVENTSITE_CONFIG` (or the
/// default config file) and apply overrides from the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATHS_ENV)
        .map(|paths| {
            paths
                .split(':')
                .filter(|path| !path.is_empty())
                .map(Into::into)
                .collect::<Vec<String>>()
        })
        .unwrap_or_else(|_| vec![DEFAULT_CONFIG_PATH.into()]);

    load_with_env(paths.as_slice(), None)
}

/// Load the default config file only, ignoring the environment.
pub fn load_dev_config() -> anyhow::Result<Config> {
    load_with_env(&[DEFAULT_CONFIG_PATH], Some(HashMap::new()))
}

/// Load the configuration from `paths`.
///
/// Environment overrides are read from `env` if given, otherwise from the
/// process environment.
pub fn load_with_env(
    paths: &[impl AsRef<Path>],
    env: Option<HashMap<String, String>>,
) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("http.allowed_origins")
                .try_parsing(true)
                .source(env),
        )
        .build()?
        .try_deserialize::<Config>()
        .context("Failed to load config")
        .and_then(|config| {
            config.http.check_origins()?;
            Ok(config)
        })
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<Url>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: Url,
}

impl HttpConfig {
    /// Opaque origins serialize as `null` and must not be allowed.
    fn check_origins(&self) -> anyhow::Result<()> {
        if let Some(url) = self
            .allowed_origins
            .iter()
            .find(|url| !url.origin().is_tuple())
        {
            bail!("Allowed origin {url} is not a http(s) origin");
        }
        Ok(())
    }

    /// The allowed origins in the serialization used by the `Origin` header.
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .iter()
            .map(|url| url.origin().ascii_serialization())
            .collect()
    }
}
