//! Configuration loading and management
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file. Variables already set in the environment take precedence over
//! the file.

use anyhow::{Context, Result, bail};
use secrecy::SecretString;
use serde::Deserialize;
use shindan_toot_domain::{SiteVariant, Visibility, normalize_base_url, parse_site_ids};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_ENV_FILE: &str = ".env";
const DEFAULT_SHINDAN_HOST: &str = "shindanmaker.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Settings exactly as read from the environment
///
/// Every field is optional here so validation can name the variable that is
/// missing instead of reporting a serde field name.
#[derive(Debug, Default, Deserialize)]
pub struct RawSettings {
    pub mastodon_server: Option<String>,
    pub mastodon_accesstoken: Option<String>,
    pub mastodon_visibility: Option<String>,
    pub wait_sec: Option<String>,
    pub shindan_ids: Option<String>,
    pub shindan_name: Option<String>,
    pub shindan_host: Option<String>,
    pub shindan_variant: Option<String>,
    pub http_timeout_secs: Option<String>,
    pub skip_empty_results: Option<String>,
    pub dry_run: Option<String>,
}

impl RawSettings {
    /// Read the process environment (after [`load_env_file`] has seeded it)
    pub fn load() -> Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    fn from_environment(environment: config::Environment) -> Result<Self> {
        config::Config::builder()
            .add_source(environment)
            .build()
            .context("Failed to read environment")?
            .try_deserialize()
            .context("Failed to deserialize environment")
    }
}

/// Generator site settings
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Base URL including scheme
    pub base_url: String,
    pub variant: SiteVariant,
    pub timeout: Duration,
}

impl SiteConfig {
    pub fn from_raw(raw: &RawSettings) -> Result<Self> {
        let base_url = normalize_base_url(
            optional(&raw.shindan_host).unwrap_or(DEFAULT_SHINDAN_HOST),
        );

        let variant = match optional(&raw.shindan_variant) {
            Some(value) => value.parse::<SiteVariant>().context("Invalid SHINDAN_VARIANT")?,
            None => SiteVariant::default(),
        };

        let timeout_secs = match optional(&raw.http_timeout_secs) {
            Some(value) => parse_secs(value, "HTTP_TIMEOUT_SECS")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            variant,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Mastodon account settings
#[derive(Debug, Clone)]
pub struct MastodonConfig {
    /// Instance URL including scheme
    pub base_url: String,
    pub access_token: SecretString,
    pub visibility: Option<Visibility>,
}

/// The run configuration, built once at startup and read-only afterwards
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mastodon: MastodonConfig,
    pub site: SiteConfig,
    /// Pause between consecutive site identifiers
    pub wait: Duration,
    /// Site identifiers in posting order
    pub site_ids: Vec<String>,
    /// Name submitted to every generator
    pub display_name: String,
    pub skip_empty_results: bool,
    pub dry_run: bool,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let raw = RawSettings::load()?;
        Self::from_raw(&raw)
    }

    pub fn from_raw(raw: &RawSettings) -> Result<Self> {
        let server = required(&raw.mastodon_server, "MASTODON_SERVER")?;
        let access_token = required(&raw.mastodon_accesstoken, "MASTODON_ACCESSTOKEN")?;
        let wait_sec = parse_secs(required(&raw.wait_sec, "WAIT_SEC")?, "WAIT_SEC")?;
        let ids = required(&raw.shindan_ids, "SHINDAN_IDS")?;
        let display_name = required(&raw.shindan_name, "SHINDAN_NAME")?;

        let site_ids = parse_site_ids(ids);
        if site_ids.is_empty() {
            bail!("SHINDAN_IDS contains no site identifiers");
        }

        let visibility = optional(&raw.mastodon_visibility)
            .map(|value| value.parse::<Visibility>())
            .transpose()
            .context("Invalid MASTODON_VISIBILITY")?;

        Ok(Self {
            mastodon: MastodonConfig {
                base_url: normalize_base_url(server),
                access_token: SecretString::new(access_token.into()),
                visibility,
            },
            site: SiteConfig::from_raw(raw)?,
            wait: Duration::from_secs(wait_sec),
            site_ids,
            display_name: display_name.to_string(),
            skip_empty_results: parse_bool(&raw.skip_empty_results, "SKIP_EMPTY_RESULTS")?,
            dry_run: parse_bool(&raw.dry_run, "DRY_RUN")?,
        })
    }

    /// Generate an example env file
    pub fn example_env() -> String {
        r#"# shindan-toot configuration
#
# Values set in the process environment take precedence over this file.

# Mastodon instance host; https:// is assumed when no scheme is given
MASTODON_SERVER=mstdn.example
MASTODON_ACCESSTOKEN=your-access-token
# public, unlisted, private or direct; server default when unset
# MASTODON_VISIBILITY=unlisted

# Seconds to wait between posts
WAIT_SEC=60

# Comma-separated generator page identifiers, posted in this order
SHINDAN_IDS=123456,654321
# Name submitted to each generator
SHINDAN_NAME=Alice

# Generator site host and form flavor (tokenized_form or direct_post)
# SHINDAN_HOST=shindanmaker.com
# SHINDAN_VARIANT=tokenized_form

# HTTP_TIMEOUT_SECS=30
# Set to true to skip posting when a generator returns nothing
# SKIP_EMPTY_RESULTS=false
# DRY_RUN=false
"#
        .to_string()
    }
}

/// Seed the process environment from an env file
///
/// An explicit path must exist. Without one, only `./.env` is considered
/// (parent directories are not searched) and a missing file is fine.
/// Returns the path that was loaded, if any.
pub fn load_env_file(env_file: Option<&Path>) -> Result<Option<PathBuf>> {
    match env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file: {}", path.display()))?;
            Ok(Some(path.to_path_buf()))
        }
        None => {
            let path = Path::new(DEFAULT_ENV_FILE);
            match dotenvy::from_path(path) {
                Ok(()) => Ok(Some(path.to_path_buf())),
                Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                    Ok(None)
                }
                Err(e) => Err(e).context("Failed to parse .env file"),
            }
        }
    }
}

fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, var: &str) -> Result<&'a str> {
    optional(value).with_context(|| format!("Missing required setting {}", var))
}

fn parse_secs(value: &str, var: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .with_context(|| format!("{} must be a non-negative integer, got '{}'", var, value))
}

fn parse_bool(value: &Option<String>, var: &str) -> Result<bool> {
    match optional(value).map(str::to_ascii_lowercase).as_deref() {
        None | Some("0" | "false" | "no" | "off") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some(other) => bail!("{} must be a boolean, got '{}'", var, other),
    }
}
