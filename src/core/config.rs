use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::OtfError;
use crate::features::profile::HandlerProfile;

pub const DEFAULT_API_BASE_URL: &str = "https://api.orangetheory.co";
pub const DEFAULT_IO_BASE_URL: &str = "https://api.orangetheory.io";
pub const DEFAULT_COGNITO_REGION: &str = "us-east-1";
pub const DEFAULT_COGNITO_CLIENT_ID: &str = "1457d19r0pcjgmp5agooi0rb1b";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STUDIO_SEARCH_RADIUS_MILES: u32 = 50;

pub const EMAIL_VAR: &str = "OTF_EMAIL";
pub const PASSWORD_VAR: &str = "OTF_PASSWORD";

/// Start-up configuration, read once per process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub profile: HandlerProfile,
    pub api_base_url: Url,
    pub io_base_url: Url,
    pub cognito_region: String,
    pub cognito_client_id: String,
    pub http_timeout: Duration,
    pub studio_search_radius_miles: u32,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns a `VAR: reason` message for the first variable that fails to parse.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns a `VAR: reason` message for an unknown profile, a malformed URL,
    /// or a non-numeric timeout or search radius.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let profile = match get("OTF_PROFILE") {
            Some(name) => HandlerProfile::by_name(&name)
                .ok_or_else(|| format!("OTF_PROFILE: unknown profile '{name}'"))?,
            None => HandlerProfile::full(),
        };

        let api_base_url = parse_url(
            "OTF_API_BASE_URL",
            get("OTF_API_BASE_URL"),
            DEFAULT_API_BASE_URL,
        )?;
        let io_base_url =
            parse_url("OTF_IO_BASE_URL", get("OTF_IO_BASE_URL"), DEFAULT_IO_BASE_URL)?;

        let http_timeout_secs = get("OTF_HTTP_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|e| format!("OTF_HTTP_TIMEOUT_SECS: {e}"))
            })
            .transpose()?
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        let studio_search_radius_miles = get("OTF_STUDIO_SEARCH_RADIUS_MILES")
            .map(|v| {
                v.parse::<u32>()
                    .map_err(|e| format!("OTF_STUDIO_SEARCH_RADIUS_MILES: {e}"))
            })
            .transpose()?
            .unwrap_or(DEFAULT_STUDIO_SEARCH_RADIUS_MILES);

        Ok(Self {
            profile,
            api_base_url,
            io_base_url,
            cognito_region: get("OTF_COGNITO_REGION")
                .unwrap_or_else(|| DEFAULT_COGNITO_REGION.to_string()),
            cognito_client_id: get("OTF_COGNITO_CLIENT_ID")
                .unwrap_or_else(|| DEFAULT_COGNITO_CLIENT_ID.to_string()),
            http_timeout: Duration::from_secs(http_timeout_secs),
            studio_search_radius_miles,
        })
    }
}

fn parse_url(name: &str, value: Option<String>, default: &str) -> Result<Url, String> {
    let raw = value.unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| format!("{name}: {e}"))
}

/// Account credentials, read at request time.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// # Errors
    ///
    /// Returns `OtfError::MissingCredentials` if either variable is unset or empty.
    pub fn from_env() -> Result<Self, OtfError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// # Errors
    ///
    /// Returns `OtfError::MissingCredentials` if either value is absent or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OtfError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = lookup(EMAIL_VAR).filter(|v| !v.is_empty());
        let password = lookup(PASSWORD_VAR).filter(|v| !v.is_empty());

        match (email, password) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            _ => Err(OtfError::MissingCredentials),
        }
    }
}

/// Points `HOME` at a writable temporary directory.
///
/// Must run once from `main` before the async runtime or any client is created;
/// the Lambda sandbox only allows writes under the temp dir.
pub fn prepare_sandbox_home() -> PathBuf {
    let home = env::temp_dir();
    // SAFETY: called from `main` before any other thread is spawned.
    unsafe {
        env::set_var("HOME", &home);
    }
    home
}
