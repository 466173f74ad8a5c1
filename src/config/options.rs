// src/config/options.rs
use std::fmt;
use std::time::Duration;

use url::Url;

use super::consts::*;
use crate::error::{PortalError, Result};
use crate::prompt::Prompter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaperRequest {
    pub up_pct: u32,
    pub down_pct: u32,
}

impl Default for ShaperRequest {
    fn default() -> Self {
        Self { up_pct: DEFAULT_SHAPER_UP_PCT, down_pct: DEFAULT_SHAPER_DOWN_PCT }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// List offers, validate a psid, build (and maybe submit) the confirmation.
    Plan,
    /// Inspect the shaper and set caps as a percentage of the rated plan speed.
    Shaper(ShaperRequest),
}

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub base_url: Url,
    pub psid: Option<String>,       // target plan; prompted when absent
    pub commit: bool,               // send the mutating request; otherwise preview only
    pub latest: bool,               // use the latest-pricing offer set
    pub timeout: Option<Duration>,  // per request; None = client default
    pub mode: Mode,
}

impl RunOptions {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            psid: None,
            commit: false,
            latest: false,
            timeout: None,
            mode: Mode::Plan,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the environment.
    pub fn from_env() -> (Option<String>, Option<String>) {
        let get = |k: &str| std::env::var(k).ok().filter(|v| !v.is_empty());
        (get(ENV_USERNAME), get(ENV_PASSWORD))
    }

    /// Fill whatever the environment left out from the prompter.
    /// Fails before any network traffic when either value ends up empty.
    pub async fn resolve<P: Prompter>(
        username: Option<String>,
        password: Option<String>,
        prompter: &mut P,
    ) -> Result<Self> {
        if let (Some(username), Some(password)) = (&username, &password) {
            return Ok(Self { username: username.clone(), password: password.clone() });
        }
        logf!("{ISP} username or password not set.");

        if prompter.interactive() {
            prompter.say(&format!("Enter your {ISP} credentials:"));
        }
        let username = match username {
            Some(u) => {
                prompter.say(&format!("Username: {u}"));
                u
            }
            None => prompter.line("Username: ").await?.unwrap_or_default(),
        };
        let password = match password {
            Some(p) => p,
            None => prompter.secret("Password: ").await?.unwrap_or_default(),
        };

        if username.is_empty() || password.is_empty() {
            logf!("Quitting, {ISP} username or password not set.");
            return Err(PortalError::CredentialsMissing);
        }
        Ok(Self { username, password })
    }
}
