use crate::domain::constants::*;
use crate::domain::models::SigningCredential;
use crate::errors::ReleaseError;
use secrecy::SecretString;
use std::path::PathBuf;

/// Reads the live process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// CI runners expose unset secrets as empty strings, so blank counts as absent.
fn optional(lookup: &dyn Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(lookup: &dyn Fn(&str) -> Option<String>, name: &str) -> Result<String, ReleaseError> {
    optional(lookup, name).ok_or_else(|| ReleaseError::missing_env(name))
}

#[derive(Debug)]
pub struct SigningSettings {
    pub credential: SigningCredential,
    pub workspace: PathBuf,
}

impl SigningSettings {
    pub fn from_env(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ReleaseError> {
        let client_id = required(lookup, ENV_AAD_ID)?;
        let ssl_client_id = required(lookup, ENV_AAD_ID_SSL)?;
        let workspace = required(lookup, ENV_WORKSPACE)?;
        Ok(Self {
            credential: SigningCredential {
                client_id,
                ssl_client_id,
            },
            workspace: PathBuf::from(workspace),
        })
    }
}

#[derive(Debug)]
pub struct RepoSettings {
    pub client_id: String,
    pub client_secret: SecretString,
    pub repository_id: String,
}

impl RepoSettings {
    pub fn from_env(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ReleaseError> {
        Ok(Self {
            client_id: required(lookup, ENV_AAD_ID)?,
            client_secret: SecretString::from(required(lookup, ENV_AAD_CLIENT_SECRET)?),
            repository_id: required(lookup, ENV_APT_REPO_ID)?,
        })
    }
}

#[derive(Debug)]
pub struct ReleaseSettings {
    /// `None` selects the latest published release.
    pub tag: Option<String>,
    pub token: Option<SecretString>,
}

impl ReleaseSettings {
    pub fn from_env(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        let tag = optional(lookup, ENV_RELEASE).filter(|t| !t.eq_ignore_ascii_case("latest"));
        Self {
            tag,
            token: optional(lookup, ENV_GITHUB_TOKEN).map(SecretString::from),
        }
    }
}
