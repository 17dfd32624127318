use crate::domain::constants::*;
use crate::domain::models::RepoClientConfig;
use crate::services::settings::RepoSettings;
use secrecy::ExposeSecret;
use std::path::Path;

pub fn build_repo_config(settings: &RepoSettings) -> RepoClientConfig {
    RepoClientConfig {
        server: REPO_SERVER.to_string(),
        port: REPO_PORT.to_string(),
        aad_client_id: settings.client_id.clone(),
        aad_client_secret: settings.client_secret.expose_secret().to_string(),
        aad_resource: REPO_AAD_RESOURCE.to_string(),
        aad_tenant: AAD_TENANT_ID.to_string(),
        aad_authority_url: REPO_AAD_AUTHORITY.to_string(),
        repository_id: settings.repository_id.clone(),
    }
}

pub fn write_repo_config(settings: &RepoSettings, dest: &Path) -> anyhow::Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let config = build_repo_config(settings);
    std::fs::write(dest, serde_json::to_string_pretty(&config)?)?;
    Ok(())
}
