use crate::*;
use regex::Regex;
use std::time::Duration;

pub fn handle_pipeline_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::FetchAsset {
            repo,
            pattern,
            api_url,
            retry_delay,
            output,
        } => {
            let settings = ReleaseSettings::from_env(&process_env);
            let pattern = Regex::new(pattern).map_err(|e| {
                ReleaseError::Configuration(format!("invalid --pattern {:?}: {}", pattern, e))
            })?;
            let request = FetchRequest {
                api_base: api_url.clone(),
                repo: repo.clone(),
                tag: settings.tag,
                pattern,
                retry_delay: Duration::from_secs(*retry_delay),
            };
            let client = GithubClient::new(settings.token)?;
            let (release, asset) = fetch_release_asset(&client, &request)?;

            let mut report = AssetReport {
                release: release.tag_name,
                name: asset.name.clone(),
                url: asset.browser_download_url.clone(),
                downloaded_to: None,
                bytes: None,
                sha256: None,
            };
            if let Some(dest) = output {
                let download = download_asset(&client, &asset, dest, request.retry_delay)?;
                if asset.size != 0 && asset.size != download.bytes {
                    tracing::warn!(
                        "{}: release lists {} bytes, downloaded {}",
                        asset.name,
                        asset.size,
                        download.bytes
                    );
                }
                report.downloaded_to = Some(dest.display().to_string());
                report.bytes = Some(download.bytes);
                report.sha256 = Some(download.sha256);
            }

            print_report(cli.json, true, &report, |r| {
                let mut lines = vec![r.url.clone()];
                if let (Some(to), Some(bytes), Some(sha)) = (&r.downloaded_to, r.bytes, &r.sha256) {
                    lines.push(format!("downloaded {} ({} bytes, sha256 {})", to, bytes, sha));
                }
                lines
            })?;
        }
        Commands::RepoConfig { output } => {
            let settings = RepoSettings::from_env(&process_env)?;
            write_repo_config(&settings, output)?;
            tracing::info!(repository = %settings.repository_id, "wrote repo client config");
            let written = output.display().to_string();
            print_report(cli.json, true, &written, |p| vec![format!("wrote {}", p)])?;
        }
        Commands::VerifyKey { fingerprint, gpg } => {
            let expected = normalize_fingerprint(fingerprint)?;
            let listing = list_secret_keys(gpg)?;
            let found = secret_key_fingerprints(&listing);
            let report = KeyCheckReport {
                present: found.contains(&expected),
                secret_keys: found.len(),
                fingerprint: expected,
            };
            print_report(cli.json, report.present, &report, |r| {
                if r.present {
                    vec![format!("signing key {} imported", r.fingerprint)]
                } else {
                    vec![]
                }
            })?;
            if !report.present {
                return Err(ReleaseError::Discovery(format!(
                    "secret key {} not found ({} secret keys in keyring)",
                    report.fingerprint, report.secret_keys
                ))
                .into());
            }
        }
        _ => return Ok(false),
    }

    Ok(true)
}
