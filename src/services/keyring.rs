use crate::errors::ReleaseError;
use std::path::Path;
use std::process::Command;

/// Canonical form of an OpenPGP v4 fingerprint: 40 upper-case hex digits.
/// Spaces are accepted on input since that is how `gpg` prints them.
pub fn normalize_fingerprint(raw: &str) -> Result<String, ReleaseError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = hex::decode(&compact).map_err(|e| {
        ReleaseError::Configuration(format!("fingerprint {:?} is not hex: {}", raw, e))
    })?;
    if bytes.len() != 20 {
        return Err(ReleaseError::Configuration(format!(
            "fingerprint {:?} must be 40 hex digits",
            raw
        )));
    }
    Ok(hex::encode_upper(bytes))
}

/// Fingerprints of primary secret keys in `gpg --with-colons` output.
/// Only the first `fpr` record after each `sec` record is taken; subkey
/// fingerprints (`ssb` then `fpr`) are skipped.
pub fn secret_key_fingerprints(listing: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut expect_primary = false;
    for line in listing.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        match fields.first().copied() {
            Some("sec") => expect_primary = true,
            Some("fpr") if expect_primary => {
                if let Some(fpr) = fields.get(9).filter(|f| !f.is_empty()) {
                    out.push(fpr.to_ascii_uppercase());
                }
                expect_primary = false;
            }
            Some("ssb") | Some("pub") | Some("sub") => expect_primary = false,
            _ => {}
        }
    }
    out
}

pub fn list_secret_keys(gpg: &Path) -> Result<String, ReleaseError> {
    let output = Command::new(gpg)
        .args(["--batch", "--with-colons", "--list-secret-keys"])
        .output()
        .map_err(|e| ReleaseError::ExternalTool(format!("failed to launch {}: {}", gpg.display(), e)))?;
    if !output.status.success() {
        return Err(ReleaseError::ExternalTool(format!(
            "{} --list-secret-keys exited with {}: {}",
            gpg.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
