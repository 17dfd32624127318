use crate::domain::constants::*;
use crate::domain::models::{
    AuthDescriptor, CertificateRef, InputDescriptor, PolicyDescriptor, SignBatch,
    SignRequestFile, SigningCredential, SigningInfo, SigningOperation, SigningResult,
};
use crate::errors::ReleaseError;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Turns a flat `key value key value ...` list into the operation's
/// parameter map. A repeated key keeps its first position and takes the last
/// value.
pub fn parse_params(raw: &[String]) -> Result<IndexMap<String, String>, ReleaseError> {
    if raw.len() % 2 != 0 {
        return Err(ReleaseError::Configuration(format!(
            "--params expects key/value pairs, got {} values (dangling key {:?})",
            raw.len(),
            raw[raw.len() - 1]
        )));
    }
    let mut out = IndexMap::new();
    for pair in raw.chunks(2) {
        out.insert(pair[0].clone(), pair[1].clone());
    }
    Ok(out)
}

/// Names of the regular files directly under `dir`, sorted.
pub fn scan_input_files(dir: &Path) -> Result<Vec<String>, ReleaseError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ReleaseError::Discovery(format!("cannot read input directory {}: {}", dir.display(), e))
    })?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            ReleaseError::Discovery(format!("cannot read input directory {}: {}", dir.display(), e))
        })?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    if names.is_empty() {
        return Err(ReleaseError::Discovery(format!(
            "no files to sign under {}",
            dir.display()
        )));
    }
    names.sort();
    Ok(names)
}

pub fn signed_destination(name: &str) -> String {
    format!("{}/{}", SIGNED_DIR, name)
}

fn cert_ref(subject_name: String) -> CertificateRef {
    CertificateRef {
        subject_name,
        store_location: CERT_STORE_LOCATION.to_string(),
        store_name: CERT_STORE_NAME.to_string(),
    }
}

pub fn build_auth(credential: &SigningCredential) -> AuthDescriptor {
    AuthDescriptor {
        version: DESCRIPTOR_VERSION.to_string(),
        authentication_type: AUTH_TYPE_AAD_CERT.to_string(),
        tenant_id: AAD_TENANT_ID.to_string(),
        client_id: credential.client_id.clone(),
        auth_cert: cert_ref(format!(
            "CN={}{}",
            credential.ssl_client_id, SSL_SUBJECT_SUFFIX
        )),
        request_signing_cert: cert_ref(format!("CN={}", credential.client_id)),
    }
}

pub fn build_policy() -> PolicyDescriptor {
    PolicyDescriptor {
        version: DESCRIPTOR_VERSION.to_string(),
        intent: POLICY_INTENT.to_string(),
        content_type: POLICY_CONTENT_TYPE.to_string(),
    }
}

/// What to sign and how: one batch, one operation.
#[derive(Debug, Clone)]
pub struct BatchSpec<'a> {
    pub source_root: &'a str,
    pub destination_root: &'a str,
    pub files: &'a [String],
    pub key_code: &'a str,
    pub operation_code: &'a str,
    pub parameters: IndexMap<String, String>,
}

pub fn build_input(spec: BatchSpec<'_>) -> InputDescriptor {
    let sign_request_files = spec
        .files
        .iter()
        .map(|name| SignRequestFile {
            source_location: name.clone(),
            destination_location: signed_destination(name),
            correlation_id: None,
        })
        .collect();

    InputDescriptor {
        version: DESCRIPTOR_VERSION.to_string(),
        sign_batches: vec![SignBatch {
            source_location_type: LOCATION_TYPE_UNC.to_string(),
            source_root_directory: spec.source_root.to_string(),
            destination_location_type: LOCATION_TYPE_UNC.to_string(),
            destination_root_directory: spec.destination_root.to_string(),
            sign_request_files,
            signing_info: SigningInfo {
                operations: vec![SigningOperation {
                    key_code: spec.key_code.to_string(),
                    operation_code: spec.operation_code.to_string(),
                    parameters: spec.parameters,
                    tool_name: SIGN_TOOL_NAME.to_string(),
                    tool_version: SIGN_TOOL_VERSION.to_string(),
                }],
            },
        }],
    }
}

/// The three descriptors the signing client consumes.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    pub auth: AuthDescriptor,
    pub input: InputDescriptor,
    pub policy: PolicyDescriptor,
}

impl SigningRequest {
    pub fn new(credential: &SigningCredential, batch: BatchSpec<'_>) -> Self {
        Self {
            auth: build_auth(credential),
            input: build_input(batch),
            policy: build_policy(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.input
            .sign_batches
            .iter()
            .map(|b| b.sign_request_files.len())
            .sum()
    }

    /// Writes `auth.json`, `input.json` and `policy.json` into `dir`.
    /// Existing files are overwritten; nothing is cleaned up afterwards.
    pub fn write_to(&self, dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(AUTH_FILE), serde_json::to_string_pretty(&self.auth)?)?;
        std::fs::write(dir.join(INPUT_FILE), serde_json::to_string_pretty(&self.input)?)?;
        std::fs::write(
            dir.join(POLICY_FILE),
            serde_json::to_string_pretty(&self.policy)?,
        )?;
        Ok(())
    }
}

/// Relative tool paths with a directory part are taken from the workspace,
/// bare names are left to `PATH` lookup.
pub fn resolve_tool(tool: &Path, workspace: &Path) -> PathBuf {
    if tool.is_relative() && tool.components().count() > 1 {
        workspace.join(tool)
    } else {
        tool.to_path_buf()
    }
}

pub struct ToolRun {
    pub code: Option<i32>,
    pub success: bool,
    /// stdout followed by stderr.
    pub log: String,
}

pub fn esrp_client_args() -> Vec<&'static str> {
    vec![
        "sign",
        "-a",
        AUTH_FILE,
        "-i",
        INPUT_FILE,
        "-p",
        POLICY_FILE,
        "-o",
        ESRP_OUT_FILE,
        "-l",
        "Verbose",
    ]
}

/// Runs the signing client in `workspace` and waits for it to exit.
pub fn run_esrp_client(tool: &Path, workspace: &Path) -> Result<ToolRun, ReleaseError> {
    tracing::debug!(tool = %tool.display(), workspace = %workspace.display(), "launching signing client");
    let output = Command::new(tool)
        .args(esrp_client_args())
        .current_dir(workspace)
        .output()
        .map_err(|e| {
            ReleaseError::ExternalTool(format!("failed to launch {}: {}", tool.display(), e))
        })?;

    let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
    log.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(ToolRun {
        code: output.status.code(),
        success: output.status.success(),
        log,
    })
}

pub fn read_esrp_output(workspace: &Path) -> Option<serde_json::Value> {
    let raw = std::fs::read_to_string(workspace.join(ESRP_OUT_FILE)).ok()?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("{} is not valid JSON: {}", ESRP_OUT_FILE, e);
            None
        }
    }
}

/// Best-effort completion check: a file counts as signed when
/// `<workspace>/signed/<name>` is a regular file.
pub fn collect_results(files: &[String], workspace: &Path) -> Vec<SigningResult> {
    files
        .iter()
        .map(|name| SigningResult {
            file: name.clone(),
            signed: workspace.join(SIGNED_DIR).join(name).is_file(),
        })
        .collect()
}
