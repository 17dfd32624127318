use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Identifiers of the service principal the signing client runs as.
#[derive(Debug, Clone, PartialEq)]
pub struct SigningCredential {
    pub client_id: String,
    /// App registration owning the SSL auth certificate; may differ from
    /// `client_id` while certificates are being migrated.
    pub ssl_client_id: String,
}

/// `auth.json`: how the signing client authenticates against the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthDescriptor {
    pub version: String,
    pub authentication_type: String,
    pub tenant_id: String,
    pub client_id: String,
    pub auth_cert: CertificateRef,
    pub request_signing_cert: CertificateRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateRef {
    pub subject_name: String,
    pub store_location: String,
    pub store_name: String,
}

/// `input.json`: the batches of files to sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputDescriptor {
    pub version: String,
    pub sign_batches: Vec<SignBatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignBatch {
    pub source_location_type: String,
    pub source_root_directory: String,
    pub destination_location_type: String,
    pub destination_root_directory: String,
    pub sign_request_files: Vec<SignRequestFile>,
    pub signing_info: SigningInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignRequestFile {
    pub source_location: String,
    pub destination_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SigningInfo {
    pub operations: Vec<SigningOperation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SigningOperation {
    pub key_code: String,
    pub operation_code: String,
    /// Extra tool parameters in the order they were given.
    pub parameters: IndexMap<String, String>,
    pub tool_name: String,
    pub tool_version: String,
}

/// `policy.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDescriptor {
    pub version: String,
    pub intent: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SigningResult {
    pub file: String,
    pub signed: bool,
}

#[derive(Debug, Serialize)]
pub struct SignReport {
    pub workspace: String,
    pub key_code: String,
    pub operation_code: String,
    pub files: Vec<SigningResult>,
    /// Parsed `esrp_out.json`, when the signing client wrote one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esrp_output: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Serialize)]
pub struct AssetReport {
    pub release: String,
    pub name: String,
    pub url: String,
    pub downloaded_to: Option<String>,
    pub bytes: Option<u64>,
    pub sha256: Option<String>,
}

/// Package-repository client configuration (`config.json`).
#[derive(Debug, Serialize, Deserialize)]
pub struct RepoClientConfig {
    pub server: String,
    pub port: String,
    #[serde(rename = "AADClientId")]
    pub aad_client_id: String,
    #[serde(rename = "AADClientSecret")]
    pub aad_client_secret: String,
    #[serde(rename = "AADResource")]
    pub aad_resource: String,
    #[serde(rename = "AADTenant")]
    pub aad_tenant: String,
    #[serde(rename = "AADAuthorityUrl")]
    pub aad_authority_url: String,
    #[serde(rename = "repositoryId")]
    pub repository_id: String,
}

#[derive(Debug, Serialize)]
pub struct KeyCheckReport {
    pub fingerprint: String,
    pub present: bool,
    pub secret_keys: usize,
}
