pub const DESCRIPTOR_VERSION: &str = "1.0.0";

pub const AAD_TENANT_ID: &str = "72f988bf-86f1-41af-91ab-2d7cd011db47";
pub const AUTH_TYPE_AAD_CERT: &str = "AAD_CERT";
pub const CERT_STORE_LOCATION: &str = "LocalMachine";
pub const CERT_STORE_NAME: &str = "My";
pub const SSL_SUBJECT_SUFFIX: &str = ".microsoft.com";

pub const LOCATION_TYPE_UNC: &str = "UNC";
pub const SIGN_TOOL_NAME: &str = "sign";
pub const SIGN_TOOL_VERSION: &str = "1.0";
pub const POLICY_INTENT: &str = "production release";
pub const POLICY_CONTENT_TYPE: &str = "binary";

/// Destination segment for signed output, relative to the workspace.
pub const SIGNED_DIR: &str = "signed";

pub const AUTH_FILE: &str = "auth.json";
pub const INPUT_FILE: &str = "input.json";
pub const POLICY_FILE: &str = "policy.json";
pub const ESRP_OUT_FILE: &str = "esrp_out.json";
pub const REPO_CONFIG_FILE: &str = "config.json";

pub const DEFAULT_ESRP_TOOL: &str = "esrp/tools/EsrpClient.exe";

pub const ENV_AAD_ID: &str = "AZURE_AAD_ID";
pub const ENV_AAD_ID_SSL: &str = "AZURE_AAD_ID_SSL";
pub const ENV_WORKSPACE: &str = "GITHUB_WORKSPACE";
pub const ENV_APT_REPO_ID: &str = "APT_REPO_ID";
pub const ENV_AAD_CLIENT_SECRET: &str = "AAD_CLIENT_SECRET";
pub const ENV_RELEASE: &str = "RELEASE";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

pub const DEFAULT_RELEASE_REPO: &str = "git-ecosystem/git-credential-manager";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_ASSET_PATTERN: &str = r"\.deb$";
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 10;

pub const REPO_SERVER: &str = "azure-apt-cat.cloudapp.net";
pub const REPO_PORT: &str = "443";
pub const REPO_AAD_RESOURCE: &str = "https://microsoft.onmicrosoft.com/945999e9-da09-4b5b-878f-b66c414602c0";
pub const REPO_AAD_AUTHORITY: &str = "https://login.microsoftonline.com";
