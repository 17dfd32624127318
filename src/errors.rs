/// Terminal failures of a pipeline step. None are recovered; `main` reports
/// the message and the process exits 1.
#[derive(thiserror::Error, Debug)]
pub enum ReleaseError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("discovery error: {0}")]
    Discovery(String),
    #[error("external tool error: {0}")]
    ExternalTool(String),
    #[error("network error: {0}")]
    Network(String),
}

impl ReleaseError {
    pub fn missing_env(name: &str) -> Self {
        ReleaseError::Configuration(format!("required environment variable {} is not set", name))
    }
}
