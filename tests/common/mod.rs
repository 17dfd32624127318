#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const AAD_ID: &str = "11111111-aaaa-bbbb-cccc-222222222222";
pub const AAD_ID_SSL: &str = "33333333-dddd-eeee-ffff-444444444444";

/// Signing client stand-in: logs an upload line, copies every input file into
/// `signed/` and writes `esrp_out.json`.
pub const SIGNING_CLIENT_OK: &str = r#"#!/bin/sh
echo "args: $*"
echo "2024-05-01T10:00:00 [Verbose] Uploading app.exe to destinationUrl https://esrp.blob.example/abc?sig=SECRET, size=10"
echo "Sign request completed"
echo "stderr diagnostics" >&2
mkdir -p signed
for f in "$SIGN_SRC"/*; do cp "$f" signed/; done
echo '{"Status":"pass","SubmissionId":"42"}' > esrp_out.json
"#;

pub struct TestEnv {
    _tmp: TempDir,
    pub workspace: PathBuf,
    pub input: PathBuf,
    pub bin: PathBuf,
}

impl TestEnv {
    pub fn new(files: &[&str]) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let workspace = tmp.path().join("workspace");
        let input = tmp.path().join("payload");
        let bin = tmp.path().join("bin");
        for d in [&workspace, &input, &bin] {
            fs::create_dir_all(d).expect("create fixture dir");
        }
        for f in files {
            fs::write(input.join(f), format!("unsigned {}", f)).expect("write input file");
        }
        Self {
            _tmp: tmp,
            workspace,
            input,
            bin,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("relsign");
        cmd.current_dir(&self.workspace)
            .env_remove("ESRP_TOOL")
            .env_remove("RELEASE")
            .env_remove("GITHUB_TOKEN")
            .env("AZURE_AAD_ID", AAD_ID)
            .env("AZURE_AAD_ID_SSL", AAD_ID_SSL)
            .env("GITHUB_WORKSPACE", &self.workspace)
            .env("SIGN_SRC", &self.input);
        cmd
    }

    /// Writes an executable shell script into the fixture `bin/` dir.
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.bin.join(name);
        fs::write(&path, body).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
        path
    }

    pub fn read_json(&self, name: &str) -> Value {
        read_json(&self.workspace.join(name))
    }
}

pub fn read_json(path: &Path) -> Value {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e));
    serde_json::from_str(&raw).expect("valid json file")
}
