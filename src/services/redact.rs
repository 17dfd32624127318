use regex::Regex;
use std::sync::OnceLock;

pub const REDACTED_LINE: &str = "***";

fn upload_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?im)^.+Uploading.*to\s*destinationUrl\s*(.+?),.+$")
            .expect("upload destination pattern is valid")
    })
}

/// Replaces every log line that announces an upload destination URL with
/// `***`. The signing client logs short-lived signed blob URLs on those lines.
/// Everything else is returned untouched.
pub fn redact_upload_urls(log: &str) -> String {
    upload_line_pattern()
        .replace_all(log, REDACTED_LINE)
        .into_owned()
}
