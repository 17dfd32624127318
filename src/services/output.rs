use crate::domain::models::JsonOut;
use serde::Serialize;

/// Prints `data` inside the `{ok, data}` envelope in JSON mode, otherwise the
/// human lines produced by `lines`.
pub fn print_report<T: Serialize>(
    json: bool,
    ok: bool,
    data: &T,
    lines: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok, data })?
        );
    } else {
        for line in lines(data) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Passes external tool output through. In JSON mode stdout is reserved for
/// the envelope, so the log goes to stderr instead.
pub fn relay_tool_log(json: bool, log: &str) {
    let log = log.strip_suffix('\n').unwrap_or(log);
    if log.is_empty() {
        return;
    }
    if json {
        eprintln!("{}", log);
    } else {
        println!("{}", log);
    }
}

pub fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
