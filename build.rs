//! Embeds version metadata for `pantry --version`.
//!
//! Values come from `PANTRY_BUILD_*` overrides when set (packaging builds),
//! otherwise from git and the clock. Missing tools yield "unknown".

use std::env;
use std::process::Command;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const HASH_VAR: &str = "PANTRY_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "PANTRY_BUILD_TIMESTAMP";

fn main() {
    for var in [HASH_VAR, TIMESTAMP_VAR, "SOURCE_DATE_EPOCH"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
    watch_git_head();

    let hash = override_or(HASH_VAR, describe_commit);
    let timestamp = override_or(TIMESTAMP_VAR, build_time);
    println!("cargo:rustc-env={HASH_VAR}={hash}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

fn override_or(var: &str, fallback: fn() -> String) -> String {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => fallback(),
    }
}

fn watch_git_head() {
    let Some(git_dir) = command_output("git", &["rev-parse", "--git-dir"]) else {
        return;
    };
    println!("cargo:rerun-if-changed={git_dir}/HEAD");
    if let Some(branch_ref) = command_output("git", &["symbolic-ref", "-q", "HEAD"]) {
        println!("cargo:rerun-if-changed={git_dir}/{branch_ref}");
    }
}

fn describe_commit() -> String {
    command_output("git", &["describe", "--always", "--dirty", "--abbrev=12"])
        .unwrap_or_else(|| "unknown".to_string())
}

/// RFC 3339 UTC seconds. Honors `SOURCE_DATE_EPOCH` for reproducible builds.
fn build_time() -> String {
    let secs = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::ZERO)
                .as_secs()
        });
    format_utc(secs)
}

fn format_utc(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

// Days since 1970-01-01 to a proleptic Gregorian date.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
