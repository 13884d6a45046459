//! Persistent run reports - `~/.petstore-contract/reports/`
//!
//! Every `petstore-contract run` is saved regardless of `--output` mode.
//! Directory layout: `{host_port}_{timestamp}/`

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use petstore_core::{Config, SuiteReport, Verdict};

/// Everything needed to persist one run.
pub struct ReportData<'a> {
    pub config: &'a Config,
    pub report: &'a SuiteReport,
    pub verdict: &'a Verdict,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
}

/// Save under `base` (or the default report directory).
///
/// Returns the report directory path on success.
pub fn save_report(data: &ReportData, base: Option<&Path>) -> Result<PathBuf, std::io::Error> {
    let base = match base {
        Some(dir) => dir.to_path_buf(),
        None => report_base_dir()?,
    };
    let report_dir = base.join(build_dir_name(&data.config.base_url, data.started_at));
    std::fs::create_dir_all(&report_dir)?;

    // config.toml - snapshot of the config used, header values masked
    let config_toml = toml::to_string_pretty(&masked(data.config))
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    std::fs::write(report_dir.join("config.toml"), config_toml)?;

    let summary = serde_json::json!({
        "verdict": data.verdict,
        "stats": {
            "total": data.report.total(),
            "passed": data.report.passed(),
            "failed": data.report.failed(),
            "cleanup_failures": data.report.cleanup_failures.len(),
            "stopped_early": data.report.stopped_early,
        },
        "meta": {
            "timestamp": data.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            "duration_secs": data.duration_secs,
            "base_url": data.config.base_url,
        },
        "report": data.report,
    });
    write_json(&report_dir.join("summary.json"), &summary)?;

    let failures: Vec<_> = data
        .report
        .failures()
        .map(|(case, failure)| {
            serde_json::json!({
                "case": case.name,
                "feature": case.feature,
                "kind": failure.kind,
                "severity": failure.severity,
                "message": failure.message,
            })
        })
        .collect();
    if !failures.is_empty() || !data.report.cleanup_failures.is_empty() {
        let doc = serde_json::json!({
            "cases": failures,
            "cleanup": data.report.cleanup_failures,
        });
        write_json(&report_dir.join("failures.json"), &doc)?;
    }

    Ok(report_dir)
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<(), std::io::Error> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    std::fs::write(path, text)
}

fn masked(config: &Config) -> Config {
    let mut config = config.clone();
    for value in config.headers.values_mut() {
        "***".clone_into(value);
    }
    config
}

fn report_base_dir() -> Result<PathBuf, std::io::Error> {
    let home = std::env::var("HOME")
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::NotFound, "HOME not set"))?;
    Ok(PathBuf::from(home)
        .join(".petstore-contract")
        .join("reports"))
}

/// `{host_port}_{timestamp}` e.g. `5.181.109.28_9090_20260205T193000`
fn build_dir_name(base_url: &str, at: DateTime<Utc>) -> String {
    let host_port = extract_host_port(base_url);
    format!("{host_port}_{}", at.format("%Y%m%dT%H%M%S"))
}

/// `"http://localhost:8080/path"` → `"localhost_8080"`
fn extract_host_port(url: &str) -> String {
    url.split("://")
        .nth(1)
        .unwrap_or(url)
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .replace(':', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use petstore_core::{
        CaseFailure, CaseOutcome, CaseReport, CleanupFailure, FailureKind, VerdictPolicy,
    };

    #[test]
    fn extract_host_port_standard() {
        assert_eq!(extract_host_port("http://localhost:8080"), "localhost_8080");
        assert_eq!(
            extract_host_port("http://5.181.109.28:9090/api/v3"),
            "5.181.109.28_9090"
        );
        assert_eq!(extract_host_port("https://petstore.example.com"), "petstore.example.com");
        assert_eq!(extract_host_port("http:///api"), "unknown");
    }

    #[test]
    fn dir_name_format() {
        let at = Utc.with_ymd_and_hms(2026, 2, 5, 19, 30, 0).unwrap();
        assert_eq!(
            build_dir_name("http://localhost:8080/api/v3", at),
            "localhost_8080_20260205T193000"
        );
    }

    fn sample_report() -> SuiteReport {
        SuiteReport {
            base_url: "http://localhost:8080/api/v3".into(),
            cases: vec![
                CaseReport {
                    name: "pet::add".into(),
                    feature: "pet".into(),
                    title: "Add a minimal pet".into(),
                    outcome: CaseOutcome::Passed,
                    duration_ms: 12,
                },
                CaseReport {
                    name: "store::inventory".into(),
                    feature: "store".into(),
                    title: "Inventory".into(),
                    outcome: CaseOutcome::Failed(CaseFailure::new(
                        FailureKind::ContractViolation,
                        "GET /store/inventory: expected status 200, got 500",
                    )),
                    duration_ms: 3,
                },
            ],
            cleanup_failures: vec![CleanupFailure {
                case: "pet::add".into(),
                resource: "pet 123456".into(),
                message: "DELETE /pet/123456 returned 500".into(),
            }],
            stopped_early: false,
        }
    }

    #[test]
    fn writes_summary_config_and_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::default().with_base_url_override(Some(
            "http://localhost:8080/api/v3".into(),
        ));
        config.headers.insert("api_key".into(), "secret".into());
        let report = sample_report();
        let verdict = VerdictPolicy::default().verdict(&report);
        let data = ReportData {
            config: &config,
            report: &report,
            verdict: &verdict,
            started_at: Utc.with_ymd_and_hms(2026, 2, 5, 19, 30, 0).unwrap(),
            duration_secs: 0.5,
        };

        let dir = save_report(&data, Some(tmp.path())).unwrap();
        assert!(dir.ends_with("localhost_8080_20260205T193000"));

        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["verdict"]["status"], "FAIL");
        assert_eq!(summary["verdict"]["exit_code"], 1);
        assert_eq!(summary["stats"]["total"], 2);
        assert_eq!(summary["stats"]["failed"], 1);
        assert_eq!(summary["meta"]["timestamp"], "2026-02-05T19:30:00Z");

        let config_toml = std::fs::read_to_string(dir.join("config.toml")).unwrap();
        assert!(config_toml.contains("localhost:8080"));
        assert!(!config_toml.contains("secret"));

        let failures: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("failures.json")).unwrap())
                .unwrap();
        assert_eq!(failures["cases"][0]["case"], "store::inventory");
        assert_eq!(failures["cases"][0]["kind"], "contract_violation");
        assert_eq!(failures["cleanup"][0]["resource"], "pet 123456");
    }

    #[test]
    fn clean_run_has_no_failures_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::default();
        let mut report = sample_report();
        report.cases.truncate(1);
        report.cleanup_failures.clear();
        let verdict = VerdictPolicy::default().verdict(&report);
        let data = ReportData {
            config: &config,
            report: &report,
            verdict: &verdict,
            started_at: Utc::now(),
            duration_secs: 0.1,
        };

        let dir = save_report(&data, Some(tmp.path())).unwrap();
        assert!(dir.join("summary.json").exists());
        assert!(!dir.join("failures.json").exists());
    }
}
