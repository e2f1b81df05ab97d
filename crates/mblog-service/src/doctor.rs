use anyhow::{anyhow, Result};
use tracing::warn;

use mblog_storage::Storage;
use mblog_validate::{has_failures, run_rules, Finding, Severity};

/// Load a snapshot and sweep the validation rules over it. Warn findings
/// are logged and returned; Fail findings abort.
pub fn doctor(storage: &dyn Storage) -> Result<Vec<Finding>> {
    let snapshot = storage.load_snapshot()?;
    let findings = run_rules(&snapshot);

    for f in findings.iter().filter(|f| f.severity == Severity::Warn) {
        warn!(rule = %f.rule_id, "{}", f.message);
    }

    if has_failures(&findings) {
        let msgs: Vec<&str> = findings
            .iter()
            .filter(|f| f.severity == Severity::Fail)
            .map(|f| f.message.as_str())
            .collect();
        return Err(anyhow!("data check failed: {}", msgs.join("; ")));
    }

    Ok(findings)
}
