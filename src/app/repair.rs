// CtrlMend - app/repair.rs
//
// Single-file repair: read, transform, write back. This is the failure
// isolation boundary; every error is returned as a `FileStatus`, never
// propagated to the batch.

use crate::core::model::{Category, FileOutcome, FileStatus, RepairStats, RuleSet};
use crate::core::pipeline;
use crate::platform::fs;
use crate::util::error::RepairError;
use std::path::Path;

/// Repair one file in place and report what changed.
///
/// With `dry_run` the transformed text is discarded instead of written.
/// The text is written back even when no step changed it.
pub fn repair_file(
    path: &Path,
    rules: &RuleSet,
    category: &Category,
    dry_run: bool,
) -> Result<(RepairStats, bool), RepairError> {
    let original = fs::read_text(path)?;
    let (repaired, stats) = pipeline::repair_text(&original, rules, category);
    let changed = repaired != original;

    tracing::debug!(
        path = %path.display(),
        garbled = stats.garbled_replaced,
        imports = stats.imports_added,
        tag = stats.tag_added,
        routes = stats.routes_rewritten,
        changed,
        "Repair steps applied"
    );

    if !dry_run {
        fs::write_text(path, &repaired)?;
    }

    Ok((stats, changed))
}

/// Run `repair_file` and fold the result into a `FileOutcome`.
pub fn process_file(
    path: &Path,
    rules: &RuleSet,
    category: &Category,
    dry_run: bool,
) -> FileOutcome {
    let status = match repair_file(path, rules, category, dry_run) {
        Ok((stats, changed)) => FileStatus::Repaired { stats, changed },
        Err(RepairError::NotFound { .. }) => {
            tracing::warn!(path = %path.display(), "File not found");
            FileStatus::Missing
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "File repair failed");
            FileStatus::Failed {
                reason: e.to_string(),
            }
        }
    };

    FileOutcome {
        category: category.name.clone(),
        path: path.to_path_buf(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::load_builtin_rules;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    const DEVICE_SOURCE: &str = "package com.pura365.camera.controller.device;\n\n\
@RestController\n@RequestMapping(\"/api/old/list\")\npublic class WifiController {\n}\n";

    #[test]
    fn test_repair_writes_back() {
        let rules = load_builtin_rules().unwrap();
        let device = rules.category("device").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("WifiController.java");
        std::fs::write(&path, DEVICE_SOURCE).unwrap();

        let (stats, changed) = repair_file(&path, &rules, device, false).unwrap();
        assert!(changed);
        assert!(stats.tag_added);
        assert_eq!(stats.routes_rewritten, 1);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("@RequestMapping(\"/api/device/list\")"));
        assert!(written.contains("@Tag(name = \"WiFi管理\", description = \"WiFi配置相关接口\")"));
    }

    #[test]
    fn test_dry_run_leaves_file_alone() {
        let rules = load_builtin_rules().unwrap();
        let device = rules.category("device").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("WifiController.java");
        std::fs::write(&path, DEVICE_SOURCE).unwrap();

        let outcome = process_file(&path, &rules, device, true);
        assert!(matches!(
            outcome.status,
            FileStatus::Repaired { changed: true, .. }
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEVICE_SOURCE);
    }

    #[test]
    fn test_missing_file_outcome() {
        let rules = load_builtin_rules().unwrap();
        let device = rules.category("device").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let outcome = process_file(&dir.path().join("Nope.java"), &rules, device, false);
        assert_eq!(outcome.status, FileStatus::Missing);
        assert_eq!(outcome.category, "device");
    }

    #[test]
    fn test_missing_file_is_logged_with_path() {
        let rules = load_builtin_rules().unwrap();
        let device = rules.category("device").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Vanished.java");

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let outcome = tracing::subscriber::with_default(subscriber, || {
            process_file(&path, &rules, device, false)
        });

        assert_eq!(outcome.status, FileStatus::Missing);
        let text = log.text();
        assert!(text.contains("WARN"), "{text}");
        assert!(text.contains("File not found"), "{text}");
        assert!(text.contains("Vanished.java"), "{text}");
    }

    #[test]
    fn test_invalid_encoding_outcome() {
        let rules = load_builtin_rules().unwrap();
        let device = rules.category("device").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bad.java");
        std::fs::write(&path, b"\xc3\x28").unwrap();

        let outcome = process_file(&path, &rules, device, false);
        match outcome.status {
            FileStatus::Failed { reason } => assert!(reason.contains("UTF-8"), "{reason}"),
            other => panic!("Expected Failed, got: {other:?}"),
        }
    }
}
