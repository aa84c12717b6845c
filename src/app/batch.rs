// CtrlMend - app/batch.rs
//
// Batch driver: walks the rule set's category table in order and repairs
// every listed file. Never aborts; each file's result lands in the summary.
//
// Progress is reported through a callback so the binary can print lines
// as files are processed and tests can record them.

use crate::app::repair;
use crate::core::model::{BatchSummary, FileOutcome, FileStatus, RuleSet};
use std::path::{Path, PathBuf};

/// Options for one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Overrides the rule set's base directory.
    pub base_dir: Option<PathBuf>,
    /// Transform but do not write.
    pub dry_run: bool,
}

/// Progress notifications emitted by `run_batch`, in order.
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    CategoryStarted { category: &'a str },
    FileStarted { path: &'a Path },
    FileFinished(&'a FileOutcome),
}

/// Repair every file named by `rules`.
pub fn run_batch<F>(rules: &RuleSet, options: &BatchOptions, mut on_event: F) -> BatchSummary
where
    F: FnMut(BatchEvent<'_>),
{
    let base_dir = options
        .base_dir
        .clone()
        .unwrap_or_else(|| rules.base_dir.clone());

    tracing::info!(
        base_dir = %base_dir.display(),
        files = rules.file_count(),
        dry_run = options.dry_run,
        "Batch started"
    );

    let mut summary = BatchSummary::new(base_dir.clone(), options.dry_run);

    for category in &rules.categories {
        let category_dir = base_dir.join(&category.name);
        on_event(BatchEvent::CategoryStarted {
            category: &category.name,
        });

        for file_name in &category.files {
            let path = category_dir.join(file_name);

            let outcome = if path.exists() {
                on_event(BatchEvent::FileStarted { path: &path });
                repair::process_file(&path, rules, category, options.dry_run)
            } else {
                tracing::warn!(path = %path.display(), "File not found");
                FileOutcome {
                    category: category.name.clone(),
                    path: path.clone(),
                    status: FileStatus::Missing,
                }
            };

            on_event(BatchEvent::FileFinished(&outcome));
            summary.record(outcome);
        }
    }

    tracing::info!(
        success = summary.success_count,
        failed = summary.failed_count,
        "Batch complete"
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::{parse_rules_toml, validate_and_compile};

    fn fixture_rules() -> RuleSet {
        let toml = r#"
[project]
base_dir = "/nonexistent/ctrlmend-test"
package_root = "com.example"

[[category]]
name = "one"
prefix = "/api/one/"
files = ["A.java", "B.java"]

[[category]]
name = "two"
files = ["C.java"]
"#;
        parse_rules_toml(toml, Path::new("test.toml"))
            .and_then(validate_and_compile)
            .unwrap()
    }

    #[test]
    fn test_events_in_table_order_and_missing_counted() {
        let rules = fixture_rules();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("one")).unwrap();
        std::fs::write(dir.path().join("one").join("B.java"), "class B {}\n").unwrap();

        let options = BatchOptions {
            base_dir: Some(dir.path().to_path_buf()),
            dry_run: false,
        };
        let mut log = Vec::new();
        let summary = run_batch(&rules, &options, |event| {
            log.push(match event {
                BatchEvent::CategoryStarted { category } => format!("cat {category}"),
                BatchEvent::FileStarted { path } => {
                    format!("start {}", path.file_name().unwrap().to_string_lossy())
                }
                BatchEvent::FileFinished(o) => format!(
                    "done {} {}",
                    o.path.file_name().unwrap().to_string_lossy(),
                    o.status.is_success()
                ),
            });
        });

        assert_eq!(
            log,
            [
                "cat one",
                "done A.java false",
                "start B.java",
                "done B.java true",
                "cat two",
                "done C.java false",
            ]
        );
        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.failed_count, 2);
        assert_eq!(summary.base_dir, dir.path());
    }

    #[test]
    fn test_base_dir_defaults_to_rules() {
        let rules = fixture_rules();
        let summary = run_batch(&rules, &BatchOptions::default(), |_| {});
        assert_eq!(summary.base_dir, PathBuf::from("/nonexistent/ctrlmend-test"));
        assert_eq!(summary.failed_count, 3);
        assert!(summary
            .files
            .iter()
            .all(|f| f.status == FileStatus::Missing));
    }
}
