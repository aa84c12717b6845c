// CtrlMend - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no platform
// dependencies. These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

// =============================================================================
// Rule set (compiled, validated lookup tables)
// =============================================================================

/// One corrupted sequence and the text it should have been.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarbledPair {
    pub garbled: String,
    pub correct: String,
}

/// Label and description written into a class-level tag annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub description: String,
}

/// A group of target files sharing a routing prefix and tag vocabulary.
#[derive(Debug, Clone)]
pub struct Category {
    /// Category name; also the subdirectory under the base directory.
    pub name: String,

    /// Routing prefix such as `/api/device/`. `None` disables path
    /// normalisation for this category.
    pub prefix: Option<String>,

    /// Target file names, processed in this order.
    pub files: Vec<String>,

    /// Tag annotations keyed by controller class name.
    pub tags: HashMap<String, TagInfo>,
}

impl Category {
    /// Tag configured for `class_name`, if any.
    pub fn tag_for(&self, class_name: &str) -> Option<&TagInfo> {
        self.tags.get(class_name)
    }
}

/// The complete, validated set of lookup tables driving a repair batch.
///
/// Built by `core::rules` from TOML; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Directory holding one subdirectory per category.
    pub base_dir: PathBuf,

    /// Java package root, e.g. `com.pura365.camera.controller`.
    pub package_root: String,

    /// Corrections in application order (longest garbled text first).
    pub garbled: Vec<GarbledPair>,

    /// Categories in processing order.
    pub categories: Vec<Category>,

    /// Matches `package <package_root>.<word>;`.
    pub package_pattern: Regex,
}

impl RuleSet {
    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Total number of target files across all categories.
    pub fn file_count(&self) -> usize {
        self.categories.iter().map(|c| c.files.len()).sum()
    }
}

// =============================================================================
// Repair results
// =============================================================================

/// What the transformation steps did to one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairStats {
    /// Number of garbled sequences replaced.
    pub garbled_replaced: usize,
    /// Whether the documentation imports were inserted.
    pub imports_added: bool,
    /// Whether a tag annotation was inserted.
    pub tag_added: bool,
    /// Number of routing declarations rewritten.
    pub routes_rewritten: usize,
}

impl RepairStats {
    /// True when at least one step modified the text.
    pub fn any(&self) -> bool {
        self.garbled_replaced > 0 || self.imports_added || self.tag_added || self.routes_rewritten > 0
    }
}

/// Per-file result of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// All steps ran and the text was written back (or would have been,
    /// in a dry run).
    Repaired { stats: RepairStats, changed: bool },
    /// The file does not exist.
    Missing,
    /// Reading, decoding, or writing failed.
    Failed { reason: String },
}

impl FileStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Repaired { .. })
    }
}

/// Outcome for one target file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub category: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Aggregate result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub generated_at: DateTime<Utc>,
    pub base_dir: PathBuf,
    pub dry_run: bool,
    pub success_count: usize,
    pub failed_count: usize,
    pub files: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn new(base_dir: PathBuf, dry_run: bool) -> Self {
        Self {
            generated_at: Utc::now(),
            base_dir,
            dry_run,
            success_count: 0,
            failed_count: 0,
            files: Vec::new(),
        }
    }

    /// Record one outcome and update the counters.
    pub fn record(&mut self, outcome: FileOutcome) {
        if outcome.status.is_success() {
            self.success_count += 1;
        } else {
            self.failed_count += 1;
        }
        self.files.push(outcome);
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count == 0
    }
}
