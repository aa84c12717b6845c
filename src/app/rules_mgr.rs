// CtrlMend - app/rules_mgr.rs
//
// Chooses and loads the rule set: a user-supplied TOML file when one is
// given, the built-in rule set otherwise.

use crate::core::model::RuleSet;
use crate::core::rules;
use crate::util::constants;
use crate::util::error::RulesError;
use std::path::Path;

/// Load the rule set from `rules_file`, or the built-in one when `None`.
pub fn load_rules(rules_file: Option<&Path>) -> Result<RuleSet, RulesError> {
    match rules_file {
        Some(path) => load_rules_file(path),
        None => rules::load_builtin_rules(),
    }
}

/// Read, validate, and compile a rule set TOML file.
pub fn load_rules_file(path: &Path) -> Result<RuleSet, RulesError> {
    let metadata = std::fs::metadata(path).map_err(|e| RulesError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > constants::MAX_RULES_FILE_SIZE {
        return Err(RulesError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_RULES_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| RulesError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rules = rules::parse_rules_toml(&content, path).and_then(rules::validate_and_compile)?;

    tracing::info!(
        path = %path.display(),
        corrections = rules.garbled.len(),
        categories = rules.categories.len(),
        files = rules.file_count(),
        "Loaded rule set"
    );

    Ok(rules)
}
