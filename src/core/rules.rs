// CtrlMend - core/rules.rs
//
// Rule set parsing, validation, and compilation.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::rules_mgr which feeds content here.

use crate::core::model::{Category, GarbledPair, RuleSet, TagInfo};
use crate::util::constants;
use crate::util::error::RulesError;
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw TOML rule set as deserialized from a .toml file.
/// This is validated and compiled into a `RuleSet` for runtime use.
#[derive(Debug, Deserialize)]
pub struct RulesDefinition {
    pub project: ProjectDef,
    #[serde(default)]
    pub garbled: Vec<GarbledDef>,
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryDef>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectDef {
    #[serde(default)]
    pub base_dir: String,
    pub package_root: String,
}

#[derive(Debug, Deserialize)]
pub struct GarbledDef {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, rename = "tag")]
    pub tags: Vec<TagDef>,
}

#[derive(Debug, Deserialize)]
pub struct TagDef {
    pub class: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Validation and compilation
// =============================================================================

/// Parse a TOML string into a `RulesDefinition`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_rules_toml(
    toml_content: &str,
    source_path: &Path,
) -> Result<RulesDefinition, RulesError> {
    toml::from_str(toml_content).map_err(|e| RulesError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Validate a `RulesDefinition` and compile it into a runtime `RuleSet`.
///
/// Validates:
/// - Required fields are present and non-empty
/// - Category names are unique and prefixes look like `/.../`
/// - No garbled key maps to two different corrections
/// - No correction contains a garbled key, so correcting is idempotent
///
/// Garbled pairs come out ordered longest-first; ties keep table order.
pub fn validate_and_compile(def: RulesDefinition) -> Result<RuleSet, RulesError> {
    if def.project.package_root.trim().is_empty() {
        return Err(RulesError::MissingField {
            context: "[project]".to_string(),
            field: "package_root",
        });
    }

    let garbled = compile_garbled(def.garbled)?;

    let mut seen = HashSet::new();
    let mut categories = Vec::with_capacity(def.categories.len());
    for cat in def.categories {
        if cat.name.is_empty() {
            return Err(RulesError::MissingField {
                context: "[[category]]".to_string(),
                field: "name",
            });
        }
        if !seen.insert(cat.name.clone()) {
            return Err(RulesError::DuplicateCategory { name: cat.name });
        }
        categories.push(compile_category(cat)?);
    }

    let package_pattern = compile_regex(&format!(
        r"package {}\.\w+;",
        regex::escape(def.project.package_root.trim())
    ))?;

    Ok(RuleSet {
        base_dir: PathBuf::from(def.project.base_dir),
        package_root: def.project.package_root.trim().to_string(),
        garbled,
        categories,
        package_pattern,
    })
}

fn compile_garbled(defs: Vec<GarbledDef>) -> Result<Vec<GarbledPair>, RulesError> {
    let mut pairs: Vec<GarbledPair> = Vec::with_capacity(defs.len());

    for def in defs {
        if def.from.is_empty() {
            return Err(RulesError::MissingField {
                context: format!("[[garbled]] to = \"{}\"", def.to),
                field: "from",
            });
        }
        if let Some(existing) = pairs.iter().find(|p| p.garbled == def.from) {
            if existing.correct != def.to {
                return Err(RulesError::ConflictingCorrection {
                    garbled: def.from,
                    first: existing.correct.clone(),
                    second: def.to,
                });
            }
            tracing::warn!(garbled = %def.from, "Duplicate garbled entry ignored");
            continue;
        }
        pairs.push(GarbledPair {
            garbled: def.from,
            correct: def.to,
        });
    }

    for pair in &pairs {
        if let Some(hit) = pairs.iter().find(|p| pair.correct.contains(p.garbled.as_str())) {
            return Err(RulesError::CorrectionReintroducesGarble {
                garbled: hit.garbled.clone(),
                correction: pair.correct.clone(),
            });
        }
    }

    // Stable sort: a short key that occurs inside a longer one must not
    // break the longer key up before it gets a chance to match.
    pairs.sort_by(|a, b| b.garbled.len().cmp(&a.garbled.len()));
    Ok(pairs)
}

fn compile_category(def: CategoryDef) -> Result<Category, RulesError> {
    if let Some(ref prefix) = def.prefix {
        if !prefix.starts_with('/') || !prefix.ends_with('/') {
            return Err(RulesError::InvalidPrefix {
                category: def.name,
                prefix: prefix.clone(),
            });
        }
    }

    let mut tags = HashMap::with_capacity(def.tags.len());
    for tag in def.tags {
        if tag.class.is_empty() || tag.name.is_empty() {
            return Err(RulesError::MissingField {
                context: format!("category '{}' tag", def.name),
                field: if tag.class.is_empty() { "class" } else { "name" },
            });
        }
        if tags.contains_key(&tag.class) {
            tracing::warn!(
                category = %def.name,
                class = %tag.class,
                "Duplicate tag entry; the later one wins"
            );
        }
        tags.insert(
            tag.class,
            TagInfo {
                name: tag.name,
                description: tag.description,
            },
        );
    }

    Ok(Category {
        name: def.name,
        prefix: def.prefix,
        files: def.files,
        tags,
    })
}

fn compile_regex(pattern: &str) -> Result<Regex, RulesError> {
    Regex::new(pattern).map_err(|e| RulesError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

// =============================================================================
// Built-in rule set (embedded at compile time)
// =============================================================================

/// Embedded TOML content for the built-in rule set.
pub fn builtin_rules_source() -> &'static str {
    include_str!("../../rules/builtin.toml")
}

/// Load and validate the built-in rule set.
pub fn load_builtin_rules() -> Result<RuleSet, RulesError> {
    let path = PathBuf::from(constants::BUILTIN_RULES_NAME);
    let rules = parse_rules_toml(builtin_rules_source(), &path).and_then(validate_and_compile)?;
    tracing::debug!(
        corrections = rules.garbled.len(),
        categories = rules.categories.len(),
        files = rules.file_count(),
        "Loaded built-in rule set"
    );
    Ok(rules)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RULES_TOML: &str = r#"
[project]
base_dir = "/srv/controllers"
package_root = "com.example.web"

[[garbled]]
from = "short"
to = "S"

[[garbled]]
from = "a longer short"
to = "L"

[[category]]
name = "admin"
prefix = "/api/admin/"
files = ["VendorController.java"]

[[category.tag]]
class = "VendorController"
name = "Vendors"
description = "Vendor management"

[[category]]
name = "misc"
files = ["MiscController.java"]
"#;

    fn compile(toml: &str) -> Result<RuleSet, RulesError> {
        parse_rules_toml(toml, Path::new("test.toml")).and_then(validate_and_compile)
    }

    #[test]
    fn test_compile_valid_rules() {
        let rules = compile(VALID_RULES_TOML).unwrap();
        assert_eq!(rules.base_dir, PathBuf::from("/srv/controllers"));
        assert_eq!(rules.package_root, "com.example.web");
        assert_eq!(rules.categories.len(), 2);
        assert_eq!(rules.file_count(), 2);

        let admin = rules.category("admin").unwrap();
        assert_eq!(admin.prefix.as_deref(), Some("/api/admin/"));
        assert_eq!(admin.tag_for("VendorController").unwrap().name, "Vendors");
        assert!(rules.category("misc").unwrap().prefix.is_none());
    }

    #[test]
    fn test_garbled_sorted_longest_first() {
        let rules = compile(VALID_RULES_TOML).unwrap();
        assert_eq!(rules.garbled[0].garbled, "a longer short");
        assert_eq!(rules.garbled[1].garbled, "short");
    }

    #[test]
    fn test_package_pattern_escapes_dots() {
        let rules = compile(VALID_RULES_TOML).unwrap();
        assert!(rules.package_pattern.is_match("package com.example.web.admin;"));
        assert!(!rules.package_pattern.is_match("package comXexample.web.admin;"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let toml = r#"
[project]
package_root = "com.example"

[[category]]
name = "app"

[[category]]
name = "app"
"#;
        assert!(matches!(
            compile(toml).unwrap_err(),
            RulesError::DuplicateCategory { .. }
        ));
    }

    #[test]
    fn test_conflicting_correction_rejected() {
        let toml = r#"
[project]
package_root = "com.example"

[[garbled]]
from = "x"
to = "one"

[[garbled]]
from = "x"
to = "two"
"#;
        assert!(matches!(
            compile(toml).unwrap_err(),
            RulesError::ConflictingCorrection { .. }
        ));
    }

    #[test]
    fn test_identical_duplicate_is_dropped() {
        let toml = r#"
[project]
package_root = "com.example"

[[garbled]]
from = "x"
to = "y"

[[garbled]]
from = "x"
to = "y"
"#;
        assert_eq!(compile(toml).unwrap().garbled.len(), 1);
    }

    #[test]
    fn test_correction_containing_garble_rejected() {
        let toml = r#"
[project]
package_root = "com.example"

[[garbled]]
from = "bad"
to = "still bad"
"#;
        assert!(matches!(
            compile(toml).unwrap_err(),
            RulesError::CorrectionReintroducesGarble { .. }
        ));
    }

    #[test]
    fn test_empty_garbled_key_rejected() {
        let toml = r#"
[project]
package_root = "com.example"

[[garbled]]
from = ""
to = "anything"
"#;
        match compile(toml).unwrap_err() {
            RulesError::MissingField { field, .. } => assert_eq!(field, "from"),
            other => panic!("Expected MissingField, got: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let toml = r#"
[project]
package_root = "com.example"

[[category]]
name = "device"
prefix = "/api/device"
"#;
        assert!(matches!(
            compile(toml).unwrap_err(),
            RulesError::InvalidPrefix { .. }
        ));
    }

    #[test]
    fn test_missing_package_root_rejected() {
        let toml = r#"
[project]
package_root = "  "
"#;
        match compile(toml).unwrap_err() {
            RulesError::MissingField { field, .. } => assert_eq!(field, "package_root"),
            other => panic!("Expected MissingField, got: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_toml_reports_path() {
        let err = compile("[project").unwrap_err();
        match err {
            RulesError::TomlParse { path, .. } => assert_eq!(path, PathBuf::from("test.toml")),
            other => panic!("Expected TomlParse, got: {other:?}"),
        }
    }

    #[test]
    fn test_load_builtin_rules() {
        let rules = load_builtin_rules().unwrap();
        let names: Vec<_> = rules.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["admin", "app", "device", "internal"]);
        assert_eq!(rules.file_count(), 19);
        assert_eq!(
            rules.category("device").unwrap().prefix.as_deref(),
            Some("/api/device/")
        );
        assert!(rules
            .garbled
            .iter()
            .any(|p| p.garbled == "绀轰緥锛?" && p.correct == "示例:"));
        assert_eq!(
            rules
                .category("admin")
                .unwrap()
                .tag_for("VendorController")
                .unwrap()
                .description,
            "经销商信息管理相关接口"
        );
    }
}
