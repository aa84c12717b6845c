// CtrlMend - util/constants.rs
//
// Single source of truth for named constants, patterns, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "CtrlMend";

/// Application identifier used for config directories.
pub const APP_ID: &str = "CtrlMend";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Rule set limits
// =============================================================================

/// Maximum size of a rule set TOML file in bytes.
pub const MAX_RULES_FILE_SIZE: u64 = 1024 * 1024; // 1 MB

/// Maximum size of a single target file in bytes. Controller sources are
/// small; anything larger is almost certainly a wrong path.
pub const MAX_TARGET_FILE_SIZE: u64 = 16 * 1024 * 1024; // 16 MB

/// Display name used in error messages for the embedded rule set.
pub const BUILTIN_RULES_NAME: &str = "<builtin>/rules.toml";

// =============================================================================
// Annotation injection
// =============================================================================

/// Presence of this substring means the documentation imports are already there.
pub const IMPORT_GUARD: &str = "import io.swagger.v3.oas.annotations";

/// Declaration lines inserted after the package line, in order.
pub const IMPORT_LINES: &[&str] = &[
    "import io.swagger.v3.oas.annotations.Operation;",
    "import io.swagger.v3.oas.annotations.tags.Tag;",
];

/// Presence of this substring means the class already carries a tag.
pub const TAG_GUARD: &str = "@Tag(";

/// Class marker the tag annotation is placed above.
pub const TAG_ANCHOR_PATTERN: &str = r"@RestController";

/// Captures the controller class name.
pub const CLASS_NAME_PATTERN: &str = r"public class (\w+Controller)";

// =============================================================================
// Routing normalisation
// =============================================================================

/// Root segment every rewritten routing path starts with.
pub const ROUTE_ROOT: &str = "/api/";

/// Captures the path of a class-level routing declaration.
pub const ROUTE_PATTERN: &str = r#"@RequestMapping\("(/api/[^"]+)"\)"#;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
