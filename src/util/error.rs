// CtrlMend - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for failures that stop a CtrlMend run.
///
/// Per-file failures never reach this type; they are folded into
/// `FileStatus`. Config problems are downgraded to warnings.
#[derive(Debug)]
pub enum CtrlMendError {
    /// Rule set loading or validation failed.
    Rules(RulesError),

    /// Writing the batch report failed.
    Report(ReportError),
}

impl fmt::Display for CtrlMendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules(e) => write!(f, "Rule set error: {e}"),
            Self::Report(e) => write!(f, "Report error: {e}"),
        }
    }
}

impl std::error::Error for CtrlMendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rules(e) => Some(e),
            Self::Report(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule set errors
// ---------------------------------------------------------------------------

/// Errors related to rule set loading and validation.
#[derive(Debug)]
pub enum RulesError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Rule set file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is empty.
    MissingField { context: String, field: &'static str },

    /// Two categories share a name.
    DuplicateCategory { name: String },

    /// A garbled key is listed twice with different corrections.
    ConflictingCorrection {
        garbled: String,
        first: String,
        second: String,
    },

    /// A correction contains a garbled key, so correcting twice would
    /// not be a no-op.
    CorrectionReintroducesGarble { garbled: String, correction: String },

    /// A routing prefix is not of the form `/.../`.
    InvalidPrefix { category: String, prefix: String },

    /// A pattern built from the rule set is not a valid regex.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    /// I/O error reading a rule set file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Rule set '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { context, field } => {
                write!(f, "{context}: missing required field '{field}'")
            }
            Self::DuplicateCategory { name } => {
                write!(f, "Category '{name}' is defined more than once")
            }
            Self::ConflictingCorrection {
                garbled,
                first,
                second,
            } => write!(
                f,
                "Garbled text '{garbled}' maps to both '{first}' and '{second}'"
            ),
            Self::CorrectionReintroducesGarble {
                garbled,
                correction,
            } => write!(
                f,
                "Correction '{correction}' contains garbled text '{garbled}'"
            ),
            Self::InvalidPrefix { category, prefix } => write!(
                f,
                "Category '{category}': prefix '{prefix}' must start and end with '/'"
            ),
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid regex '{pattern}': {source}")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading rule set '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for RulesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::InvalidRegex { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RulesError> for CtrlMendError {
    fn from(e: RulesError) -> Self {
        Self::Rules(e)
    }
}

// ---------------------------------------------------------------------------
// Repair errors
// ---------------------------------------------------------------------------

/// Errors that fail a single target file. Never fatal to the batch.
#[derive(Debug)]
pub enum RepairError {
    /// The target file does not exist.
    NotFound { path: PathBuf },

    /// The target file is larger than the configured bound.
    FileTooLarge { path: PathBuf, size: u64, max_size: u64 },

    /// The target file could not be read.
    Read { path: PathBuf, source: io::Error },

    /// The target file is not valid UTF-8.
    InvalidEncoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// The repaired text could not be written back.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for RepairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "'{}' does not exist", path.display()),
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::Read { path, source } => {
                write!(f, "'{}': read failed: {source}", path.display())
            }
            Self::InvalidEncoding { path, source } => {
                write!(f, "'{}': invalid UTF-8 encoding: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "'{}': write failed: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for RepairError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors related to writing the batch report.
#[derive(Debug)]
pub enum ReportError {
    /// I/O error writing the report file.
    Io { path: PathBuf, source: io::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Report I/O error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON report error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ReportError> for CtrlMendError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors reading `config.toml`. Reported as warnings, never fatal.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Convenience type alias for CtrlMend results.
pub type Result<T> = std::result::Result<T, CtrlMendError>;
