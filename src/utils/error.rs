use thiserror::Error;

/// sysexits.h 的退出碼
pub const EX_OK: i32 = 0;
pub const EX_SOFTWARE: i32 = 70;
pub const EX_OSFILE: i32 = 72;
pub const EX_IOERR: i32 = 74;
pub const EX_CONFIG: i32 = 78;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to open file: {source}")]
    OpenOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write factor line: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Line {line_no} is not a factor line: {content:?}")]
    MalformedLine { line_no: usize, content: String },

    #[error("Line {line_no} is out of order: (i = {i}, j = {j}) follows (i = {prev_i}, j = {prev_j})")]
    OrderViolation {
        line_no: usize,
        prev_i: u64,
        prev_j: u64,
        i: u64,
        j: u64,
    },

    #[error("Line {line_no} claims {j} divides {i}")]
    NotAFactor { line_no: usize, i: u64, j: u64 },

    #[error("Line {line_no} has i = {i}, outside the bound 1..{upper_bound}")]
    ValueOutOfRange {
        line_no: usize,
        i: u64,
        upper_bound: u64,
    },

    #[error("Value {i} has {found} factor lines, expected {expected}")]
    DivisorCountMismatch { i: u64, expected: u64, found: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Output,
    Configuration,
    Verification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FixtureError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FixtureError::OpenOutput { .. } | FixtureError::Write { .. } | FixtureError::Io(_) => {
                ErrorCategory::Output
            }
            FixtureError::ConfigError { .. } | FixtureError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            FixtureError::MalformedLine { .. }
            | FixtureError::OrderViolation { .. }
            | FixtureError::NotAFactor { .. }
            | FixtureError::ValueOutOfRange { .. }
            | FixtureError::DivisorCountMismatch { .. } => ErrorCategory::Verification,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Output => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Verification => ErrorSeverity::Medium,
        }
    }

    /// 對應到 sysexits.h 的行程退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            FixtureError::OpenOutput { .. } => EX_OSFILE,
            FixtureError::Write { .. } | FixtureError::Io(_) => EX_IOERR,
            FixtureError::ConfigError { .. } | FixtureError::InvalidConfigValue { .. } => {
                EX_CONFIG
            }
            _ => EX_SOFTWARE,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FixtureError::OpenOutput { .. } => self.to_string(),
            FixtureError::Write { source } => format!("Writing the factors file failed: {}", source),
            FixtureError::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FixtureError::OpenOutput { path, .. } => format!(
                "Make sure the directory of '{}' exists and is writable",
                path
            ),
            FixtureError::Write { .. } | FixtureError::Io(_) => {
                "Check free disk space and filesystem permissions".to_string()
            }
            FixtureError::ConfigError { .. } | FixtureError::InvalidConfigValue { .. } => {
                "Fix the configuration file or command line flags and retry".to_string()
            }
            _ => "The factors file was not produced by a complete, uninterrupted run".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FixtureError>;
