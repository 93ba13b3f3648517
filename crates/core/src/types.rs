use thiserror::Error;

/// Exit code reported for configuration and resolution errors.
pub const RESOLUTION_EXIT_CODE: i32 = 125;

/// Exit code reported when the run is interrupted (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// The main error type for phony operations
#[derive(Debug, Error)]
pub enum PhonyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Target '{0}' is defined more than once")]
    DuplicateTarget(String),

    #[error("Target '{name}' not found{}", required_by_suffix(.required_by.as_deref()))]
    UnknownTarget {
        name: String,
        required_by: Option<String>,
    },

    #[error("Circular dependency detected: {}", .path.join(" -> "))]
    CyclicDependency { path: Vec<String> },

    #[error("Command '{command}' in target '{target}' failed with exit code {code}")]
    CommandFailure {
        target: String,
        command: String,
        code: i32,
    },

    #[error("Failed to execute command '{command}' in target '{target}': {source}")]
    Spawn {
        target: String,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Interrupted while running target '{target}'")]
    Interrupted { target: String },
}

impl PhonyError {
    /// Process exit code the CLI should report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PhonyError::CommandFailure { code, .. } => *code,
            PhonyError::Interrupted { .. } => INTERRUPTED_EXIT_CODE,
            PhonyError::Spawn { .. } => 1,
            PhonyError::Io(_)
            | PhonyError::Yaml(_)
            | PhonyError::Config(_)
            | PhonyError::DuplicateTarget(_)
            | PhonyError::UnknownTarget { .. }
            | PhonyError::CyclicDependency { .. } => RESOLUTION_EXIT_CODE,
        }
    }
}

fn required_by_suffix(required_by: Option<&str>) -> String {
    match required_by {
        Some(parent) => format!(" (required by '{}')", parent),
        None => String::new(),
    }
}

/// Result type alias for phony operations
pub type PhonyResult<T> = Result<T, PhonyError>;
