//! Error types for the mirage shell.
//!
//! Every handler failure is rendered into command output text plus an
//! exit code; nothing here ever reaches the UI as a raised fault.

/// Errors produced while executing an emulated command.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The command name matched no registered handler. Exit code 127.
    #[error("{0}: command not found\nType 'help' to see available commands.")]
    CommandNotFound(String),

    /// A required operand was absent (e.g. `cat` with no filename).
    #[error("{command}: missing {operand} operand")]
    MissingOperand {
        command: String,
        operand: String,
    },

    /// The named path does not exist in the virtual file system.
    #[error("{command}: {path}: No such file or directory")]
    NoSuchPath {
        command: String,
        path: String,
    },

    /// The arguments did not match the command's usage pattern.
    #[error("usage: {0}")]
    Usage(String),

    /// Utility-specific failure rendered verbatim (e.g. `chmod: invalid
    /// mode: 'xyz'`).
    #[error("{0}")]
    Message(String),

    /// Unexpected handler fault, contained and reported.
    #[error("Error executing command: {0}")]
    Internal(String),

    /// Session configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl ShellError {
    /// Shorthand for a missing-operand error.
    pub fn missing(command: &str, operand: &str) -> Self {
        ShellError::MissingOperand {
            command: command.to_string(),
            operand: operand.to_string(),
        }
    }

    /// Shorthand for a path-not-found error.
    pub fn no_such(command: &str, path: &str) -> Self {
        ShellError::NoSuchPath {
            command: command.to_string(),
            path: path.to_string(),
        }
    }

    /// The exit code this error surfaces as.
    ///
    /// Unknown commands are 127; every other failure is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::CommandNotFound(_) => 127,
            _ => 1,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_and_code() {
        let e = ShellError::CommandNotFound("frobnicate".into());
        let msg = format!("{e}");
        assert!(msg.contains("frobnicate: command not found"));
        assert!(msg.contains("help"));
        assert_eq!(e.exit_code(), 127);
    }

    #[test]
    fn missing_operand_display() {
        let e = ShellError::missing("cat", "file");
        assert_eq!(format!("{e}"), "cat: missing file operand");
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn no_such_path_display() {
        let e = ShellError::no_such("cat", "missing.txt");
        assert_eq!(format!("{e}"), "cat: missing.txt: No such file or directory");
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn message_displays_verbatim() {
        let e = ShellError::Message("chmod: invalid mode: 'xyz'".into());
        assert_eq!(format!("{e}"), "chmod: invalid mode: 'xyz'");
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn usage_display() {
        let e = ShellError::Usage("kill <pid>".into());
        assert_eq!(format!("{e}"), "usage: kill <pid>");
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn internal_display() {
        let e = ShellError::Internal("bad state".into());
        assert_eq!(format!("{e}"), "Error executing command: bad state");
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn config_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not [[[ valid").unwrap_err();
        let e: ShellError = toml_err.into();
        assert!(format!("{e}").contains("config error"));
    }

    #[test]
    fn result_alias() {
        let ok: Result<i32> = Ok(7);
        assert_eq!(ok.unwrap(), 7);
        let err: Result<i32> = Err(ShellError::Internal("x".into()));
        assert!(err.is_err());
    }
}
