//! The immutable record of one executed command.

use serde::{Deserialize, Serialize};

/// One executed command and its result, as appended to session history.
///
/// Records are immutable once created: the session appends exactly one per
/// accepted non-empty, non-`clear` submission and never mutates or deletes
/// them individually (only a full `clear` empties the history).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Unique id within the session.
    pub id: String,
    /// The raw input text as typed.
    pub command: String,
    /// Output text, possibly empty or multi-line. Plain text, no ANSI.
    pub output: String,
    /// Milliseconds since the Unix epoch, from the session clock.
    pub timestamp: u64,
    /// 0 on success, 1 for operand/not-found errors, 127 for unknown commands.
    pub exit_code: i32,
    /// Working directory at the time of execution.
    pub directory: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CommandRecord {
        CommandRecord {
            id: "cmd-1".into(),
            command: "pwd".into(),
            output: "/home/user".into(),
            timestamp: 1_700_000_000_000,
            exit_code: 0,
            directory: "/home/user".into(),
        }
    }

    #[test]
    fn json_round_trip() {
        let rec = sample();
        let json = serde_json::to_string(&rec).unwrap();
        let back: CommandRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }

    #[test]
    fn json_exposes_ui_fields() {
        let json = serde_json::to_string(&sample()).unwrap();
        for field in ["command", "output", "timestamp", "exit_code"] {
            assert!(json.contains(field), "missing field {field}");
        }
    }
}
