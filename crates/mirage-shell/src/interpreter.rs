//! Command trait, registry, and dispatch logic.
//!
//! The interpreter is a registry-based dispatch system: utilities
//! implement the `Command` trait and are registered by name. `execute`
//! tokenizes one input line, resolves the command name by exact match,
//! and converts every handler outcome (including errors) into an
//! `ExecutionResult` — nothing escapes to the caller as a fault.

use std::collections::HashMap;

use mirage_types::{Category, CommandMeta, CommandRecord, Result, SessionConfig, ShellError};
use mirage_vfs::Vfs;

/// Everything a handler may read, plus the working directory it may
/// reassign after validating the target.
pub struct ShellCtx<'a> {
    /// Current working directory. Handlers only assign this after
    /// confirming the new value is a valid VFS directory.
    pub cwd: String,
    /// The virtual file system.
    pub vfs: &'a dyn Vfs,
    /// Read-only view of the session history (for `history`).
    pub history: &'a [CommandRecord],
    /// Session parameters (user, hostname, home directory).
    pub config: &'a SessionConfig,
    /// The full command catalog (for `help`, `which`, `man`).
    pub catalog: &'a [CommandMeta],
    /// Timestamp of this submission, from the injected session clock.
    pub now_millis: u64,
}

/// A single emulated utility.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &'static str;

    /// One-line description for `help`.
    fn description(&self) -> &'static str;

    /// Usage string (e.g. `ls [-la] [path]`).
    fn usage(&self) -> &'static str;

    /// Catalog category for grouping in `help` output.
    fn category(&self) -> Category;

    /// Example invocations shown by `help <command>` and `man`.
    fn examples(&self) -> &'static [&'static str] {
        &[]
    }

    /// Execute with the given arguments. `Ok` text means exit code 0;
    /// any `ShellError` is rendered as output with its exit code.
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String>;
}

/// What one submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Plain text output, possibly empty or multi-line. No ANSI codes.
    pub output: String,
    /// 0 success, 1 utility error, 127 unknown command.
    pub exit_code: i32,
    /// Working directory after the command (differs only after `cd`).
    pub cwd: String,
}

/// Registry of emulated utilities with dispatch.
pub struct CommandSet {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl CommandSet {
    /// Create an empty command set.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Create a set with every built-in utility registered.
    pub fn with_builtins() -> Self {
        let mut set = Self::new();
        crate::register_builtins(&mut set);
        set
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name(), cmd);
    }

    /// Whether a name resolves to a registered handler.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Snapshot of the catalog metadata, sorted by name.
    ///
    /// Built once at session start; `help`, `which`, and `man` consume
    /// it through `ShellCtx` rather than reaching back into the set.
    pub fn catalog(&self) -> Vec<CommandMeta> {
        let mut metas: Vec<CommandMeta> = self
            .commands
            .values()
            .map(|c| CommandMeta {
                name: c.name().to_string(),
                description: c.description().to_string(),
                category: c.category(),
                usage: c.usage().to_string(),
                examples: c.examples().iter().map(|e| e.to_string()).collect(),
            })
            .collect();
        metas.sort_by(|a, b| a.name.cmp(&b.name));
        metas
    }

    /// Execute one trimmed, non-empty command line.
    ///
    /// Tokens are produced by splitting on single spaces; consecutive
    /// spaces yield empty tokens, which handlers treat as absent
    /// operands. Command names match exactly and case-sensitively.
    pub fn execute(&self, line: &str, ctx: &mut ShellCtx<'_>) -> ExecutionResult {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ExecutionResult {
                output: String::new(),
                exit_code: 0,
                cwd: ctx.cwd.clone(),
            };
        }

        let tokens: Vec<&str> = trimmed.split(' ').collect();
        let name = tokens[0];

        match self.commands.get(name) {
            Some(cmd) => {
                log::debug!("dispatch {name} ({} args)", tokens.len() - 1);
                match cmd.execute(&tokens[1..], ctx) {
                    Ok(output) => ExecutionResult {
                        output,
                        exit_code: 0,
                        cwd: ctx.cwd.clone(),
                    },
                    Err(e) => ExecutionResult {
                        output: e.to_string(),
                        exit_code: e.exit_code(),
                        cwd: ctx.cwd.clone(),
                    },
                }
            },
            None => {
                log::warn!("unknown command: {name}");
                let e = ShellError::CommandNotFound(name.to_string());
                ExecutionResult {
                    output: e.to_string(),
                    exit_code: e.exit_code(),
                    cwd: ctx.cwd.clone(),
                }
            },
        }
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Parent of an absolute path: strip the last segment, staying at root.
pub fn parent_of(path: &str) -> String {
    if path == "/" {
        return "/".to_string();
    }
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => path[..i].to_string(),
    }
}

/// Join an operand onto the working directory: absolute operands are
/// used verbatim, relative ones are appended.
pub fn join_path(cwd: &str, operand: &str) -> String {
    if operand.starts_with('/') {
        operand.to_string()
    } else if cwd == "/" {
        format!("/{operand}")
    } else {
        format!("{cwd}/{operand}")
    }
}

/// Resolve the target of `cd` per the navigation policy: no argument or
/// `~` is home, `..` is the parent of the current directory, absolute
/// targets are verbatim, relative targets are appended.
pub fn cd_target(cwd: &str, operand: Option<&str>, home: &str) -> String {
    match operand {
        None | Some("") | Some("~") => home.to_string(),
        Some("..") => parent_of(cwd),
        Some(p) => join_path(cwd, p),
    }
}

/// Scan tokens for `flag` and parse the following token as a number,
/// silently falling back to `default` when absent or unparseable.
pub(crate) fn flag_number(args: &[&str], flag: &str, default: u32) -> u32 {
    let mut iter = args.iter();
    while let Some(tok) = iter.next() {
        if *tok == flag {
            return iter
                .next()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default);
        }
    }
    default
}

/// First token that is neither empty nor a `-` flag, skipping values
/// that follow known value-taking flags.
pub(crate) fn first_operand<'a>(args: &'a [&'a str], value_flags: &[&str]) -> Option<&'a str> {
    let mut skip_next = false;
    for tok in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if value_flags.contains(tok) {
            skip_next = true;
            continue;
        }
        if tok.is_empty() || tok.starts_with('-') {
            continue;
        }
        return Some(tok);
    }
    None
}
