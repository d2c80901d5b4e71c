//! Session state: working directory, append-only history, and the
//! submit loop that ties interpreter, predictor, and clock together.

use std::thread;
use std::time::Duration;

use mirage_types::{Clock, CommandMeta, CommandRecord, SessionConfig, SystemClock};
use mirage_vfs::{MemoryVfs, Vfs, seed_vfs};

use crate::interpreter::{CommandSet, ShellCtx};
use crate::latency::{DelaySource, NoDelay, UniformDelay};
use crate::predictor::Predictor;

/// What a submitted line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The line ran and a record was appended to history.
    Executed(CommandRecord),
    /// `clear` was intercepted: history wiped, nothing recorded.
    Cleared,
    /// Blank input; nothing happened.
    Empty,
    /// A command is already in flight; the line was dropped.
    Busy,
}

/// One interactive shell session.
pub struct Session {
    config: SessionConfig,
    vfs: Box<dyn Vfs>,
    commands: CommandSet,
    catalog: Vec<CommandMeta>,
    predictor: Predictor,
    clock: Box<dyn Clock>,
    delay: Box<dyn DelaySource>,
    cwd: String,
    history: Vec<CommandRecord>,
    executing: bool,
    next_id: u64,
}

impl Session {
    /// Session with the seeded VFS, the real clock, and the configured
    /// random latency.
    pub fn new(config: SessionConfig) -> Self {
        let delay = UniformDelay::new(config.latency_min_ms, config.latency_max_ms);
        Self::with_parts(config, seed_vfs(), Box::new(SystemClock), Box::new(delay))
    }

    /// Deterministic session for tests: injected clock, no latency.
    pub fn deterministic(config: SessionConfig, clock: Box<dyn Clock>) -> Self {
        Self::with_parts(config, seed_vfs(), clock, Box::new(NoDelay))
    }

    fn with_parts(
        config: SessionConfig,
        vfs: MemoryVfs,
        clock: Box<dyn Clock>,
        delay: Box<dyn DelaySource>,
    ) -> Self {
        let commands = CommandSet::with_builtins();
        let catalog = commands.catalog();
        let cwd = config.home_dir.clone();
        log::info!(
            "session start: user={} host={} commands={}",
            config.user,
            config.hostname,
            catalog.len()
        );
        Self {
            config,
            vfs: Box::new(vfs),
            commands,
            catalog,
            predictor: Predictor::new(),
            clock,
            delay,
            cwd,
            history: Vec::new(),
            executing: false,
            next_id: 0,
        }
    }

    /// Submit one raw input line.
    ///
    /// `clear` is intercepted before dispatch: it wipes the history and
    /// leaves the working directory alone. Everything else runs through
    /// the interpreter and lands in history, failures included.
    pub fn submit(&mut self, line: &str) -> SubmitOutcome {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.executing {
            log::warn!("submit dropped while executing: {trimmed}");
            return SubmitOutcome::Busy;
        }
        if trimmed == "clear" {
            self.history.clear();
            log::debug!("history cleared");
            return SubmitOutcome::Cleared;
        }

        self.executing = true;
        let pause = self.delay.next_delay();
        if pause > Duration::ZERO {
            thread::sleep(pause);
        }

        let now_millis = self.clock.now_millis();
        let directory_before = self.cwd.clone();
        let mut ctx = ShellCtx {
            cwd: self.cwd.clone(),
            vfs: self.vfs.as_ref(),
            history: &self.history,
            config: &self.config,
            catalog: &self.catalog,
            now_millis,
        };
        let result = self.commands.execute(trimmed, &mut ctx);
        self.cwd = result.cwd;

        self.next_id += 1;
        let record = CommandRecord {
            id: format!("cmd-{}", self.next_id),
            command: trimmed.to_string(),
            output: result.output,
            timestamp: now_millis,
            exit_code: result.exit_code,
            // The directory the command was typed in, not where it led.
            directory: directory_before,
        };
        self.history.push(record.clone());
        self.executing = false;
        SubmitOutcome::Executed(record)
    }

    /// Suggest a completion for a partial input line.
    ///
    /// Suppressed while a command is in flight.
    pub fn suggest(&self, partial: &str) -> Option<String> {
        if self.executing {
            return None;
        }
        self.predictor.suggest(partial, &self.history)
    }

    /// Wipe the history without touching the working directory.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn history(&self) -> &[CommandRecord] {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Sorted catalog of every registered command.
    pub fn catalog(&self) -> &[CommandMeta] {
        &self.catalog
    }

    /// The prompt string for the current state.
    pub fn prompt(&self) -> String {
        let cwd = if self.cwd == self.config.home_dir {
            "~".to_string()
        } else if let Some(rest) = self.cwd.strip_prefix(&self.config.home_dir) {
            format!("~{rest}")
        } else {
            self.cwd.clone()
        };
        format!("{}@{}:{cwd}$ ", self.config.user, self.config.hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirage_types::FixedClock;

    fn session() -> Session {
        Session::deterministic(SessionConfig::default(), Box::new(FixedClock(1_770_127_509_000)))
    }

    #[test]
    fn submit_records_output_and_exit_code() {
        let mut s = session();
        let SubmitOutcome::Executed(rec) = s.submit("pwd") else {
            panic!("expected execution");
        };
        assert_eq!(rec.output, "/home/user");
        assert_eq!(rec.exit_code, 0);
        assert_eq!(rec.id, "cmd-1");
        assert_eq!(rec.timestamp, 1_770_127_509_000);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn empty_input_is_not_recorded() {
        let mut s = session();
        assert_eq!(s.submit("   "), SubmitOutcome::Empty);
        assert!(s.history().is_empty());
    }

    #[test]
    fn cd_moves_and_record_keeps_origin() {
        let mut s = session();
        let SubmitOutcome::Executed(rec) = s.submit("cd projects") else {
            panic!("expected execution");
        };
        assert_eq!(s.cwd(), "/home/user/projects");
        assert_eq!(rec.directory, "/home/user");
    }

    #[test]
    fn failed_cd_leaves_cwd() {
        let mut s = session();
        let SubmitOutcome::Executed(rec) = s.submit("cd nowhere") else {
            panic!("expected execution");
        };
        assert_eq!(rec.exit_code, 1);
        assert_eq!(s.cwd(), "/home/user");
    }

    #[test]
    fn clear_wipes_history_and_keeps_cwd() {
        let mut s = session();
        s.submit("cd projects");
        s.submit("ls");
        assert_eq!(s.submit("clear"), SubmitOutcome::Cleared);
        assert!(s.history().is_empty());
        assert_eq!(s.cwd(), "/home/user/projects");
    }

    #[test]
    fn record_ids_are_sequential() {
        let mut s = session();
        s.submit("pwd");
        s.submit("ls");
        let ids: Vec<&str> = s.history().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["cmd-1", "cmd-2"]);
    }

    #[test]
    fn unknown_commands_are_recorded_too() {
        let mut s = session();
        let SubmitOutcome::Executed(rec) = s.submit("frobnicate") else {
            panic!("expected execution");
        };
        assert_eq!(rec.exit_code, 127);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn suggest_uses_session_history() {
        let mut s = session();
        assert_eq!(s.suggest("git"), None);
        s.submit("git status");
        // Even a failed command (git is not registered) informs the
        // predictor.
        assert_eq!(s.suggest("git"), Some("git add .".to_string()));
    }

    #[test]
    fn prompt_contracts_home() {
        let mut s = session();
        assert_eq!(s.prompt(), "user@webserver:~$ ");
        s.submit("cd projects");
        assert_eq!(s.prompt(), "user@webserver:~/projects$ ");
        s.submit("cd /var/log");
        assert_eq!(s.prompt(), "user@webserver:/var/log$ ");
    }

    #[test]
    fn history_command_sees_prior_records() {
        let mut s = session();
        s.submit("pwd");
        s.submit("ls");
        let SubmitOutcome::Executed(rec) = s.submit("history") else {
            panic!("expected execution");
        };
        assert_eq!(rec.output, "     1  pwd\n     2  ls");
    }
}
