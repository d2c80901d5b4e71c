//! Workflow predictor: partial input plus history in, one suggestion out.
//!
//! Pure lookup logic with no stored state. A static prefix table covers
//! the common single-command completions; a small set of history rules
//! covers two-step workflows (git staging chains, diagnose-then-trace).
//! A suggestion identical to the input is suppressed, since completing
//! to what was already typed helps nobody.

use mirage_types::CommandRecord;

/// Prefix table, scanned in order; the first entry whose key prefixes
/// the normalized input wins. More specific keys sit above their
/// general fallbacks.
const PREFIX_TABLE: &[(&str, &str)] = &[
    ("fin", "find . -name \"*.txt\" -type f"),
    ("gre", "grep -rn \"pattern\" ."),
    ("ls -", "ls -la"),
    ("cat r", "cat readme.txt"),
    ("cat .", "cat .bashrc"),
    ("cd p", "cd projects"),
    ("cd d", "cd Documents"),
    ("pin", "ping google.com"),
    ("cur", "curl -I https://example.com"),
    ("wge", "wget https://example.com/release.tar.gz"),
    ("ssh", "ssh user@remote-host"),
    ("scp", "scp file.txt user@remote-host:~/"),
    ("tar -c", "tar -czf backup.tar.gz ."),
    ("tar", "tar -xzf archive.tar.gz"),
    ("unz", "unzip archive.zip"),
    ("gzi", "gzip file.txt"),
    ("chm", "chmod 755 setup.sh"),
    ("cho", "chown user:user file.txt"),
    ("ps a", "ps aux"),
    ("kil", "kill -9 1630"),
    ("pgr", "pgrep nginx"),
    ("df -", "df -h"),
    ("du -", "du -sh ."),
    ("fre", "free -h"),
    ("una", "uname -a"),
    ("upt", "uptime"),
    ("his", "history"),
    ("ech", "echo hello"),
    ("mkd", "mkdir new-folder"),
    ("tou", "touch notes.txt"),
    ("hea", "head -n 10 readme.txt"),
    ("tai", "tail -n 20 /var/log/syslog"),
    ("wc -", "wc -l readme.txt"),
    ("net", "netstat -tulpn"),
    ("tra", "traceroute google.com"),
    ("nsl", "nslookup google.com"),
    ("dig", "dig example.com"),
    ("loc", "locate readme"),
    ("whi", "which python3"),
    ("sud", "sudo apt update"),
    ("sta", "stat readme.txt"),
    ("hos", "hostname"),
    ("dat", "date"),
    ("ifc", "ifconfig"),
    ("ip a", "ip addr"),
];

/// Stateless suggestion engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct Predictor;

impl Predictor {
    pub fn new() -> Self {
        Predictor
    }

    /// Suggest a completion for `input` given the session history.
    ///
    /// Returns `None` for inputs of two characters or fewer after
    /// trimming, when nothing matches, or when the match would simply
    /// restate the input.
    pub fn suggest(&self, input: &str, history: &[CommandRecord]) -> Option<String> {
        let normalized = input.trim().to_lowercase();
        if normalized.len() <= 2 {
            return None;
        }

        let suggestion = self
            .static_match(&normalized)
            .or_else(|| self.history_match(&normalized, history))?;

        // Never suggest exactly what was typed.
        if suggestion.eq_ignore_ascii_case(input.trim()) {
            return None;
        }
        Some(suggestion)
    }

    fn static_match(&self, normalized: &str) -> Option<String> {
        PREFIX_TABLE
            .iter()
            .find(|(key, _)| normalized.starts_with(key))
            .map(|(_, suggestion)| suggestion.to_string())
    }

    /// Two-step workflow rules keyed on substrings of the most recent
    /// command, so a `sudo` or similar prefix does not hide it.
    fn history_match(&self, normalized: &str, history: &[CommandRecord]) -> Option<String> {
        let last_raw = &history.last()?.command;
        let last = last_raw.to_lowercase();

        if last.contains("git status") && normalized.starts_with("git") {
            return Some("git add .".to_string());
        }
        if last.contains("git add") && normalized.starts_with("git") {
            return Some("git commit -m \"update\"".to_string());
        }
        if last.contains("git commit") && normalized.starts_with("git") {
            return Some("git push origin main".to_string());
        }
        if last.contains("ping") {
            if normalized.starts_with("tr") {
                return Some("traceroute google.com".to_string());
            }
            if normalized.starts_with("ns") {
                return Some("nslookup google.com".to_string());
            }
        }
        if last.contains("find") && normalized.starts_with("gr") {
            return Some("grep -rn \"pattern\" .".to_string());
        }
        // After mkdir, the next step is usually entering the new
        // directory; reuse the operand (original casing) from that
        // command.
        if normalized.starts_with("cd") {
            if let Some(dir) = last_raw.strip_prefix("mkdir ") {
                let dir = dir.split(' ').next_back().unwrap_or(dir);
                if !dir.is_empty() && !dir.starts_with('-') {
                    return Some(format!("cd {dir}"));
                }
            }
        }
        None
    }
}
