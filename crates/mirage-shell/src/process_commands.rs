//! Process management commands over a fixed fake process table.
//!
//! The table is a constant: signals are accepted or rejected by pid
//! validation alone and nothing is ever actually terminated.

use mirage_types::{Category, Result, ShellError};

use crate::interpreter::{Command, ShellCtx};
use crate::system_commands::format_clock;

/// One row of the emulated process table.
struct Proc {
    pid: u32,
    user: &'static str,
    cpu: &'static str,
    mem: &'static str,
    command: &'static str,
}

/// Name of a process as matched by killall/pgrep/pkill.
fn proc_name(p: &Proc) -> &'static str {
    p.command
        .split(' ')
        .next()
        .unwrap_or(p.command)
        .rsplit('/')
        .next()
        .unwrap_or(p.command)
        .trim_end_matches(':')
}

const PROC_TABLE: [Proc; 8] = [
    Proc { pid: 1, user: "root", cpu: "0.0", mem: "0.4", command: "/sbin/init" },
    Proc { pid: 812, user: "root", cpu: "0.0", mem: "0.2", command: "/usr/sbin/sshd -D" },
    Proc { pid: 980, user: "www-data", cpu: "0.3", mem: "1.8", command: "nginx: worker process" },
    Proc { pid: 981, user: "root", cpu: "0.0", mem: "0.9", command: "nginx: master process" },
    Proc { pid: 1204, user: "postgres", cpu: "0.5", mem: "4.2", command: "postgres -D /var/lib/postgresql" },
    Proc { pid: 1630, user: "user", cpu: "1.2", mem: "3.1", command: "node server.js" },
    Proc { pid: 1888, user: "user", cpu: "0.8", mem: "2.4", command: "python3 worker.py" },
    Proc { pid: 2101, user: "user", cpu: "0.0", mem: "0.1", command: "bash" },
];

// ---------------------------------------------------------------------------
// ps / top / htop
// ---------------------------------------------------------------------------

struct PsCmd;
impl Command for PsCmd {
    fn name(&self) -> &'static str {
        "ps"
    }
    fn description(&self) -> &'static str {
        "Show running processes"
    }
    fn usage(&self) -> &'static str {
        "ps [aux]"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn examples(&self) -> &'static [&'static str] {
        &["ps aux"]
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let full = args.iter().any(|a| matches!(*a, "aux" | "-aux" | "-ef"));
        if !full {
            let mut lines = vec!["    PID TTY          TIME CMD".to_string()];
            for p in PROC_TABLE.iter().filter(|p| p.user == "user") {
                lines.push(format!("{:>7} pts/0    00:00:00 {}", p.pid, proc_name(p)));
            }
            return Ok(lines.join("\n"));
        }
        let mut lines =
            vec!["USER         PID %CPU %MEM COMMAND".to_string()];
        for p in &PROC_TABLE {
            lines.push(format!(
                "{:<10} {:>5} {:>4} {:>4} {}",
                p.user, p.pid, p.cpu, p.mem, p.command
            ));
        }
        Ok(lines.join("\n"))
    }
}

struct TopCmd;
impl Command for TopCmd {
    fn name(&self) -> &'static str {
        "top"
    }
    fn description(&self) -> &'static str {
        "Show process activity (single snapshot)"
    }
    fn usage(&self) -> &'static str {
        "top"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let mut lines = vec![
            format!(
                "top - {} up 12 days,  3:42,  1 user,  load average: 0.08, 0.12, 0.09",
                format_clock(ctx.now_millis)
            ),
            "Tasks:   8 total,   1 running,   7 sleeping".to_string(),
            "%Cpu(s):  2.1 us,  0.7 sy,  0.0 ni, 97.0 id".to_string(),
            "MiB Mem :   7954.3 total,   3277.1 free,   2150.0 used,   2527.2 buff/cache".to_string(),
            String::new(),
            "    PID USER      %CPU %MEM COMMAND".to_string(),
        ];
        for p in &PROC_TABLE {
            lines.push(format!(
                "{:>7} {:<9} {:>4} {:>4} {}",
                p.pid, p.user, p.cpu, p.mem, proc_name(p)
            ));
        }
        Ok(lines.join("\n"))
    }
}

struct HtopCmd;
impl Command for HtopCmd {
    fn name(&self) -> &'static str {
        "htop"
    }
    fn description(&self) -> &'static str {
        "Interactive process viewer (emulated as a snapshot)"
    }
    fn usage(&self) -> &'static str {
        "htop"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        TopCmd.execute(args, ctx)
    }
}

// ---------------------------------------------------------------------------
// Signals: kill / killall / pkill / pgrep
// ---------------------------------------------------------------------------

struct KillCmd;
impl Command for KillCmd {
    fn name(&self) -> &'static str {
        "kill"
    }
    fn description(&self) -> &'static str {
        "Send a signal to a process (simulated)"
    }
    fn usage(&self) -> &'static str {
        "kill [-9] <pid>"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operand = args
            .iter()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .ok_or_else(|| ShellError::Usage("kill [-9] <pid>".into()))?;
        let pid: u32 = operand
            .parse()
            .map_err(|_| ShellError::Message(format!("kill: {operand}: arguments must be process or job IDs")))?;
        if PROC_TABLE.iter().any(|p| p.pid == pid) {
            Ok(String::new())
        } else {
            Err(ShellError::Message(format!("kill: ({pid}) - No such process")))
        }
    }
}

struct KillallCmd;
impl Command for KillallCmd {
    fn name(&self) -> &'static str {
        "killall"
    }
    fn description(&self) -> &'static str {
        "Signal processes by name (simulated)"
    }
    fn usage(&self) -> &'static str {
        "killall <name>"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let name = args
            .iter()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .ok_or_else(|| ShellError::Usage("killall <name>".into()))?;
        if PROC_TABLE.iter().any(|p| proc_name(p) == *name) {
            Ok(String::new())
        } else {
            Err(ShellError::Message(format!("{name}: no process found")))
        }
    }
}

struct PgrepCmd;
impl Command for PgrepCmd {
    fn name(&self) -> &'static str {
        "pgrep"
    }
    fn description(&self) -> &'static str {
        "List process IDs matching a name"
    }
    fn usage(&self) -> &'static str {
        "pgrep <name>"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let name = args
            .iter()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .ok_or_else(|| ShellError::Usage("pgrep <name>".into()))?;
        let pids: Vec<String> = PROC_TABLE
            .iter()
            .filter(|p| proc_name(p).contains(name))
            .map(|p| p.pid.to_string())
            .collect();
        if pids.is_empty() {
            // pgrep prints nothing and exits 1 on no match.
            Err(ShellError::Message(String::new()))
        } else {
            Ok(pids.join("\n"))
        }
    }
}

struct PkillCmd;
impl Command for PkillCmd {
    fn name(&self) -> &'static str {
        "pkill"
    }
    fn description(&self) -> &'static str {
        "Signal processes matching a name (simulated)"
    }
    fn usage(&self) -> &'static str {
        "pkill <name>"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let name = args
            .iter()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .ok_or_else(|| ShellError::Usage("pkill <name>".into()))?;
        if PROC_TABLE.iter().any(|p| proc_name(p).contains(name)) {
            Ok(String::new())
        } else {
            Err(ShellError::Message(String::new()))
        }
    }
}

// ---------------------------------------------------------------------------
// jobs / nice / nohup / lsof
// ---------------------------------------------------------------------------

struct JobsCmd;
impl Command for JobsCmd {
    fn name(&self) -> &'static str {
        "jobs"
    }
    fn description(&self) -> &'static str {
        "List shell jobs"
    }
    fn usage(&self) -> &'static str {
        "jobs"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        // No job control in the emulated shell.
        Ok(String::new())
    }
}

struct NiceCmd;
impl Command for NiceCmd {
    fn name(&self) -> &'static str {
        "nice"
    }
    fn description(&self) -> &'static str {
        "Show or set scheduling priority (simulated)"
    }
    fn usage(&self) -> &'static str {
        "nice"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        if args.iter().all(|a| a.is_empty()) {
            Ok("0".to_string())
        } else {
            Ok(String::new())
        }
    }
}

struct NohupCmd;
impl Command for NohupCmd {
    fn name(&self) -> &'static str {
        "nohup"
    }
    fn description(&self) -> &'static str {
        "Run a command immune to hangups (simulated)"
    }
    fn usage(&self) -> &'static str {
        "nohup <command>"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        if args.iter().all(|a| a.is_empty()) {
            return Err(ShellError::Usage("nohup <command>".into()));
        }
        Ok("nohup: ignoring input and appending output to 'nohup.out'".to_string())
    }
}

struct LsofCmd;
impl Command for LsofCmd {
    fn name(&self) -> &'static str {
        "lsof"
    }
    fn description(&self) -> &'static str {
        "List open files and sockets (simulated)"
    }
    fn usage(&self) -> &'static str {
        "lsof [-i :port]"
    }
    fn category(&self) -> Category {
        Category::Process
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let header = "COMMAND    PID     USER   FD   TYPE DEVICE NODE NAME";
        let rows = [
            ("sshd", 812, "root", "3u", ":22 (LISTEN)"),
            ("nginx", 981, "root", "6u", ":80 (LISTEN)"),
            ("postgres", 1204, "postgres", "5u", "127.0.0.1:5432 (LISTEN)"),
            ("node", 1630, "user", "20u", ":3000 (LISTEN)"),
        ];
        let port_filter = args
            .iter()
            .position(|a| *a == "-i")
            .and_then(|i| args.get(i + 1))
            .map(|p| p.trim_start_matches(':'));
        let mut lines = vec![header.to_string()];
        for (cmd, pid, user, fd, name) in rows {
            if let Some(port) = port_filter {
                if !name.contains(&format!(":{port} ")) {
                    continue;
                }
            }
            lines.push(format!(
                "{cmd:<10} {pid:>4} {user:>8} {fd:>4}   IPv4  TCP  {name}"
            ));
        }
        if lines.len() == 1 {
            return Ok(String::new());
        }
        Ok(lines.join("\n"))
    }
}

/// Register the process table commands.
pub fn register_process_commands(set: &mut crate::CommandSet) {
    set.register(Box::new(PsCmd));
    set.register(Box::new(TopCmd));
    set.register(Box::new(HtopCmd));
    set.register(Box::new(KillCmd));
    set.register(Box::new(KillallCmd));
    set.register(Box::new(PgrepCmd));
    set.register(Box::new(PkillCmd));
    set.register(Box::new(JobsCmd));
    set.register(Box::new(NiceCmd));
    set.register(Box::new(NohupCmd));
    set.register(Box::new(LsofCmd));
}
