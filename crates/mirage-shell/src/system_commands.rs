//! System information and environment commands.
//!
//! `date`, `uptime`, `w`, and `who` derive their clock text from the
//! session timestamp carried in the context, so a fixed clock produces
//! fixed output. The rest render static machine facts or values from
//! the session configuration.

use mirage_types::{Category, Result, ShellError};
use mirage_vfs::{EntryKind, Vfs};

use crate::interpreter::{Command, ShellCtx, first_operand, join_path};

// ---------------------------------------------------------------------------
// Civil time from epoch milliseconds (UTC).
// ---------------------------------------------------------------------------

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS: [&str; 7] = ["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"];

struct CivilTime {
    year: i64,
    month: usize,
    day: i64,
    weekday: usize,
    hour: u64,
    minute: u64,
    second: u64,
}

/// Days-from-epoch to year/month/day, Howard Hinnant's civil algorithm.
fn civil_from_millis(millis: u64) -> CivilTime {
    let secs = millis / 1000;
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;

    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };

    CivilTime {
        year: if m <= 2 { y + 1 } else { y },
        month: (m - 1) as usize,
        day: d,
        // 1970-01-01 was a Thursday.
        weekday: days.rem_euclid(7) as usize,
        hour: rem / 3600,
        minute: (rem % 3600) / 60,
        second: rem % 60,
    }
}

/// `date`-style rendering: `Mon Feb  3 14:05:09 UTC 2026`.
fn format_date(millis: u64) -> String {
    let t = civil_from_millis(millis);
    format!(
        "{} {} {:>2} {:02}:{:02}:{:02} UTC {}",
        WEEKDAYS[t.weekday], MONTHS[t.month], t.day, t.hour, t.minute, t.second, t.year
    )
}

/// `HH:MM:SS` clock fragment for `uptime`, `w`, and `top`.
pub(crate) fn format_clock(millis: u64) -> String {
    let t = civil_from_millis(millis);
    format!("{:02}:{:02}:{:02}", t.hour, t.minute, t.second)
}

/// `who`-style login stamp: `2026-02-03 14:05`.
fn format_login(millis: u64) -> String {
    let t = civil_from_millis(millis);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        t.year,
        t.month + 1,
        t.day,
        t.hour,
        t.minute
    )
}

// ---------------------------------------------------------------------------
// uname / hostname / whoami / id
// ---------------------------------------------------------------------------

const KERNEL_RELEASE: &str = "6.5.0-14-generic";
const KERNEL_VERSION: &str = "#14-Ubuntu SMP PREEMPT_DYNAMIC";

struct UnameCmd;
impl Command for UnameCmd {
    fn name(&self) -> &'static str {
        "uname"
    }
    fn description(&self) -> &'static str {
        "Print system information"
    }
    fn usage(&self) -> &'static str {
        "uname [-a|-r]"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn examples(&self) -> &'static [&'static str] {
        &["uname -a"]
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        if args.contains(&"-r") {
            return Ok(KERNEL_RELEASE.to_string());
        }
        if args.contains(&"-a") {
            return Ok(format!(
                "Linux {} {KERNEL_RELEASE} {KERNEL_VERSION} x86_64 x86_64 x86_64 GNU/Linux",
                ctx.config.hostname
            ));
        }
        Ok("Linux".to_string())
    }
}

struct HostnameCmd;
impl Command for HostnameCmd {
    fn name(&self) -> &'static str {
        "hostname"
    }
    fn description(&self) -> &'static str {
        "Print the system hostname"
    }
    fn usage(&self) -> &'static str {
        "hostname"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok(ctx.config.hostname.clone())
    }
}

struct WhoamiCmd;
impl Command for WhoamiCmd {
    fn name(&self) -> &'static str {
        "whoami"
    }
    fn description(&self) -> &'static str {
        "Print the current user"
    }
    fn usage(&self) -> &'static str {
        "whoami"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok(ctx.config.user.clone())
    }
}

struct IdCmd;
impl Command for IdCmd {
    fn name(&self) -> &'static str {
        "id"
    }
    fn description(&self) -> &'static str {
        "Print user and group IDs"
    }
    fn usage(&self) -> &'static str {
        "id"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let u = &ctx.config.user;
        Ok(format!(
            "uid=1000({u}) gid=1000({u}) groups=1000({u}),4(adm),27(sudo),100(users)"
        ))
    }
}

// ---------------------------------------------------------------------------
// date / uptime / w / who
// ---------------------------------------------------------------------------

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &'static str {
        "date"
    }
    fn description(&self) -> &'static str {
        "Print the current date and time"
    }
    fn usage(&self) -> &'static str {
        "date"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok(format_date(ctx.now_millis))
    }
}

struct UptimeCmd;
impl Command for UptimeCmd {
    fn name(&self) -> &'static str {
        "uptime"
    }
    fn description(&self) -> &'static str {
        "Show uptime and load averages"
    }
    fn usage(&self) -> &'static str {
        "uptime"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok(format!(
            " {} up 12 days,  3:42,  1 user,  load average: 0.08, 0.12, 0.09",
            format_clock(ctx.now_millis)
        ))
    }
}

struct WCmd;
impl Command for WCmd {
    fn name(&self) -> &'static str {
        "w"
    }
    fn description(&self) -> &'static str {
        "Show who is logged on and what they are doing"
    }
    fn usage(&self) -> &'static str {
        "w"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok(format!(
            " {} up 12 days,  3:42,  1 user,  load average: 0.08, 0.12, 0.09\nUSER     TTY      FROM             LOGIN@   IDLE   JCPU   PCPU WHAT\n{:<8} pts/0    10.0.2.2         09:14    0.00s  0.21s  0.01s w",
            format_clock(ctx.now_millis),
            ctx.config.user
        ))
    }
}

struct WhoCmd;
impl Command for WhoCmd {
    fn name(&self) -> &'static str {
        "who"
    }
    fn description(&self) -> &'static str {
        "Show who is logged on"
    }
    fn usage(&self) -> &'static str {
        "who"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok(format!(
            "{:<8} pts/0        {} (10.0.2.2)",
            ctx.config.user,
            format_login(ctx.now_millis)
        ))
    }
}

// ---------------------------------------------------------------------------
// Memory / disk: free, df, du, lsblk, mount
// ---------------------------------------------------------------------------

struct FreeCmd;
impl Command for FreeCmd {
    fn name(&self) -> &'static str {
        "free"
    }
    fn description(&self) -> &'static str {
        "Show memory usage"
    }
    fn usage(&self) -> &'static str {
        "free [-h]"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        if args.contains(&"-h") {
            return Ok("               total        used        free      shared  buff/cache   available\nMem:           7.8Gi       2.1Gi       3.2Gi       180Mi       2.5Gi       5.3Gi\nSwap:          2.0Gi          0B       2.0Gi".to_string());
        }
        Ok("               total        used        free      shared  buff/cache   available\nMem:         8145240     2201544     3355724      184320     2587972     5556180\nSwap:        2097148           0     2097148".to_string())
    }
}

struct DfCmd;
impl Command for DfCmd {
    fn name(&self) -> &'static str {
        "df"
    }
    fn description(&self) -> &'static str {
        "Show file system disk usage"
    }
    fn usage(&self) -> &'static str {
        "df [-h]"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        if args.contains(&"-h") {
            return Ok("Filesystem      Size  Used Avail Use% Mounted on\n/dev/sda1        40G   12G   26G  32% /\ntmpfs           3.9G     0  3.9G   0% /dev/shm\n/dev/sda2       100G   38G   57G  41% /home".to_string());
        }
        Ok("Filesystem     1K-blocks     Used Available Use% Mounted on\n/dev/sda1       41152736 12582912  26460160  32% /\ntmpfs            4072620        0   4072620   0% /dev/shm\n/dev/sda2      104857600 39845888  59768832  41% /home".to_string())
    }
}

/// Sum entry sizes beneath a directory; entries without a size count as
/// one block (4096).
fn tree_size(vfs: &dyn Vfs, root: &str) -> u64 {
    let mut total = 4096;
    if let Some(entries) = vfs.list(root) {
        for entry in entries {
            match entry.kind {
                EntryKind::File => total += entry.size.unwrap_or(4096),
                EntryKind::Directory => {
                    let child = if root == "/" {
                        format!("/{}", entry.name)
                    } else {
                        format!("{root}/{}", entry.name)
                    };
                    total += tree_size(vfs, &child);
                }
            }
        }
    }
    total
}

fn human_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}K", bytes as f64 / 1024.0)
    } else {
        format!("{bytes}")
    }
}

struct DuCmd;
impl Command for DuCmd {
    fn name(&self) -> &'static str {
        "du"
    }
    fn description(&self) -> &'static str {
        "Estimate directory space usage"
    }
    fn usage(&self) -> &'static str {
        "du [-sh] [path]"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let human = args.iter().any(|a| matches!(*a, "-h" | "-sh" | "-hs"));
        let summary = args.iter().any(|a| matches!(*a, "-s" | "-sh" | "-hs"));
        let operand = first_operand(args, &[]).unwrap_or(".");
        let root = if operand == "." {
            ctx.cwd.clone()
        } else {
            join_path(&ctx.cwd, operand)
        };
        if !ctx.vfs.is_dir(&root) && ctx.vfs.stat(&root).is_none() {
            return Err(ShellError::no_such("du", operand));
        }

        let render = |bytes: u64| {
            if human {
                human_size(bytes)
            } else {
                // du reports 1K blocks.
                format!("{}", bytes.div_ceil(1024))
            }
        };

        if summary {
            return Ok(format!("{}\t{operand}", render(tree_size(ctx.vfs, &root))));
        }
        let mut lines = Vec::new();
        if let Some(entries) = ctx.vfs.list(&root) {
            for entry in entries {
                if entry.kind == EntryKind::Directory {
                    let child = if root == "/" {
                        format!("/{}", entry.name)
                    } else {
                        format!("{root}/{}", entry.name)
                    };
                    lines.push(format!(
                        "{}\t{operand}/{}",
                        render(tree_size(ctx.vfs, &child)),
                        entry.name
                    ));
                }
            }
        }
        lines.push(format!("{}\t{operand}", render(tree_size(ctx.vfs, &root))));
        Ok(lines.join("\n"))
    }
}

struct LsblkCmd;
impl Command for LsblkCmd {
    fn name(&self) -> &'static str {
        "lsblk"
    }
    fn description(&self) -> &'static str {
        "List block devices"
    }
    fn usage(&self) -> &'static str {
        "lsblk"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok("NAME   MAJ:MIN RM  SIZE RO TYPE MOUNTPOINTS\nsda      8:0    0  140G  0 disk\n├─sda1   8:1    0   40G  0 part /\n└─sda2   8:2    0  100G  0 part /home\nsr0     11:0    1 1024M  0 rom".to_string())
    }
}

struct MountCmd;
impl Command for MountCmd {
    fn name(&self) -> &'static str {
        "mount"
    }
    fn description(&self) -> &'static str {
        "Show mounted file systems"
    }
    fn usage(&self) -> &'static str {
        "mount"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok("/dev/sda1 on / type ext4 (rw,relatime)\n/dev/sda2 on /home type ext4 (rw,relatime)\ntmpfs on /dev/shm type tmpfs (rw,nosuid,nodev)\nproc on /proc type proc (rw,nosuid,nodev,noexec)".to_string())
    }
}

// ---------------------------------------------------------------------------
// lscpu / dmesg
// ---------------------------------------------------------------------------

struct LscpuCmd;
impl Command for LscpuCmd {
    fn name(&self) -> &'static str {
        "lscpu"
    }
    fn description(&self) -> &'static str {
        "Show CPU architecture information"
    }
    fn usage(&self) -> &'static str {
        "lscpu"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok("Architecture:            x86_64\n  CPU op-mode(s):        32-bit, 64-bit\nCPU(s):                  4\n  On-line CPU(s) list:   0-3\nVendor ID:               GenuineIntel\n  Model name:            Intel(R) Xeon(R) CPU E5-2686 v4 @ 2.30GHz\nThread(s) per core:      2\nCore(s) per socket:      2\nL3 cache:                45 MiB".to_string())
    }
}

struct DmesgCmd;
impl Command for DmesgCmd {
    fn name(&self) -> &'static str {
        "dmesg"
    }
    fn description(&self) -> &'static str {
        "Show kernel ring buffer messages"
    }
    fn usage(&self) -> &'static str {
        "dmesg"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok("[    0.000000] Linux version 6.5.0-14-generic (buildd@lcy02-amd64-045)\n[    0.004211] Command line: BOOT_IMAGE=/boot/vmlinuz-6.5.0-14-generic root=UUID=3f1c\n[    1.204900] EXT4-fs (sda1): mounted filesystem with ordered data mode\n[    2.118320] eth0: link becomes ready\n[   12.002100] audit: initializing netlink subsys".to_string())
    }
}

// ---------------------------------------------------------------------------
// env / printenv / history
// ---------------------------------------------------------------------------

fn env_lines(ctx: &ShellCtx<'_>) -> Vec<(String, String)> {
    vec![
        ("HOME".into(), ctx.config.home_dir.clone()),
        ("USER".into(), ctx.config.user.clone()),
        ("SHELL".into(), "/bin/bash".into()),
        (
            "PATH".into(),
            "/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin".into(),
        ),
        ("PWD".into(), ctx.cwd.clone()),
        ("HOSTNAME".into(), ctx.config.hostname.clone()),
        ("TERM".into(), "xterm-256color".into()),
        ("LANG".into(), "en_US.UTF-8".into()),
    ]
}

struct EnvCmd;
impl Command for EnvCmd {
    fn name(&self) -> &'static str {
        "env"
    }
    fn description(&self) -> &'static str {
        "Print environment variables"
    }
    fn usage(&self) -> &'static str {
        "env"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let lines: Vec<String> = env_lines(ctx)
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        Ok(lines.join("\n"))
    }
}

struct PrintenvCmd;
impl Command for PrintenvCmd {
    fn name(&self) -> &'static str {
        "printenv"
    }
    fn description(&self) -> &'static str {
        "Print one or all environment variables"
    }
    fn usage(&self) -> &'static str {
        "printenv [name]"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let vars = env_lines(ctx);
        match args.iter().find(|a| !a.is_empty()) {
            Some(name) => match vars.into_iter().find(|(k, _)| k == name) {
                Some((_, v)) => Ok(v),
                // Real printenv exits nonzero silently for unknown names.
                None => Err(ShellError::Message(String::new())),
            },
            None => Ok(vars
                .into_iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

struct HistoryCmd;
impl Command for HistoryCmd {
    fn name(&self) -> &'static str {
        "history"
    }
    fn description(&self) -> &'static str {
        "Show the session command history"
    }
    fn usage(&self) -> &'static str {
        "history"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let lines: Vec<String> = ctx
            .history
            .iter()
            .enumerate()
            .map(|(i, rec)| format!("  {:>4}  {}", i + 1, rec.command))
            .collect();
        Ok(lines.join("\n"))
    }
}

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &'static str {
        "help"
    }
    fn description(&self) -> &'static str {
        "List available commands or describe one"
    }
    fn usage(&self) -> &'static str {
        "help [command]"
    }
    fn category(&self) -> Category {
        Category::System
    }
    fn examples(&self) -> &'static [&'static str] {
        &["help", "help ls"]
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        if let Some(name) = args.iter().find(|a| !a.is_empty()) {
            let meta = ctx
                .catalog
                .iter()
                .find(|m| m.name == *name)
                .ok_or_else(|| {
                    ShellError::Message(format!("help: no help topics match '{name}'"))
                })?;
            let mut text = format!(
                "{}: {}\nusage: {}",
                meta.name, meta.description, meta.usage
            );
            if !meta.examples.is_empty() {
                text.push_str("\nexamples:");
                for ex in &meta.examples {
                    text.push_str(&format!("\n  {ex}"));
                }
            }
            return Ok(text);
        }

        let mut lines = vec!["Available commands:".to_string()];
        for category in mirage_types::Category::all() {
            let members: Vec<&str> = ctx
                .catalog
                .iter()
                .filter(|m| m.category == *category)
                .map(|m| m.name.as_str())
                .collect();
            if members.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(format!("{category}:"));
            lines.push(format!("  {}", members.join("  ")));
        }
        lines.push(String::new());
        lines.push("Type 'help <command>' or 'man <command>' for details.".to_string());
        Ok(lines.join("\n"))
    }
}

/// Register system information, environment, and history commands.
pub fn register_system_commands(set: &mut crate::CommandSet) {
    set.register(Box::new(UnameCmd));
    set.register(Box::new(HostnameCmd));
    set.register(Box::new(WhoamiCmd));
    set.register(Box::new(IdCmd));
    set.register(Box::new(DateCmd));
    set.register(Box::new(UptimeCmd));
    set.register(Box::new(WCmd));
    set.register(Box::new(WhoCmd));
    set.register(Box::new(FreeCmd));
    set.register(Box::new(DfCmd));
    set.register(Box::new(DuCmd));
    set.register(Box::new(LsblkCmd));
    set.register(Box::new(MountCmd));
    set.register(Box::new(LscpuCmd));
    set.register(Box::new(DmesgCmd));
    set.register(Box::new(EnvCmd));
    set.register(Box::new(PrintenvCmd));
    set.register(Box::new(HistoryCmd));
    set.register(Box::new(HelpCmd));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandSet;
    use crate::interpreter::ExecutionResult;
    use mirage_types::{CommandRecord, SessionConfig};
    use mirage_vfs::seed_vfs;

    fn run_at(line: &str, now_millis: u64, history: &[CommandRecord]) -> ExecutionResult {
        let mut set = CommandSet::new();
        register_system_commands(&mut set);
        let vfs = seed_vfs();
        let config = SessionConfig::default();
        let mut ctx = ShellCtx {
            cwd: "/home/user".to_string(),
            vfs: &vfs,
            history,
            config: &config,
            catalog: &[],
            now_millis,
        };
        set.execute(line, &mut ctx)
    }

    fn run(line: &str) -> ExecutionResult {
        run_at(line, 0, &[])
    }

    #[test]
    fn civil_epoch() {
        let t = civil_from_millis(0);
        assert_eq!(t.year, 1970);
        assert_eq!(MONTHS[t.month], "Jan");
        assert_eq!(t.day, 1);
        assert_eq!(WEEKDAYS[t.weekday], "Thu");
    }

    #[test]
    fn civil_known_timestamp() {
        // 2026-02-03 14:05:09 UTC.
        let t = civil_from_millis(1_770_127_509_000);
        assert_eq!(t.year, 2026);
        assert_eq!(MONTHS[t.month], "Feb");
        assert_eq!(t.day, 3);
        assert_eq!(WEEKDAYS[t.weekday], "Tue");
        assert_eq!((t.hour, t.minute, t.second), (14, 5, 9));
    }

    #[test]
    fn date_formats_the_session_clock() {
        let res = run_at("date", 1_770_127_509_000, &[]);
        assert_eq!(res.output, "Tue Feb  3 14:05:09 UTC 2026");
    }

    #[test]
    fn who_stamps_login_from_the_session_clock() {
        let res = run_at("who", 1_770_127_509_000, &[]);
        assert_eq!(res.output, "user     pts/0        2026-02-03 14:05 (10.0.2.2)");
    }

    #[test]
    fn uname_variants() {
        assert_eq!(run("uname").output, "Linux");
        let res = run("uname -a");
        assert!(res.output.starts_with("Linux webserver"));
        assert!(res.output.ends_with("GNU/Linux"));
    }

    #[test]
    fn whoami_and_hostname_read_config() {
        assert_eq!(run("whoami").output, "user");
        assert_eq!(run("hostname").output, "webserver");
    }

    #[test]
    fn env_contains_session_values() {
        let res = run("env");
        assert!(res.output.contains("HOME=/home/user"));
        assert!(res.output.contains("PWD=/home/user"));
        assert!(res.output.contains("HOSTNAME=webserver"));
    }

    #[test]
    fn printenv_single_variable() {
        assert_eq!(run("printenv HOME").output, "/home/user");
        let res = run("printenv NO_SUCH_VAR");
        assert_eq!(res.exit_code, 1);
        assert_eq!(res.output, "");
    }

    #[test]
    fn du_summary_counts_real_tree() {
        let res = run("du -s Documents");
        assert_eq!(res.exit_code, 0);
        // 4096 block + notes.md (2048) + resume.pdf (48213), in 1K units.
        let kb: u64 = res.output.split('\t').next().unwrap().parse().unwrap();
        assert_eq!(kb, (4096u64 + 2048 + 48_213).div_ceil(1024));
    }

    #[test]
    fn du_missing_path() {
        let res = run("du -s nowhere");
        assert_eq!(res.exit_code, 1);
        assert!(res.output.contains("No such file or directory"));
    }

    #[test]
    fn history_renders_numbered_lines() {
        let history = vec![
            CommandRecord {
                id: "cmd-1".into(),
                command: "ls".into(),
                output: String::new(),
                timestamp: 0,
                exit_code: 0,
                directory: "/home/user".into(),
            },
            CommandRecord {
                id: "cmd-2".into(),
                command: "pwd".into(),
                output: "/home/user".into(),
                timestamp: 0,
                exit_code: 0,
                directory: "/home/user".into(),
            },
        ];
        let res = run_at("history", 0, &history);
        assert_eq!(res.output, "     1  ls\n     2  pwd");
    }

    #[test]
    fn free_and_df_have_headers() {
        assert!(run("free -h").output.contains("Mem:"));
        assert!(run("df -h").output.starts_with("Filesystem"));
    }
}
