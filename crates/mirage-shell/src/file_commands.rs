//! File system utilities: navigation, listing, and content commands.
//!
//! Listing and navigation read the seeded VFS directly. Content commands
//! (`cat` and friends) resolve their operand against the VFS contents
//! map, so only the seeded readable files succeed. Mutating names
//! (`touch`, `mkdir`, ...) validate their operands but change nothing:
//! the tree is static for the lifetime of the session.

use mirage_types::{Category, Result, ShellError};
use mirage_vfs::EntryKind;

use crate::interpreter::{Command, ShellCtx, cd_target, first_operand, flag_number, join_path};

/// Size rendered for entries without an explicit size.
const DEFAULT_SIZE: u64 = 4096;
/// Modification date rendered for entries without one.
const DEFAULT_DATE: &str = "Jan 15 10:30";
/// Owner column in long listings.
const OWNER: &str = "user";

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &'static str {
        "ls"
    }
    fn description(&self) -> &'static str {
        "List directory contents"
    }
    fn usage(&self) -> &'static str {
        "ls [-l|-la] [path]"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn examples(&self) -> &'static [&'static str] {
        &["ls", "ls -la", "ls /var/log"]
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let long = args
            .iter()
            .any(|a| matches!(*a, "-l" | "-la" | "-al"));
        let path = match first_operand(args, &[]) {
            Some(p) => join_path(&ctx.cwd, p),
            None => ctx.cwd.clone(),
        };
        // Unknown paths list as empty rather than erroring.
        let entries = ctx.vfs.list(&path).unwrap_or(&[]);
        if entries.is_empty() {
            return Ok(String::new());
        }
        if !long {
            let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            return Ok(names.join("  "));
        }
        let mut lines = Vec::with_capacity(entries.len());
        for e in entries {
            let mode = e.mode.as_deref().unwrap_or(match e.kind {
                EntryKind::Directory => "drwxr-xr-x",
                EntryKind::File => "-rw-r--r--",
            });
            let size = e.size.unwrap_or(DEFAULT_SIZE);
            let date = e.modified.as_deref().unwrap_or(DEFAULT_DATE);
            lines.push(format!(
                "{mode} 1 {OWNER} {OWNER} {size:>8} {date} {}",
                e.name
            ));
        }
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn description(&self) -> &'static str {
        "Change working directory"
    }
    fn usage(&self) -> &'static str {
        "cd [path]"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn examples(&self) -> &'static [&'static str] {
        &["cd projects", "cd ..", "cd ~"]
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operand = args.first().copied().filter(|a| !a.is_empty());
        let target = cd_target(&ctx.cwd, operand, &ctx.config.home_dir);
        if !ctx.vfs.is_dir(&target) {
            // cwd is left untouched on failure.
            return Err(ShellError::no_such("cd", operand.unwrap_or("~")));
        }
        ctx.cwd = target;
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &'static str {
        "pwd"
    }
    fn description(&self) -> &'static str {
        "Print working directory"
    }
    fn usage(&self) -> &'static str {
        "pwd"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok(ctx.cwd.clone())
    }
}

// ---------------------------------------------------------------------------
// Content commands: cat, less, more share the whole-file renderer.
// ---------------------------------------------------------------------------

/// Resolve a content operand and read the file, with the taxonomy errors
/// attributed to `cmd`.
fn read_operand<'a>(
    cmd: &str,
    args: &[&str],
    value_flags: &[&str],
    ctx: &'a ShellCtx<'_>,
) -> Result<(&'a str, String)> {
    let operand =
        first_operand(args, value_flags).ok_or_else(|| ShellError::missing(cmd, "file"))?;
    let path = join_path(&ctx.cwd, operand);
    match ctx.vfs.read(&path) {
        Some(contents) => Ok((contents, operand.to_string())),
        None => Err(ShellError::no_such(cmd, operand)),
    }
}

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &'static str {
        "cat"
    }
    fn description(&self) -> &'static str {
        "Concatenate and print file contents"
    }
    fn usage(&self) -> &'static str {
        "cat <file>"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn examples(&self) -> &'static [&'static str] {
        &["cat readme.txt", "cat .bashrc"]
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let (contents, _) = read_operand("cat", args, &[], ctx)?;
        Ok(contents.trim_end().to_string())
    }
}

struct LessCmd;
impl Command for LessCmd {
    fn name(&self) -> &'static str {
        "less"
    }
    fn description(&self) -> &'static str {
        "View file contents (pager, emulated as full output)"
    }
    fn usage(&self) -> &'static str {
        "less <file>"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let (contents, operand) = read_operand("less", args, &[], ctx)?;
        Ok(format!("{}\n(END) {operand}", contents.trim_end()))
    }
}

struct MoreCmd;
impl Command for MoreCmd {
    fn name(&self) -> &'static str {
        "more"
    }
    fn description(&self) -> &'static str {
        "View file contents page by page (emulated as full output)"
    }
    fn usage(&self) -> &'static str {
        "more <file>"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let (contents, _) = read_operand("more", args, &[], ctx)?;
        Ok(contents.trim_end().to_string())
    }
}

// ---------------------------------------------------------------------------
// head / tail
// ---------------------------------------------------------------------------

struct HeadCmd;
impl Command for HeadCmd {
    fn name(&self) -> &'static str {
        "head"
    }
    fn description(&self) -> &'static str {
        "Print the first lines of a file"
    }
    fn usage(&self) -> &'static str {
        "head [-n lines] <file>"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn examples(&self) -> &'static [&'static str] {
        &["head -n 5 readme.txt"]
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let n = flag_number(args, "-n", 10) as usize;
        let (contents, _) = read_operand("head", args, &["-n"], ctx)?;
        let lines: Vec<&str> = contents.lines().take(n).collect();
        Ok(lines.join("\n"))
    }
}

struct TailCmd;
impl Command for TailCmd {
    fn name(&self) -> &'static str {
        "tail"
    }
    fn description(&self) -> &'static str {
        "Print the last lines of a file"
    }
    fn usage(&self) -> &'static str {
        "tail [-n lines] <file>"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let n = flag_number(args, "-n", 10) as usize;
        let (contents, _) = read_operand("tail", args, &["-n"], ctx)?;
        let all: Vec<&str> = contents.lines().collect();
        let start = all.len().saturating_sub(n);
        Ok(all[start..].join("\n"))
    }
}

// ---------------------------------------------------------------------------
// wc
// ---------------------------------------------------------------------------

struct WcCmd;
impl Command for WcCmd {
    fn name(&self) -> &'static str {
        "wc"
    }
    fn description(&self) -> &'static str {
        "Count lines, words, and bytes"
    }
    fn usage(&self) -> &'static str {
        "wc [-l|-w|-c] <file>"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let (contents, operand) = read_operand("wc", args, &[], ctx)?;
        let lines = contents.lines().count();
        let words = contents.split_whitespace().count();
        let bytes = contents.len();
        if args.contains(&"-l") {
            return Ok(format!("{lines} {operand}"));
        }
        if args.contains(&"-w") {
            return Ok(format!("{words} {operand}"));
        }
        if args.contains(&"-c") {
            return Ok(format!("{bytes} {operand}"));
        }
        Ok(format!("{lines:>7} {words:>7} {bytes:>7} {operand}"))
    }
}

// ---------------------------------------------------------------------------
// stat / file
// ---------------------------------------------------------------------------

struct StatCmd;
impl Command for StatCmd {
    fn name(&self) -> &'static str {
        "stat"
    }
    fn description(&self) -> &'static str {
        "Show file metadata"
    }
    fn usage(&self) -> &'static str {
        "stat <path>"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operand =
            first_operand(args, &[]).ok_or_else(|| ShellError::missing("stat", "operand"))?;
        let path = join_path(&ctx.cwd, operand);
        let entry = ctx
            .vfs
            .stat(&path)
            .ok_or_else(|| ShellError::no_such("stat", operand))?;
        let kind = match entry.kind {
            EntryKind::File => "regular file",
            EntryKind::Directory => "directory",
        };
        let mode = entry.mode.as_deref().unwrap_or("-rw-r--r--");
        let size = entry.size.unwrap_or(DEFAULT_SIZE);
        let date = entry.modified.as_deref().unwrap_or(DEFAULT_DATE);
        Ok(format!(
            "  File: {operand}\n  Size: {size}\t{kind}\nAccess: ({mode})  Uid: (1000/{OWNER})  Gid: (1000/{OWNER})\nModify: {date}"
        ))
    }
}

struct FileCmd;
impl Command for FileCmd {
    fn name(&self) -> &'static str {
        "file"
    }
    fn description(&self) -> &'static str {
        "Determine file type"
    }
    fn usage(&self) -> &'static str {
        "file <path>"
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operand =
            first_operand(args, &[]).ok_or_else(|| ShellError::missing("file", "operand"))?;
        let path = join_path(&ctx.cwd, operand);
        let entry = ctx
            .vfs
            .stat(&path)
            .ok_or_else(|| ShellError::no_such("file", operand))?;
        let kind = if entry.kind == EntryKind::Directory {
            "directory"
        } else if operand.ends_with(".tar.gz") || operand.ends_with(".tgz") {
            "gzip compressed data"
        } else if operand.ends_with(".pdf") {
            "PDF document, version 1.7"
        } else if operand.ends_with(".sh") {
            "Bourne-Again shell script, ASCII text executable"
        } else {
            "ASCII text"
        };
        Ok(format!("{operand}: {kind}"))
    }
}

// ---------------------------------------------------------------------------
// Simulated mutators: validated, accepted, but the tree never changes.
// ---------------------------------------------------------------------------

/// A mutating utility emulated as an accepted no-op: the operand count is
/// validated, then the command succeeds silently like the real tool.
struct NoopMutator {
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    /// Number of required operands.
    required: usize,
    operand: &'static str,
}

impl Command for NoopMutator {
    fn name(&self) -> &'static str {
        self.name
    }
    fn description(&self) -> &'static str {
        self.description
    }
    fn usage(&self) -> &'static str {
        self.usage
    }
    fn category(&self) -> Category {
        Category::File
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operands = args
            .iter()
            .filter(|a| !a.is_empty() && !a.starts_with('-'))
            .count();
        if operands < self.required {
            return Err(ShellError::missing(self.name, self.operand));
        }
        Ok(String::new())
    }
}

/// Register navigation, listing, content, and simulated-mutation commands.
pub fn register_file_commands(set: &mut crate::CommandSet) {
    set.register(Box::new(LsCmd));
    set.register(Box::new(CdCmd));
    set.register(Box::new(PwdCmd));
    set.register(Box::new(CatCmd));
    set.register(Box::new(LessCmd));
    set.register(Box::new(MoreCmd));
    set.register(Box::new(HeadCmd));
    set.register(Box::new(TailCmd));
    set.register(Box::new(WcCmd));
    set.register(Box::new(StatCmd));
    set.register(Box::new(FileCmd));
    set.register(Box::new(NoopMutator {
        name: "touch",
        description: "Update file timestamps (simulated)",
        usage: "touch <file>",
        required: 1,
        operand: "file",
    }));
    set.register(Box::new(NoopMutator {
        name: "mkdir",
        description: "Create a directory (simulated)",
        usage: "mkdir <path>",
        required: 1,
        operand: "operand",
    }));
    set.register(Box::new(NoopMutator {
        name: "rmdir",
        description: "Remove an empty directory (simulated)",
        usage: "rmdir <path>",
        required: 1,
        operand: "operand",
    }));
    set.register(Box::new(NoopMutator {
        name: "rm",
        description: "Remove files (simulated)",
        usage: "rm [-rf] <path>",
        required: 1,
        operand: "operand",
    }));
    set.register(Box::new(NoopMutator {
        name: "cp",
        description: "Copy files (simulated)",
        usage: "cp <src> <dst>",
        required: 2,
        operand: "destination file",
    }));
    set.register(Box::new(NoopMutator {
        name: "mv",
        description: "Move or rename files (simulated)",
        usage: "mv <src> <dst>",
        required: 2,
        operand: "destination file",
    }));
    set.register(Box::new(NoopMutator {
        name: "ln",
        description: "Create links (simulated)",
        usage: "ln [-s] <target> <link>",
        required: 2,
        operand: "link name",
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandSet;
    use crate::interpreter::ExecutionResult;
    use mirage_types::SessionConfig;
    use mirage_vfs::seed_vfs;

    fn run_from(cwd: &str, line: &str) -> ExecutionResult {
        let mut set = CommandSet::new();
        register_file_commands(&mut set);
        let vfs = seed_vfs();
        let config = SessionConfig::default();
        let mut ctx = ShellCtx {
            cwd: cwd.to_string(),
            vfs: &vfs,
            history: &[],
            config: &config,
            catalog: &[],
            now_millis: 0,
        };
        set.execute(line, &mut ctx)
    }

    fn run(line: &str) -> ExecutionResult {
        run_from("/home/user", line)
    }

    #[test]
    fn pwd_prints_cwd() {
        let res = run("pwd");
        assert_eq!(res.output, "/home/user");
        assert_eq!(res.exit_code, 0);
    }

    #[test]
    fn ls_joins_names_with_two_spaces() {
        let res = run("ls projects");
        assert_eq!(res.output, "webapp  api-server  scripts");
    }

    #[test]
    fn ls_long_renders_metadata_lines() {
        let res = run("ls -la");
        assert_eq!(res.exit_code, 0);
        let lines: Vec<&str> = res.output.lines().collect();
        assert_eq!(lines.len(), 7);
        let readme = lines.iter().find(|l| l.ends_with("readme.txt")).unwrap();
        assert!(readme.starts_with("-rw-r--r--"));
        assert!(readme.contains("user user"));
    }

    #[test]
    fn ls_long_defaults_size_to_4096() {
        let res = run_from("/usr", "ls -l");
        for line in res.output.lines() {
            assert!(line.contains("4096"), "expected default size in {line}");
        }
    }

    #[test]
    fn ls_unknown_path_is_empty_success() {
        let res = run("ls /no/such/dir");
        assert_eq!(res.output, "");
        assert_eq!(res.exit_code, 0);
    }

    #[test]
    fn cd_relative_and_parent() {
        let res = run("cd projects");
        assert_eq!(res.cwd, "/home/user/projects");
        assert_eq!(res.exit_code, 0);

        let res = run_from("/home/user/projects", "cd ..");
        assert_eq!(res.cwd, "/home/user");
    }

    #[test]
    fn cd_home_variants() {
        assert_eq!(run_from("/var/log", "cd").cwd, "/home/user");
        assert_eq!(run_from("/var/log", "cd ~").cwd, "/home/user");
    }

    #[test]
    fn cd_at_root_parent_stays_root() {
        let res = run_from("/", "cd ..");
        assert_eq!(res.cwd, "/");
        assert_eq!(res.exit_code, 0);
    }

    #[test]
    fn cd_unknown_leaves_cwd_unchanged() {
        let res = run("cd nowhere");
        assert_eq!(res.exit_code, 1);
        assert!(res.output.contains("No such file or directory"));
        assert_eq!(res.cwd, "/home/user");
    }

    #[test]
    fn cat_readme() {
        let res = run("cat readme.txt");
        assert_eq!(res.exit_code, 0);
        assert!(res.output.contains("mirage terminal"));
    }

    #[test]
    fn cat_dotfile() {
        let res = run("cat .bashrc");
        assert!(res.output.contains("alias ll="));
    }

    #[test]
    fn cat_missing_file() {
        let res = run("cat missing.txt");
        assert_eq!(res.exit_code, 1);
        assert_eq!(res.output, "cat: missing.txt: No such file or directory");
    }

    #[test]
    fn cat_without_operand() {
        let res = run("cat");
        assert_eq!(res.exit_code, 1);
        assert_eq!(res.output, "cat: missing file operand");
    }

    #[test]
    fn unlisted_entry_is_not_readable() {
        // notes.md appears in listings but carries no contents.
        let res = run_from("/home/user/Documents", "cat notes.md");
        assert_eq!(res.exit_code, 1);
        assert!(res.output.contains("No such file or directory"));
    }

    #[test]
    fn head_limits_lines() {
        let res = run("head -n 2 readme.txt");
        assert_eq!(res.output.lines().count(), 2);
    }

    #[test]
    fn head_bad_count_falls_back_to_default() {
        let res = run("head -n zap readme.txt");
        assert_eq!(res.exit_code, 0);
        assert!(res.output.lines().count() <= 10);
    }

    #[test]
    fn tail_takes_last_lines() {
        let res = run("tail -n 1 .bashrc");
        assert_eq!(res.output, "PS1='\\u@\\h:\\w\\$ '");
    }

    #[test]
    fn wc_counts() {
        let res = run("wc -l readme.txt");
        assert_eq!(res.exit_code, 0);
        assert!(res.output.ends_with("readme.txt"));
        let count: usize = res.output.split(' ').next().unwrap().parse().unwrap();
        assert!(count > 5);
    }

    #[test]
    fn stat_reports_metadata() {
        let res = run("stat readme.txt");
        assert!(res.output.contains("regular file"));
        assert!(res.output.contains("readme.txt"));
    }

    #[test]
    fn file_classifies_by_extension() {
        assert!(run("file readme.txt").output.contains("ASCII text"));
        let res = run_from("/home/user/Downloads", "file archive.tar.gz");
        assert!(res.output.contains("gzip compressed data"));
        assert!(run("file projects").output.contains("directory"));
    }

    #[test]
    fn mutators_accept_and_do_nothing() {
        let res = run("mkdir newdir");
        assert_eq!(res.output, "");
        assert_eq!(res.exit_code, 0);
        // The tree is unchanged.
        let after = run("cd newdir");
        assert_eq!(after.exit_code, 1);
    }

    #[test]
    fn mutators_validate_operands() {
        assert_eq!(run("rm").output, "rm: missing operand");
        assert_eq!(run("cp only-one").output, "cp: missing destination file operand");
        assert_eq!(run("mv a b").exit_code, 0);
    }
}
