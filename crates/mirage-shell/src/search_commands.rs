//! Search utilities: find, grep, locate, which, whereis.
//!
//! `find`, `grep -r`, and `locate` walk the real VFS tree; `which` and
//! `whereis` answer from the command catalog so every registered name
//! resolves to a plausible binary path.

use mirage_types::{Category, Result, ShellError};
use mirage_vfs::{EntryKind, Vfs};

use crate::interpreter::{Command, ShellCtx, join_path};

/// Match a shell glob pattern (`*` and `?` only) against a file name.
fn glob_match(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();
    // Classic backtracking matcher over the last star position.
    let (mut pi, mut ni) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;
    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ni));
            pi += 1;
        } else if let Some((sp, sn)) = star {
            pi = sp + 1;
            ni = sn + 1;
            star = Some((sp, sn + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// Depth-first walk over the VFS, yielding `(full_path, kind)` pairs.
fn walk(vfs: &dyn Vfs, root: &str, out: &mut Vec<(String, EntryKind)>) {
    let Some(entries) = vfs.list(root) else {
        return;
    };
    for entry in entries {
        let full = if root == "/" {
            format!("/{}", entry.name)
        } else {
            format!("{root}/{}", entry.name)
        };
        out.push((full.clone(), entry.kind));
        if entry.kind == EntryKind::Directory {
            walk(vfs, &full, out);
        }
    }
}

/// Rewrite an absolute match back into the operand's notation, so
/// `find . -name ...` prints `./...` like the real tool.
fn display_path(full: &str, root: &str, operand: &str) -> String {
    if operand == "." || operand.starts_with("./") {
        match full.strip_prefix(root) {
            Some(rest) => format!(".{rest}"),
            None => full.to_string(),
        }
    } else {
        full.to_string()
    }
}

// ---------------------------------------------------------------------------
// find
// ---------------------------------------------------------------------------

struct FindCmd;
impl Command for FindCmd {
    fn name(&self) -> &'static str {
        "find"
    }
    fn description(&self) -> &'static str {
        "Search for files in a directory hierarchy"
    }
    fn usage(&self) -> &'static str {
        "find <path> [-name pattern] [-type f|d]"
    }
    fn category(&self) -> Category {
        Category::Search
    }
    fn examples(&self) -> &'static [&'static str] {
        &["find . -name \"*.txt\"", "find /var -type d"]
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operand = args
            .iter()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .copied()
            .unwrap_or(".");
        // `.` and `./x` are relative to the working directory; the
        // normalizer does not resolve dot segments.
        let root = match operand {
            "." => ctx.cwd.clone(),
            p => join_path(&ctx.cwd, p.strip_prefix("./").unwrap_or(p)),
        };

        let mut name_pattern: Option<String> = None;
        let mut type_filter: Option<EntryKind> = None;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match *arg {
                "-name" => {
                    if let Some(p) = iter.next() {
                        name_pattern = Some(p.trim_matches('"').trim_matches('\'').to_string());
                    }
                }
                "-type" => {
                    type_filter = match iter.next().copied() {
                        Some("f") => Some(EntryKind::File),
                        Some("d") => Some(EntryKind::Directory),
                        _ => None,
                    };
                }
                _ => {}
            }
        }

        let mut found = Vec::new();
        walk(ctx.vfs, &root, &mut found);

        let mut lines = Vec::new();
        if type_filter != Some(EntryKind::File) && name_pattern.is_none() {
            lines.push(display_path(&root, &root, operand));
        }
        for (full, kind) in &found {
            if let Some(want) = type_filter {
                if *kind != want {
                    continue;
                }
            }
            if let Some(pat) = &name_pattern {
                let name = full.rsplit('/').next().unwrap_or(full);
                if !glob_match(pat, name) {
                    continue;
                }
            }
            lines.push(display_path(full, &root, operand));
        }
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// grep
// ---------------------------------------------------------------------------

struct GrepCmd;
impl Command for GrepCmd {
    fn name(&self) -> &'static str {
        "grep"
    }
    fn description(&self) -> &'static str {
        "Search file contents for a pattern"
    }
    fn usage(&self) -> &'static str {
        "grep [-rn] <pattern> [file]"
    }
    fn category(&self) -> Category {
        Category::Search
    }
    fn examples(&self) -> &'static [&'static str] {
        &["grep alias .bashrc", "grep -r \"terminal\" ."]
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let recursive = args.iter().any(|a| matches!(*a, "-r" | "-rn" | "-nr" | "-R"));
        let numbered = args.iter().any(|a| matches!(*a, "-n" | "-rn" | "-nr"));
        let mut operands = args
            .iter()
            .copied()
            .filter(|a| !a.is_empty() && !a.starts_with('-'));
        let pattern = operands
            .next()
            .map(|p| p.trim_matches('"').trim_matches('\'').to_string())
            .ok_or_else(|| ShellError::Usage("grep [-rn] <pattern> [file]".into()))?;

        if recursive {
            let root = match operands.next() {
                Some(".") | None => ctx.cwd.clone(),
                Some(p) => join_path(&ctx.cwd, p.strip_prefix("./").unwrap_or(p)),
            };
            let mut found = Vec::new();
            walk(ctx.vfs, &root, &mut found);
            let mut lines = Vec::new();
            for (full, kind) in &found {
                if *kind != EntryKind::File {
                    continue;
                }
                let Some(contents) = ctx.vfs.read(full) else {
                    continue;
                };
                for (i, line) in contents.lines().enumerate() {
                    if line.contains(&pattern) {
                        if numbered {
                            lines.push(format!("{full}:{}:{line}", i + 1));
                        } else {
                            lines.push(format!("{full}:{line}"));
                        }
                    }
                }
            }
            return Ok(lines.join("\n"));
        }

        let file = operands
            .next()
            .ok_or_else(|| ShellError::missing("grep", "file"))?;
        let path = join_path(&ctx.cwd, file);
        let contents = ctx
            .vfs
            .read(&path)
            .ok_or_else(|| ShellError::no_such("grep", file))?;
        let mut lines = Vec::new();
        for (i, line) in contents.lines().enumerate() {
            if line.contains(&pattern) {
                if numbered {
                    lines.push(format!("{}:{line}", i + 1));
                } else {
                    lines.push(line.to_string());
                }
            }
        }
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// locate
// ---------------------------------------------------------------------------

struct LocateCmd;
impl Command for LocateCmd {
    fn name(&self) -> &'static str {
        "locate"
    }
    fn description(&self) -> &'static str {
        "Find files by name substring"
    }
    fn usage(&self) -> &'static str {
        "locate <name>"
    }
    fn category(&self) -> Category {
        Category::Search
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let needle = args
            .iter()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .ok_or_else(|| ShellError::missing("locate", "pattern"))?;
        let mut found = Vec::new();
        walk(ctx.vfs, "/", &mut found);
        let lines: Vec<String> = found
            .into_iter()
            .filter(|(full, _)| {
                full.rsplit('/').next().is_some_and(|n| n.contains(needle))
            })
            .map(|(full, _)| full)
            .collect();
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// which / whereis
// ---------------------------------------------------------------------------

struct WhichCmd;
impl Command for WhichCmd {
    fn name(&self) -> &'static str {
        "which"
    }
    fn description(&self) -> &'static str {
        "Locate a command's binary"
    }
    fn usage(&self) -> &'static str {
        "which <command>"
    }
    fn category(&self) -> Category {
        Category::Search
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let name = args
            .iter()
            .find(|a| !a.is_empty())
            .ok_or_else(|| ShellError::missing("which", "command"))?;
        if ctx.catalog.iter().any(|m| m.name == *name) {
            Ok(format!("/usr/bin/{name}"))
        } else {
            Err(ShellError::Message(format!("which: no {name} in (/usr/local/bin:/usr/bin:/bin)")))
        }
    }
}

struct WhereisCmd;
impl Command for WhereisCmd {
    fn name(&self) -> &'static str {
        "whereis"
    }
    fn description(&self) -> &'static str {
        "Locate binary, source, and manual for a command"
    }
    fn usage(&self) -> &'static str {
        "whereis <command>"
    }
    fn category(&self) -> Category {
        Category::Search
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let name = args
            .iter()
            .find(|a| !a.is_empty())
            .ok_or_else(|| ShellError::missing("whereis", "command"))?;
        if ctx.catalog.iter().any(|m| m.name == *name) {
            Ok(format!(
                "{name}: /usr/bin/{name} /usr/share/man/man1/{name}.1.gz"
            ))
        } else {
            Ok(format!("{name}:"))
        }
    }
}

/// Register the search commands.
pub fn register_search_commands(set: &mut crate::CommandSet) {
    set.register(Box::new(FindCmd));
    set.register(Box::new(GrepCmd));
    set.register(Box::new(LocateCmd));
    set.register(Box::new(WhichCmd));
    set.register(Box::new(WhereisCmd));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandSet;
    use crate::interpreter::ExecutionResult;
    use mirage_types::{CommandMeta, SessionConfig};
    use mirage_vfs::seed_vfs;

    fn run_with_catalog(line: &str, catalog: &[CommandMeta]) -> ExecutionResult {
        let mut set = CommandSet::new();
        register_search_commands(&mut set);
        let vfs = seed_vfs();
        let config = SessionConfig::default();
        let mut ctx = ShellCtx {
            cwd: "/home/user".to_string(),
            vfs: &vfs,
            history: &[],
            config: &config,
            catalog,
            now_millis: 0,
        };
        set.execute(line, &mut ctx)
    }

    fn run(line: &str) -> ExecutionResult {
        run_with_catalog(line, &[])
    }

    #[test]
    fn glob_star_and_question() {
        assert!(glob_match("*.txt", "readme.txt"));
        assert!(glob_match("read??.txt", "readme.txt"));
        assert!(glob_match("*", "anything"));
        assert!(!glob_match("*.txt", "notes.md"));
        assert!(!glob_match("a?c", "abcd"));
    }

    #[test]
    fn find_by_name_prints_relative_paths() {
        let res = run("find . -name \"*.txt\" -type f");
        assert_eq!(res.exit_code, 0);
        assert_eq!(res.output, "./readme.txt");
    }

    #[test]
    fn find_without_filters_lists_tree() {
        let res = run("find .");
        assert!(res.output.lines().count() > 10);
        assert!(res.output.lines().any(|l| l == "./Documents/notes.md"));
    }

    #[test]
    fn find_type_d_only_directories() {
        let res = run("find . -type d");
        assert!(res.output.contains("./projects/webapp"));
        assert!(!res.output.contains("readme.txt"));
    }

    #[test]
    fn grep_matches_lines_in_file() {
        let res = run("grep alias .bashrc");
        assert_eq!(res.exit_code, 0);
        assert_eq!(res.output.lines().count(), 3);
        assert!(res.output.contains("alias ll='ls -la'"));
    }

    #[test]
    fn grep_numbered() {
        let res = run("grep -n EDITOR .bashrc");
        assert!(res.output.starts_with("4:"));
    }

    #[test]
    fn grep_recursive_prefixes_paths() {
        let res = run("grep -r terminal .");
        assert!(res.output.contains("/home/user/readme.txt:"));
    }

    #[test]
    fn grep_missing_file() {
        let res = run("grep pattern nothere.txt");
        assert_eq!(res.exit_code, 1);
        assert!(res.output.contains("No such file or directory"));
    }

    #[test]
    fn locate_finds_by_substring() {
        let res = run("locate syslog");
        assert_eq!(res.output, "/var/log/syslog");
    }

    #[test]
    fn which_resolves_registered_commands() {
        let catalog = vec![CommandMeta {
            name: "ls".to_string(),
            description: "List directory contents".to_string(),
            category: Category::File,
            usage: "ls".to_string(),
            examples: Vec::new(),
        }];
        let res = run_with_catalog("which ls", &catalog);
        assert_eq!(res.output, "/usr/bin/ls");
        let res = run_with_catalog("which frobnicate", &catalog);
        assert_eq!(res.exit_code, 1);
    }

    #[test]
    fn whereis_unknown_is_bare_colon() {
        let res = run("whereis frobnicate");
        assert_eq!(res.output, "frobnicate:");
        assert_eq!(res.exit_code, 0);
    }
}
