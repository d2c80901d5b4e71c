//! Text processing commands.
//!
//! These operate on real file contents where the VFS has them, with
//! the same operand taxonomy as the file commands. `man` renders pages
//! from the command catalog carried in the context.

use mirage_types::{Category, Result, ShellError};

use crate::interpreter::{Command, ShellCtx, join_path};

/// Read a file operand for `cmd`, with the standard error taxonomy.
fn read_file(cmd: &str, operand: &str, ctx: &ShellCtx<'_>) -> Result<String> {
    let path = join_path(&ctx.cwd, operand);
    ctx.vfs
        .read(&path)
        .map(|s| s.to_string())
        .ok_or_else(|| ShellError::no_such(cmd, operand))
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &'static str {
        "echo"
    }
    fn description(&self) -> &'static str {
        "Print arguments"
    }
    fn usage(&self) -> &'static str {
        "echo [text...]"
    }
    fn category(&self) -> Category {
        Category::Text
    }
    fn examples(&self) -> &'static [&'static str] {
        &["echo hello world"]
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        // Joining with single spaces round-trips the empty tokens the
        // tokenizer kept, so doubled spacing in the input survives.
        Ok(args.join(" "))
    }
}

// ---------------------------------------------------------------------------
// sed / awk
// ---------------------------------------------------------------------------

struct SedCmd;
impl Command for SedCmd {
    fn name(&self) -> &'static str {
        "sed"
    }
    fn description(&self) -> &'static str {
        "Stream editor (substitution only)"
    }
    fn usage(&self) -> &'static str {
        "sed 's/from/to/' <file>"
    }
    fn category(&self) -> Category {
        Category::Text
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let mut operands = args
            .iter()
            .copied()
            .filter(|a| !a.is_empty() && !a.starts_with('-'));
        let script = operands
            .next()
            .map(|s| s.trim_matches('\'').trim_matches('"'))
            .ok_or_else(|| ShellError::Usage("sed 's/from/to/' <file>".into()))?;
        let file = operands
            .next()
            .ok_or_else(|| ShellError::missing("sed", "file"))?;

        let parts: Vec<&str> = script.split('/').collect();
        if parts.len() < 4 || parts[0] != "s" {
            return Err(ShellError::Message(format!(
                "sed: -e expression #1, char {}: unknown command: `{}'",
                1,
                script.chars().next().unwrap_or(' ')
            )));
        }
        let (from, to) = (parts[1], parts[2]);
        let global = parts[3].contains('g');

        let contents = read_file("sed", file, ctx)?;
        let out: Vec<String> = contents
            .lines()
            .map(|line| {
                if global {
                    line.replace(from, to)
                } else {
                    line.replacen(from, to, 1)
                }
            })
            .collect();
        Ok(out.join("\n"))
    }
}

struct AwkCmd;
impl Command for AwkCmd {
    fn name(&self) -> &'static str {
        "awk"
    }
    fn description(&self) -> &'static str {
        "Pattern scanning (field printing only)"
    }
    fn usage(&self) -> &'static str {
        "awk '{print $N}' <file>"
    }
    fn category(&self) -> Category {
        Category::Text
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        // The quoted program usually contains a space, so it spans
        // several tokens. Re-scan the joined text for the quoted span.
        let joined = args.join(" ");
        let joined = joined.trim();
        let (program, rest) = match joined.chars().next() {
            Some(q @ ('\'' | '"')) => match joined[1..].split_once(q) {
                Some((p, r)) => (p.to_string(), r.trim().to_string()),
                None => (joined[1..].to_string(), String::new()),
            },
            Some(_) => match joined.split_once(' ') {
                Some((p, r)) => (p.to_string(), r.trim().to_string()),
                None => (joined.to_string(), String::new()),
            },
            None => {
                return Err(ShellError::Usage("awk '{print $N}' <file>".into()));
            }
        };
        let file = rest
            .split(' ')
            .find(|t| !t.is_empty() && !t.starts_with('-'))
            .ok_or_else(|| ShellError::missing("awk", "file"))?;
        let program = program.as_str();

        // Only the `{print $N}` form is understood.
        let field: usize = program
            .trim_start_matches('{')
            .trim_end_matches('}')
            .trim()
            .strip_prefix("print $")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| {
                ShellError::Message(format!("awk: syntax error in program `{program}'"))
            })?;

        let contents = read_file("awk", file, ctx)?;
        let out: Vec<&str> = contents
            .lines()
            .map(|line| {
                if field == 0 {
                    line
                } else {
                    line.split_whitespace().nth(field - 1).unwrap_or("")
                }
            })
            .collect();
        Ok(out.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// sort / uniq / cut / tr
// ---------------------------------------------------------------------------

struct SortCmd;
impl Command for SortCmd {
    fn name(&self) -> &'static str {
        "sort"
    }
    fn description(&self) -> &'static str {
        "Sort lines of a file"
    }
    fn usage(&self) -> &'static str {
        "sort [-r|-u] <file>"
    }
    fn category(&self) -> Category {
        Category::Text
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let file = args
            .iter()
            .copied()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .ok_or_else(|| ShellError::missing("sort", "file"))?;
        let contents = read_file("sort", file, ctx)?;
        let mut lines: Vec<&str> = contents.lines().collect();
        lines.sort_unstable();
        if args.contains(&"-u") {
            lines.dedup();
        }
        if args.contains(&"-r") {
            lines.reverse();
        }
        Ok(lines.join("\n"))
    }
}

struct UniqCmd;
impl Command for UniqCmd {
    fn name(&self) -> &'static str {
        "uniq"
    }
    fn description(&self) -> &'static str {
        "Filter adjacent duplicate lines"
    }
    fn usage(&self) -> &'static str {
        "uniq [-c] <file>"
    }
    fn category(&self) -> Category {
        Category::Text
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let file = args
            .iter()
            .copied()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .ok_or_else(|| ShellError::missing("uniq", "file"))?;
        let counted = args.contains(&"-c");
        let contents = read_file("uniq", file, ctx)?;

        let mut out: Vec<String> = Vec::new();
        let mut current: Option<(&str, usize)> = None;
        for line in contents.lines() {
            match current {
                Some((prev, n)) if prev == line => current = Some((prev, n + 1)),
                Some((prev, n)) => {
                    out.push(if counted {
                        format!("{n:>7} {prev}")
                    } else {
                        prev.to_string()
                    });
                    current = Some((line, 1));
                }
                None => current = Some((line, 1)),
            }
        }
        if let Some((prev, n)) = current {
            out.push(if counted {
                format!("{n:>7} {prev}")
            } else {
                prev.to_string()
            });
        }
        Ok(out.join("\n"))
    }
}

struct CutCmd;
impl Command for CutCmd {
    fn name(&self) -> &'static str {
        "cut"
    }
    fn description(&self) -> &'static str {
        "Select fields from each line"
    }
    fn usage(&self) -> &'static str {
        "cut -d <delim> -f <n> <file>"
    }
    fn category(&self) -> Category {
        Category::Text
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let mut delim = "\t".to_string();
        let mut field: usize = 1;
        let mut file: Option<&str> = None;
        let mut iter = args.iter().copied().filter(|a| !a.is_empty());
        while let Some(tok) = iter.next() {
            if let Some(d) = tok.strip_prefix("-d") {
                if d.is_empty() {
                    if let Some(v) = iter.next() {
                        delim = v.trim_matches('\'').trim_matches('"').to_string();
                    }
                } else {
                    delim = d.trim_matches('\'').trim_matches('"').to_string();
                }
            } else if let Some(f) = tok.strip_prefix("-f") {
                let value = if f.is_empty() {
                    iter.next().unwrap_or("1")
                } else {
                    f
                };
                field = value.parse().unwrap_or(1);
            } else if !tok.starts_with('-') {
                file = Some(tok);
            }
        }
        let file = file.ok_or_else(|| ShellError::missing("cut", "file"))?;
        let contents = read_file("cut", file, ctx)?;
        let out: Vec<&str> = contents
            .lines()
            .map(|line| line.split(delim.as_str()).nth(field.saturating_sub(1)).unwrap_or(line))
            .collect();
        Ok(out.join("\n"))
    }
}

struct TrCmd;
impl Command for TrCmd {
    fn name(&self) -> &'static str {
        "tr"
    }
    fn description(&self) -> &'static str {
        "Translate characters (stdin-less, output only)"
    }
    fn usage(&self) -> &'static str {
        "tr <set1> <set2>"
    }
    fn category(&self) -> Category {
        Category::Text
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operands: Vec<&str> = args
            .iter()
            .copied()
            .filter(|a| !a.is_empty() && !a.starts_with('-'))
            .collect();
        if operands.is_empty() {
            return Err(ShellError::missing("tr", "operand"));
        }
        // There is no piped stdin in this shell, so a valid invocation
        // translates nothing.
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// diff
// ---------------------------------------------------------------------------

struct DiffCmd;
impl Command for DiffCmd {
    fn name(&self) -> &'static str {
        "diff"
    }
    fn description(&self) -> &'static str {
        "Compare two files line by line"
    }
    fn usage(&self) -> &'static str {
        "diff <file1> <file2>"
    }
    fn category(&self) -> Category {
        Category::Text
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operands: Vec<&str> = args
            .iter()
            .copied()
            .filter(|a| !a.is_empty() && !a.starts_with('-'))
            .collect();
        let [a, b] = operands.as_slice() else {
            return Err(ShellError::Usage("diff <file1> <file2>".into()));
        };
        let left = read_file("diff", a, ctx)?;
        let right = read_file("diff", b, ctx)?;
        if left == right {
            return Ok(String::new());
        }
        // Naive line-pair report, enough for two small files.
        let left_lines: Vec<&str> = left.lines().collect();
        let right_lines: Vec<&str> = right.lines().collect();
        let mut out = Vec::new();
        let max = left_lines.len().max(right_lines.len());
        for i in 0..max {
            let l = left_lines.get(i);
            let r = right_lines.get(i);
            if l != r {
                out.push(format!("{}c{}", i + 1, i + 1));
                if let Some(l) = l {
                    out.push(format!("< {l}"));
                }
                out.push("---".to_string());
                if let Some(r) = r {
                    out.push(format!("> {r}"));
                }
            }
        }
        Ok(out.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// man
// ---------------------------------------------------------------------------

struct ManCmd;
impl Command for ManCmd {
    fn name(&self) -> &'static str {
        "man"
    }
    fn description(&self) -> &'static str {
        "Show the manual page for a command"
    }
    fn usage(&self) -> &'static str {
        "man <command>"
    }
    fn category(&self) -> Category {
        Category::Text
    }
    fn execute(&self, args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        let name = args
            .iter()
            .find(|a| !a.is_empty())
            .ok_or_else(|| ShellError::Message("What manual page do you want?\nFor example, try 'man man'.".into()))?;
        let meta = ctx
            .catalog
            .iter()
            .find(|m| m.name == *name)
            .ok_or_else(|| ShellError::Message(format!("No manual entry for {name}")))?;

        let upper = meta.name.to_uppercase();
        let mut page = format!(
            "{upper}(1)                 User Commands                 {upper}(1)\n\nNAME\n       {} - {}\n\nSYNOPSIS\n       {}",
            meta.name,
            meta.description.to_lowercase(),
            meta.usage
        );
        if !meta.examples.is_empty() {
            page.push_str("\n\nEXAMPLES");
            for ex in &meta.examples {
                page.push_str(&format!("\n       {ex}"));
            }
        }
        Ok(page)
    }
}

/// Register the text processing commands.
pub fn register_text_commands(set: &mut crate::CommandSet) {
    set.register(Box::new(EchoCmd));
    set.register(Box::new(SedCmd));
    set.register(Box::new(AwkCmd));
    set.register(Box::new(SortCmd));
    set.register(Box::new(UniqCmd));
    set.register(Box::new(CutCmd));
    set.register(Box::new(TrCmd));
    set.register(Box::new(DiffCmd));
    set.register(Box::new(ManCmd));
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
        register_text_commands(&mut set);
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
    fn echo_joins_args() {
        assert_eq!(run("echo hello world").output, "hello world");
    }

    #[test]
    fn echo_preserves_consecutive_spaces() {
        assert_eq!(run("echo a  b").output, "a  b");
    }

    #[test]
    fn echo_empty() {
        let res = run("echo");
        assert_eq!(res.output, "");
        assert_eq!(res.exit_code, 0);
    }

    #[test]
    fn sed_substitutes_first_match() {
        let res = run("sed s/bash/zsh/ .bashrc");
        assert_eq!(res.exit_code, 0);
        // Only the first match on each line changes.
        assert!(res.output.contains("~/.zshrc: executed by bash(1)"));
    }

    #[test]
    fn sed_global_flag() {
        let res = run("sed s/a/A/g .bashrc");
        assert!(!res.output.contains("alias"));
        assert!(res.output.contains("AliAs"));
    }

    #[test]
    fn sed_bad_script() {
        let res = run("sed q/x/y/ .bashrc");
        assert_eq!(res.exit_code, 1);
        assert!(res.output.contains("unknown command"));
    }

    #[test]
    fn awk_prints_field() {
        let res = run("awk '{print $1}' .bashrc");
        assert_eq!(res.exit_code, 0);
        assert!(res.output.lines().any(|l| l == "export"));
        assert!(res.output.lines().any(|l| l == "alias"));
    }

    #[test]
    fn sort_reverses_with_flag() {
        let plain = run("sort readme.txt");
        let reversed = run("sort -r readme.txt");
        let mut expect: Vec<&str> = plain.output.lines().collect();
        expect.reverse();
        let got: Vec<&str> = reversed.output.lines().collect();
        assert_eq!(got, expect);
    }

    #[test]
    fn uniq_counts_adjacent_blanks() {
        let res = run("uniq -c readme.txt");
        assert_eq!(res.exit_code, 0);
        assert!(res.output.lines().next().unwrap().trim().starts_with("1 "));
    }

    #[test]
    fn cut_selects_field() {
        let res = run("cut -d = -f 1 .bashrc");
        assert!(res.output.lines().any(|l| l == "export EDITOR"));
    }

    #[test]
    fn tr_requires_operands() {
        let res = run("tr");
        assert_eq!(res.exit_code, 1);
        assert_eq!(res.output, "tr: missing operand");
        assert_eq!(run("tr a-z A-Z").exit_code, 0);
    }

    #[test]
    fn diff_identical_file_is_silent() {
        let res = run("diff readme.txt readme.txt");
        assert_eq!(res.output, "");
        assert_eq!(res.exit_code, 0);
    }

    #[test]
    fn diff_different_files_report() {
        let res = run("diff readme.txt .bashrc");
        assert!(res.output.contains("---"));
        assert!(res.output.lines().any(|l| l.starts_with("< ")));
    }

    #[test]
    fn man_renders_from_catalog() {
        let catalog = vec![CommandMeta {
            name: "ls".to_string(),
            description: "List directory contents".to_string(),
            category: Category::File,
            usage: "ls [-la] [path]".to_string(),
            examples: vec!["ls -la".to_string()],
        }];
        let res = run_with_catalog("man ls", &catalog);
        assert!(res.output.starts_with("LS(1)"));
        assert!(res.output.contains("ls - list directory contents"));
        assert!(res.output.contains("EXAMPLES"));
    }

    #[test]
    fn man_unknown_command() {
        let res = run("man frobnicate");
        assert_eq!(res.exit_code, 1);
        assert_eq!(res.output, "No manual entry for frobnicate");
    }

    #[test]
    fn man_without_argument() {
        let res = run("man");
        assert_eq!(res.exit_code, 1);
        assert!(res.output.contains("What manual page do you want?"));
    }
}
