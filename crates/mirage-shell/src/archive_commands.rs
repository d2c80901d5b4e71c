//! Archive commands, simulated end to end.
//!
//! Extraction renders a plausible member list derived from the archive
//! name; creation and compression are accepted silently. The VFS is
//! never modified.

use mirage_types::{Category, Result, ShellError};

use crate::interpreter::{Command, ShellCtx};

/// Strip recognized archive suffixes from a file name.
fn archive_stem(name: &str) -> &str {
    let base = name.rsplit('/').next().unwrap_or(name);
    for suffix in [
        ".tar.gz", ".tar.bz2", ".tar.xz", ".tgz", ".tar", ".zip", ".gz", ".bz2", ".xz",
    ] {
        if let Some(stem) = base.strip_suffix(suffix) {
            return stem;
        }
    }
    base
}

/// Fake member list for an archive, derived from its stem.
fn member_list(stem: &str) -> Vec<String> {
    vec![
        format!("{stem}/"),
        format!("{stem}/README.md"),
        format!("{stem}/src/"),
        format!("{stem}/src/main.c"),
        format!("{stem}/Makefile"),
    ]
}

// ---------------------------------------------------------------------------
// tar
// ---------------------------------------------------------------------------

struct TarCmd;
impl Command for TarCmd {
    fn name(&self) -> &'static str {
        "tar"
    }
    fn description(&self) -> &'static str {
        "Archive files (simulated)"
    }
    fn usage(&self) -> &'static str {
        "tar -xzf|-czf|-tzf <archive> [files...]"
    }
    fn category(&self) -> Category {
        Category::Archive
    }
    fn examples(&self) -> &'static [&'static str] {
        &["tar -xzf archive.tar.gz", "tar -czf backup.tar.gz projects"]
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let flags = args.first().copied().unwrap_or("");
        if !flags.contains('f') {
            return Err(ShellError::Message(
                "tar: Refusing to read archive contents from terminal (missing -f option?)".into(),
            ));
        }
        let archive = args
            .get(1)
            .copied()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| ShellError::Message("tar: option requires an argument -- 'f'".into()))?;
        let stem = archive_stem(archive);

        if flags.contains('x') {
            // Extraction is silent unless verbose.
            if flags.contains('v') {
                return Ok(member_list(stem).join("\n"));
            }
            return Ok(String::new());
        }
        if flags.contains('t') {
            return Ok(member_list(stem).join("\n"));
        }
        if flags.contains('c') {
            return Ok(String::new());
        }
        Err(ShellError::Message(
            "tar: You must specify one of the '-Acdtrux' options".into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// gzip family
// ---------------------------------------------------------------------------

/// A compressor that validates its operand suffix on decompression and
/// otherwise accepts silently.
struct Compressor {
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    /// Suffix required by the decompression form.
    suffix: &'static str,
    /// Whether this command decompresses (true) or compresses.
    decompress: bool,
}

impl Command for Compressor {
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
        Category::Archive
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operand = args
            .iter()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .ok_or_else(|| ShellError::missing(self.name, "file"))?;
        let decompress = self.decompress || args.contains(&"-d");
        if decompress && !operand.ends_with(self.suffix) {
            return Err(ShellError::Message(format!(
                "{}: {operand}: unknown suffix -- ignored",
                self.name
            )));
        }
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// zip / unzip
// ---------------------------------------------------------------------------

struct ZipCmd;
impl Command for ZipCmd {
    fn name(&self) -> &'static str {
        "zip"
    }
    fn description(&self) -> &'static str {
        "Create a zip archive (simulated)"
    }
    fn usage(&self) -> &'static str {
        "zip <archive> <files...>"
    }
    fn category(&self) -> Category {
        Category::Archive
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operands: Vec<&str> = args
            .iter()
            .copied()
            .filter(|a| !a.is_empty() && !a.starts_with('-'))
            .collect();
        if operands.len() < 2 {
            return Err(ShellError::Usage("zip <archive> <files...>".into()));
        }
        let lines: Vec<String> = operands[1..]
            .iter()
            .map(|f| format!("  adding: {f} (deflated 62%)"))
            .collect();
        Ok(lines.join("\n"))
    }
}

struct UnzipCmd;
impl Command for UnzipCmd {
    fn name(&self) -> &'static str {
        "unzip"
    }
    fn description(&self) -> &'static str {
        "Extract a zip archive (simulated)"
    }
    fn usage(&self) -> &'static str {
        "unzip <archive>"
    }
    fn category(&self) -> Category {
        Category::Archive
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let archive = args
            .iter()
            .copied()
            .find(|a| !a.is_empty() && !a.starts_with('-'))
            .ok_or_else(|| ShellError::Usage("unzip <archive>".into()))?;
        let stem = archive_stem(archive);
        let mut lines = vec![format!("Archive:  {archive}")];
        for member in member_list(stem) {
            if member.ends_with('/') {
                lines.push(format!("   creating: {member}"));
            } else {
                lines.push(format!("  inflating: {member}"));
            }
        }
        Ok(lines.join("\n"))
    }
}

/// Register tar, the compressors, and zip/unzip.
pub fn register_archive_commands(set: &mut crate::CommandSet) {
    set.register(Box::new(TarCmd));
    set.register(Box::new(Compressor {
        name: "gzip",
        description: "Compress a file (simulated)",
        usage: "gzip <file>",
        suffix: ".gz",
        decompress: false,
    }));
    set.register(Box::new(Compressor {
        name: "gunzip",
        description: "Decompress a gzip file (simulated)",
        usage: "gunzip <file.gz>",
        suffix: ".gz",
        decompress: true,
    }));
    set.register(Box::new(Compressor {
        name: "bzip2",
        description: "Compress a file with bzip2 (simulated)",
        usage: "bzip2 [-d] <file>",
        suffix: ".bz2",
        decompress: false,
    }));
    set.register(Box::new(Compressor {
        name: "xz",
        description: "Compress a file with xz (simulated)",
        usage: "xz [-d] <file>",
        suffix: ".xz",
        decompress: false,
    }));
    set.register(Box::new(ZipCmd));
    set.register(Box::new(UnzipCmd));
}
