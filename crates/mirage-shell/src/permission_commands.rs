//! Permission and identity commands.
//!
//! Privilege escalation is always denied; the emulated user never
//! becomes root. Mode and ownership changes validate their arguments
//! and succeed silently without touching the VFS.

use mirage_types::{Category, Result, ShellError};

use crate::interpreter::{Command, ShellCtx};

/// Octal (up to 4 digits) or symbolic (`u+rwx` style) chmod mode.
fn valid_mode(mode: &str) -> bool {
    if mode.is_empty() {
        return false;
    }
    if mode.len() <= 4 && mode.chars().all(|c| ('0'..='7').contains(&c)) {
        return true;
    }
    // Symbolic form: [ugoa]*[+-=][rwxXst]+
    let mut chars = mode.chars().peekable();
    while matches!(chars.peek(), Some('u' | 'g' | 'o' | 'a')) {
        chars.next();
    }
    if !matches!(chars.next(), Some('+' | '-' | '=')) {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    !rest.is_empty() && rest.iter().all(|c| "rwxXst".contains(*c))
}

// ---------------------------------------------------------------------------
// chmod / chown / chgrp
// ---------------------------------------------------------------------------

struct ChmodCmd;
impl Command for ChmodCmd {
    fn name(&self) -> &'static str {
        "chmod"
    }
    fn description(&self) -> &'static str {
        "Change file mode (simulated)"
    }
    fn usage(&self) -> &'static str {
        "chmod <mode> <file>"
    }
    fn category(&self) -> Category {
        Category::Permission
    }
    fn examples(&self) -> &'static [&'static str] {
        &["chmod 755 setup.sh", "chmod u+x setup.sh"]
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operands: Vec<&str> = args
            .iter()
            .copied()
            .filter(|a| !a.is_empty() && !a.starts_with('-'))
            .collect();
        let Some(mode) = operands.first().copied() else {
            return Err(ShellError::missing("chmod", "operand"));
        };
        if operands.len() < 2 {
            return Err(ShellError::Message(format!(
                "chmod: missing operand after '{mode}'"
            )));
        }
        if !valid_mode(mode) {
            return Err(ShellError::Message(format!(
                "chmod: invalid mode: '{mode}'"
            )));
        }
        Ok(String::new())
    }
}

/// chown and chgrp share the owner[:group] validation shape.
struct OwnershipCmd {
    name: &'static str,
    description: &'static str,
    usage: &'static str,
}

impl Command for OwnershipCmd {
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
        Category::Permission
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operands: Vec<&str> = args
            .iter()
            .copied()
            .filter(|a| !a.is_empty() && !a.starts_with('-'))
            .collect();
        if operands.is_empty() {
            return Err(ShellError::missing(self.name, "operand"));
        }
        if operands.len() < 2 {
            return Err(ShellError::Message(format!(
                "{}: missing operand after '{}'",
                self.name, operands[0]
            )));
        }
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// umask / sudo / su / passwd
// ---------------------------------------------------------------------------

struct UmaskCmd;
impl Command for UmaskCmd {
    fn name(&self) -> &'static str {
        "umask"
    }
    fn description(&self) -> &'static str {
        "Show the file mode creation mask"
    }
    fn usage(&self) -> &'static str {
        "umask"
    }
    fn category(&self) -> Category {
        Category::Permission
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok("0022".to_string())
    }
}

struct SudoCmd;
impl Command for SudoCmd {
    fn name(&self) -> &'static str {
        "sudo"
    }
    fn description(&self) -> &'static str {
        "Execute as another user (always denied)"
    }
    fn usage(&self) -> &'static str {
        "sudo <command>"
    }
    fn category(&self) -> Category {
        Category::Permission
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        Err(ShellError::Message(format!(
            "{} is not in the sudoers file.  This incident will be reported.",
            ctx.config.user
        )))
    }
}

struct SuCmd;
impl Command for SuCmd {
    fn name(&self) -> &'static str {
        "su"
    }
    fn description(&self) -> &'static str {
        "Switch user (always denied)"
    }
    fn usage(&self) -> &'static str {
        "su [user]"
    }
    fn category(&self) -> Category {
        Category::Permission
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Err(ShellError::Message("su: Authentication failure".into()))
    }
}

struct PasswdCmd;
impl Command for PasswdCmd {
    fn name(&self) -> &'static str {
        "passwd"
    }
    fn description(&self) -> &'static str {
        "Change user password (always denied)"
    }
    fn usage(&self) -> &'static str {
        "passwd"
    }
    fn category(&self) -> Category {
        Category::Permission
    }
    fn execute(&self, _args: &[&str], ctx: &mut ShellCtx<'_>) -> Result<String> {
        Err(ShellError::Message(format!(
            "passwd: Authentication token manipulation error\npasswd: password unchanged for {}",
            ctx.config.user
        )))
    }
}

/// Register permission and identity commands.
pub fn register_permission_commands(set: &mut crate::CommandSet) {
    set.register(Box::new(ChmodCmd));
    set.register(Box::new(OwnershipCmd {
        name: "chown",
        description: "Change file owner (simulated)",
        usage: "chown <owner[:group]> <file>",
    }));
    set.register(Box::new(OwnershipCmd {
        name: "chgrp",
        description: "Change file group (simulated)",
        usage: "chgrp <group> <file>",
    }));
    set.register(Box::new(UmaskCmd));
    set.register(Box::new(SudoCmd));
    set.register(Box::new(SuCmd));
    set.register(Box::new(PasswdCmd));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandSet;
    use crate::interpreter::ExecutionResult;
    use mirage_types::SessionConfig;
    use mirage_vfs::seed_vfs;

    fn run(line: &str) -> ExecutionResult {
        let mut set = CommandSet::new();
        register_permission_commands(&mut set);
        let vfs = seed_vfs();
        let config = SessionConfig::default();
        let mut ctx = ShellCtx {
            cwd: "/home/user".to_string(),
            vfs: &vfs,
            history: &[],
            config: &config,
            catalog: &[],
            now_millis: 0,
        };
        set.execute(line, &mut ctx)
    }

    #[test]
    fn mode_validation() {
        assert!(valid_mode("755"));
        assert!(valid_mode("0644"));
        assert!(valid_mode("u+x"));
        assert!(valid_mode("go-w"));
        assert!(valid_mode("a=rX"));
        assert!(!valid_mode("999"));
        assert!(!valid_mode("xyz"));
        assert!(!valid_mode("u+q"));
        assert!(!valid_mode(""));
    }

    #[test]
    fn chmod_accepts_valid_modes() {
        assert_eq!(run("chmod 755 setup.sh").exit_code, 0);
        assert_eq!(run("chmod u+x setup.sh").exit_code, 0);
    }

    #[test]
    fn chmod_rejects_invalid_mode() {
        let res = run("chmod 999 setup.sh");
        assert_eq!(res.exit_code, 1);
        assert_eq!(res.output, "chmod: invalid mode: '999'");
    }

    #[test]
    fn chmod_missing_file_operand() {
        let res = run("chmod 755");
        assert_eq!(res.exit_code, 1);
        assert_eq!(res.output, "chmod: missing operand after '755'");
    }

    #[test]
    fn sudo_is_always_denied() {
        let res = run("sudo apt install vim");
        assert_eq!(res.exit_code, 1);
        assert_eq!(
            res.output,
            "user is not in the sudoers file.  This incident will be reported."
        );
    }

    #[test]
    fn su_fails_authentication() {
        let res = run("su root");
        assert_eq!(res.exit_code, 1);
        assert_eq!(res.output, "su: Authentication failure");
    }

    #[test]
    fn umask_is_fixed() {
        assert_eq!(run("umask").output, "0022");
    }

    #[test]
    fn chown_validates_operands() {
        assert_eq!(run("chown root:root setup.sh").exit_code, 0);
        let res = run("chown root");
        assert_eq!(res.output, "chown: missing operand after 'root'");
    }
}
