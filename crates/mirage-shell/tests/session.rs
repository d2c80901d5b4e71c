//! End-to-end session behavior over the seeded environment.

use mirage_shell::{Session, SubmitOutcome};
use mirage_types::{FixedClock, SessionConfig};

fn session() -> Session {
    Session::deterministic(SessionConfig::default(), Box::new(FixedClock(1_770_127_509_000)))
}

fn run(session: &mut Session, line: &str) -> mirage_types::CommandRecord {
    match session.submit(line) {
        SubmitOutcome::Executed(record) => record,
        other => panic!("expected execution for {line:?}, got {other:?}"),
    }
}

#[test]
fn pwd_in_fresh_session() {
    let mut s = session();
    let rec = run(&mut s, "pwd");
    assert_eq!(rec.output, "/home/user");
    assert_eq!(rec.exit_code, 0);
    assert_eq!(rec.directory, "/home/user");
}

#[test]
fn cd_to_missing_directory_reports_and_stays() {
    let mut s = session();
    let rec = run(&mut s, "cd nowhere");
    assert_eq!(rec.exit_code, 1);
    assert!(rec.output.contains("No such file or directory"));
    assert_eq!(s.cwd(), "/home/user");
}

#[test]
fn cat_of_missing_file() {
    let mut s = session();
    let rec = run(&mut s, "cat missing.txt");
    assert_eq!(rec.output, "cat: missing.txt: No such file or directory");
    assert_eq!(rec.exit_code, 1);
}

#[test]
fn unknown_command_is_127_and_recorded() {
    let mut s = session();
    let rec = run(&mut s, "unknowncmd --flag");
    assert_eq!(rec.exit_code, 127);
    assert!(rec.output.contains("unknowncmd: command not found"));
    assert_eq!(s.history().len(), 1);
}

#[test]
fn suggestion_from_static_table() {
    let s = session();
    assert_eq!(
        s.suggest("fin"),
        Some("find . -name \"*.txt\" -type f".to_string())
    );
}

#[test]
fn suggestion_from_git_history_rule() {
    let mut s = session();
    s.submit("git status");
    assert_eq!(s.suggest("git"), Some("git add .".to_string()));
}

#[test]
fn navigation_round_trip() {
    let mut s = session();
    run(&mut s, "cd projects");
    assert_eq!(s.cwd(), "/home/user/projects");
    let rec = run(&mut s, "ls");
    assert_eq!(rec.output, "webapp  api-server  scripts");
    run(&mut s, "cd ..");
    assert_eq!(s.cwd(), "/home/user");
    run(&mut s, "cd /var/log");
    assert_eq!(s.cwd(), "/var/log");
    let rec = run(&mut s, "cd");
    assert_eq!(rec.exit_code, 0);
    assert_eq!(s.cwd(), "/home/user");
}

#[test]
fn history_is_append_only_until_clear() {
    let mut s = session();
    run(&mut s, "pwd");
    run(&mut s, "cd nowhere");
    run(&mut s, "frobnicate");
    let commands: Vec<&str> = s.history().iter().map(|r| r.command.as_str()).collect();
    assert_eq!(commands, vec!["pwd", "cd nowhere", "frobnicate"]);

    assert_eq!(s.submit("clear"), SubmitOutcome::Cleared);
    assert!(s.history().is_empty());
}

#[test]
fn clear_preserves_working_directory() {
    let mut s = session();
    run(&mut s, "cd /etc");
    s.submit("clear");
    assert_eq!(s.cwd(), "/etc");
}

#[test]
fn two_sessions_with_same_script_agree() {
    let script = [
        "pwd",
        "ls -la",
        "cd projects",
        "ls",
        "cat /home/user/readme.txt",
        "ping -c 3 google.com",
        "uname -a",
        "date",
        "frobnicate",
    ];
    let mut a = session();
    let mut b = session();
    for line in script {
        let ra = run(&mut a, line);
        let rb = run(&mut b, line);
        assert_eq!(ra, rb, "diverged on {line:?}");
    }
    assert_eq!(a.cwd(), b.cwd());
}

#[test]
fn help_lists_every_category() {
    let mut s = session();
    let rec = run(&mut s, "help");
    assert_eq!(rec.exit_code, 0);
    for section in [
        "file:", "search:", "text:", "network:", "system:", "process:", "archive:",
        "permission:",
    ] {
        assert!(rec.output.contains(section), "missing section {section}");
    }
    assert!(rec.output.contains("ls"));
    assert!(rec.output.contains("ping"));
}

#[test]
fn help_for_one_command_shows_usage() {
    let mut s = session();
    let rec = run(&mut s, "help ping");
    assert!(rec.output.contains("ping [-c count] <host>"));
}

#[test]
fn which_knows_builtins_via_catalog() {
    let mut s = session();
    assert_eq!(run(&mut s, "which grep").output, "/usr/bin/grep");
    assert_eq!(run(&mut s, "which frobnicate").exit_code, 1);
}

#[test]
fn man_renders_registered_command() {
    let mut s = session();
    let rec = run(&mut s, "man tar");
    assert!(rec.output.starts_with("TAR(1)"));
    assert!(rec.output.contains("SYNOPSIS"));
}

#[test]
fn records_serialize_for_the_panel() {
    let mut s = session();
    let rec = run(&mut s, "pwd");
    let json = serde_json::to_string(&rec).unwrap();
    assert!(json.contains("\"id\":\"cmd-1\""));
    assert!(json.contains("\"exit_code\":0"));
    let back: mirage_types::CommandRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rec);
}

#[test]
fn busy_session_rejects_suggestions_but_not_after() {
    // `executing` only spans submit() internally, so from the outside
    // suggestions always work between submissions.
    let mut s = session();
    run(&mut s, "ping google.com");
    assert!(s.suggest("tra").is_some());
}
