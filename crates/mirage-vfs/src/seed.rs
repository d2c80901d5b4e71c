//! Default seed tree.
//!
//! Supplied to every session at start so file commands behave
//! consistently across runs. Only `readme.txt` and `.bashrc` carry
//! contents; everything else exists purely as listing entries.

use crate::{MemoryVfs, VfsEntry};

const README: &str = "\
Welcome to the mirage terminal!

This is a simulated Linux environment running in your browser.
Try commands like:

  ls -la          list files with details
  cd projects     change directory
  cat .bashrc     view shell configuration
  ping google.com test network (simulated)
  help            full command reference

No real processes are spawned and no data leaves the page.
";

const BASHRC: &str = "\
# ~/.bashrc: executed by bash(1) for non-login shells.

export PATH=\"$HOME/.local/bin:$PATH\"
export EDITOR=vim

alias ll='ls -la'
alias gs='git status'
alias ..='cd ..'

# Enable color prompt
PS1='\\u@\\h:\\w\\$ '
";

/// Build the default virtual file tree.
pub fn seed_vfs() -> MemoryVfs {
    let mut vfs = MemoryVfs::new();

    vfs.insert_dir(
        "/",
        vec![
            VfsEntry::dir("bin").modified("Jan 10 08:00"),
            VfsEntry::dir("etc").modified("Jan 12 09:15"),
            VfsEntry::dir("home").modified("Jan 15 10:30"),
            VfsEntry::dir("opt").modified("Jan 10 08:00"),
            VfsEntry::dir("tmp").mode("drwxrwxrwt").modified("Feb 02 14:45"),
            VfsEntry::dir("usr").modified("Jan 10 08:00"),
            VfsEntry::dir("var").modified("Jan 28 11:20"),
        ],
    );

    vfs.insert_dir("/home", vec![VfsEntry::dir("user").modified("Jan 15 10:30")]);

    vfs.insert_dir(
        "/home/user",
        vec![
            VfsEntry::dir("Documents").modified("Jan 20 16:42"),
            VfsEntry::dir("Downloads").modified("Feb 01 09:03"),
            VfsEntry::dir("projects").modified("Feb 03 18:21"),
            VfsEntry::dir(".config").mode("drwx------").modified("Jan 15 10:30"),
            VfsEntry::dir(".ssh").mode("drwx------").modified("Jan 15 10:31"),
            VfsEntry::file("readme.txt", README.len() as u64).modified("Jan 15 10:30"),
            VfsEntry::file(".bashrc", BASHRC.len() as u64).modified("Jan 15 10:30"),
        ],
    );

    vfs.insert_dir(
        "/home/user/Documents",
        vec![
            VfsEntry::file("notes.md", 2048).modified("Jan 20 16:42"),
            VfsEntry::file("resume.pdf", 48_213).modified("Jan 18 12:00"),
        ],
    );

    vfs.insert_dir(
        "/home/user/Downloads",
        vec![
            VfsEntry::file("archive.tar.gz", 1_258_291).modified("Feb 01 09:03"),
            VfsEntry::file("setup.sh", 812).mode("-rwxr-xr-x").modified("Jan 29 17:55"),
        ],
    );

    vfs.insert_dir(
        "/home/user/projects",
        vec![
            VfsEntry::dir("webapp").modified("Feb 03 18:21"),
            VfsEntry::dir("api-server").modified("Feb 02 10:14"),
            VfsEntry::dir("scripts").modified("Jan 25 08:47"),
        ],
    );

    vfs.insert_dir("/home/user/projects/webapp", Vec::new());
    vfs.insert_dir("/home/user/projects/api-server", Vec::new());
    vfs.insert_dir("/home/user/projects/scripts", Vec::new());
    vfs.insert_dir("/home/user/.config", Vec::new());
    vfs.insert_dir("/home/user/.ssh", Vec::new());

    vfs.insert_dir(
        "/etc",
        vec![
            VfsEntry::file("passwd", 1832).mode("-rw-r--r--").modified("Jan 12 09:15"),
            VfsEntry::file("hosts", 221).modified("Jan 12 09:15"),
            VfsEntry::dir("nginx").modified("Jan 14 13:02"),
        ],
    );
    vfs.insert_dir("/etc/nginx", vec![VfsEntry::file("nginx.conf", 2914).modified("Jan 14 13:02")]);

    vfs.insert_dir(
        "/var",
        vec![
            VfsEntry::dir("log").modified("Feb 03 23:59"),
            VfsEntry::dir("www").modified("Jan 14 13:02"),
        ],
    );
    vfs.insert_dir(
        "/var/log",
        vec![
            VfsEntry::file("syslog", 524_288).modified("Feb 03 23:59"),
            VfsEntry::file("auth.log", 131_072).modified("Feb 03 23:58"),
        ],
    );
    vfs.insert_dir("/var/www", vec![VfsEntry::dir("html").modified("Jan 14 13:02")]);
    vfs.insert_dir("/var/www/html", Vec::new());

    vfs.insert_dir("/usr", vec![
        VfsEntry::dir("bin").modified("Jan 10 08:00"),
        VfsEntry::dir("local").modified("Jan 10 08:00"),
        VfsEntry::dir("share").modified("Jan 10 08:00"),
    ]);
    vfs.insert_dir("/usr/bin", Vec::new());
    vfs.insert_dir("/usr/local", Vec::new());
    vfs.insert_dir("/usr/share", Vec::new());

    vfs.insert_dir("/bin", Vec::new());
    vfs.insert_dir("/opt", Vec::new());
    vfs.insert_dir("/tmp", Vec::new());

    vfs.insert_file("/home/user/readme.txt", README);
    vfs.insert_file("/home/user/.bashrc", BASHRC);

    vfs
}
