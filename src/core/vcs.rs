//! Version-control status for the listed directory.
//!
//! A [StatusSource] answers "what changed here" for one directory. The default source,
//! [GitCli], shells out to `git` the same way other external tools are invoked: located
//! with `which`, run synchronously, any failure treated as "not a repository".
//!
//! [decorate] attaches the reported codes to the scanned entries before sorting.

use crate::core::Entry;

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

/// Per-directory status: the current branch and `(relative path, code)` pairs.
/// Paths are relative to the queried directory and use `/` separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub branch: Option<String>,
    pub files: Vec<(String, char)>,
}

/// Something that can report status for a directory. `None` means "not tracked".
pub trait StatusSource {
    fn query(&self, dir: &Path) -> Option<StatusReport>;
}

/// Reduces a two-column porcelain code to the single character shown.
///
/// `??` is untracked, `!!` ignored; otherwise the index column wins unless blank.
pub fn status_code(xy: &str) -> Option<char> {
    let mut chars = xy.chars();
    let x = chars.next()?;
    let y = chars.next().unwrap_or(' ');
    match (x, y) {
        ('?', '?') => Some('?'),
        ('!', '!') => Some('!'),
        (' ', ' ') => None,
        (' ', y) => Some(y),
        (x, _) => Some(x),
    }
}

/// Parses `git status --porcelain -z` output.
///
/// Paths in the output are relative to the repository root; `prefix` (the listed
/// directory's own path inside the repository, as printed by `--show-prefix`) is
/// stripped and records outside it are dropped.
pub fn parse_porcelain(raw: &[u8], prefix: &str) -> Vec<(String, char)> {
    let mut out = Vec::new();
    let mut records = raw.split(|&b| b == 0).filter(|r| !r.is_empty());

    while let Some(record) = records.next() {
        let record = String::from_utf8_lossy(record);
        if record.len() < 4 {
            continue;
        }
        let (xy, path) = record.split_at(2);
        let path = &path[1..];

        // Renames and copies carry the original path as a separate record.
        if xy.starts_with(['R', 'C']) {
            records.next();
        }

        let Some(code) = status_code(xy) else {
            continue;
        };
        let Some(rel) = path.strip_prefix(prefix) else {
            continue;
        };
        if rel.is_empty() {
            continue;
        }
        out.push((rel.to_owned(), code));
    }
    out
}

/// Applies a report to scanned entries.
///
/// A path naming an entry annotates it (a trailing `/` is ignored, as is a leading
/// `./` on target labels). Any other nested path marks its top-level directory entry
/// as containing changes.
pub fn decorate(entries: &mut [Entry], report: &StatusReport) {
    if report.files.is_empty() || entries.is_empty() {
        return;
    }

    let index: HashMap<&str, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.name().strip_prefix("./").unwrap_or(e.name()), i))
        .collect();

    let mut direct = Vec::new();
    let mut nested = Vec::new();
    for (path, code) in &report.files {
        let path = path.trim_end_matches('/');
        if let Some(&i) = index.get(path) {
            direct.push((i, *code));
            continue;
        }
        if let Some((top, _)) = path.split_once('/')
            && let Some(&i) = index.get(top)
        {
            nested.push(i);
        }
    }

    for (i, code) in direct {
        entries[i].annotate(code);
    }
    for i in nested {
        if entries[i].is_dir() {
            entries[i].mark_modified_descendant();
        }
    }
}

/// Status from the `git` command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    pub fn available() -> bool {
        which::which("git").is_ok()
    }

    fn run<I, S>(dir: &Path, args: I) -> Option<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(out) if out.status.success() => Some(out.stdout),
            Ok(out) => {
                tracing::debug!(dir = %dir.display(), status = ?out.status, "git exited with failure");
                None
            }
            Err(err) => {
                tracing::debug!(dir = %dir.display(), %err, "failed to spawn git");
                None
            }
        }
    }

    fn first_line(raw: Vec<u8>) -> String {
        String::from_utf8_lossy(&raw)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_owned()
    }
}

impl StatusSource for GitCli {
    fn query(&self, dir: &Path) -> Option<StatusReport> {
        if !Self::available() {
            tracing::debug!("git not found in PATH");
            return None;
        }

        let prefix = Self::first_line(Self::run(dir, ["rev-parse", "--show-prefix"])?);
        let raw = Self::run(dir, ["status", "--porcelain", "-z"])?;
        let files = parse_porcelain(&raw, &prefix);

        let branch = Self::run(dir, ["rev-parse", "--abbrev-ref", "HEAD"])
            .map(Self::first_line)
            .filter(|b| !b.is_empty());

        tracing::debug!(dir = %dir.display(), ?branch, changed = files.len(), "git status");
        Some(StatusReport { branch, files })
    }
}
