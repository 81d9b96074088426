//! Listing orchestration for facad.
//!
//! [App] ties the pieces together for one invocation: resolve what to list, scan and
//! classify it, attach version-control status, filter and sort, then render.
//! [run] is the command line front end used by the binary.

use crate::config::{Config, Palette};
use crate::core::{
    Entry, FacadError, Formatter, GitCli, StatusSource, decorate, resolve_dir, scan_dir,
    scan_targets,
};
use crate::ui::render;
use crate::utils::cli::{CliAction, Target, parse_args, print_help, print_unrecognized, print_version};

use crossterm::tty::IsTty;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Width used when the terminal size cannot be determined.
pub const FALLBACK_WIDTH: usize = 80;

/// Everything needed to render one listing.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Resolved directory: shown in the header, queried for status and used for the
    /// column cap.
    pub dir: PathBuf,
    pub entries: Vec<Entry>,
    pub branch: Option<String>,
}

/// One invocation's state: configuration plus the status source.
pub struct App<'a, S: StatusSource> {
    config: &'a Config,
    status: S,
}

impl<'a> App<'a, GitCli> {
    pub fn new(config: &'a Config) -> Self {
        Self::with_status(config, GitCli)
    }
}

impl<'a, S: StatusSource> App<'a, S> {
    pub fn with_status(config: &'a Config, status: S) -> Self {
        App { config, status }
    }

    /// Resolves and scans a target, then decorates, filters and sorts the entries.
    ///
    /// # Errors
    /// Fails when a directory cannot be opened, a pattern is invalid, or an explicit
    /// target list leaves nothing to list.
    pub fn collect(&self, target: &Target) -> Result<Listing, FacadError> {
        let cwd = resolve_dir(&std::env::current_dir()?);

        let (dir, mut entries) = match target {
            Target::Cwd => {
                let entries = scan_dir(&cwd)?;
                (cwd, entries)
            }
            Target::Path(path) => match std::fs::metadata(path) {
                Ok(md) if md.is_dir() => {
                    let dir = resolve_dir(path);
                    let entries = scan_dir(&dir)?;
                    (dir, entries)
                }
                Ok(_) => (cwd, non_empty(scan_targets(std::slice::from_ref(path)))?),
                Err(e) => return Err(FacadError::open(path, e)),
            },
            Target::Glob(pattern) => {
                let matches = expand_glob(pattern)?;
                if matches.is_empty() {
                    return Err(FacadError::NoMatches(pattern.clone()));
                }
                (cwd, non_empty(scan_targets(&matches))?)
            }
            Target::Paths(paths) => (cwd, non_empty(scan_targets(paths))?),
        };

        let branch = if self.config.general().git() {
            match self.status.query(&dir) {
                Some(report) => {
                    decorate(&mut entries, &report);
                    report.branch
                }
                None => None,
            }
        } else {
            None
        };

        Formatter::new(self.config.general().show_hidden()).filter_entries(&mut entries);
        tracing::debug!(dir = %dir.display(), shown = entries.len(), ?branch, "listing ready");

        Ok(Listing {
            dir,
            entries,
            branch,
        })
    }

    /// Renders a listing for a terminal `term_width` columns wide.
    pub fn render(&self, listing: &Listing, term_width: usize, palette: &Palette) -> String {
        render(
            &listing.entries,
            term_width,
            &listing.dir,
            self.config.display().show_path(),
            listing.branch.as_deref(),
            palette,
            self.config.columns().max_columns(&listing.dir),
        )
    }
}

fn non_empty(entries: Vec<Entry>) -> Result<Vec<Entry>, FacadError> {
    if entries.is_empty() {
        Err(FacadError::NoTargets)
    } else {
        Ok(entries)
    }
}

/// Expands a glob pattern. Unreadable matches are skipped.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, FacadError> {
    let paths = glob::glob(pattern)?
        .filter_map(|res| match res {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!(%e, "skipping glob match");
                None
            }
        })
        .collect();
    Ok(paths)
}

/// Current terminal width, or [FALLBACK_WIDTH].
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols as usize,
        _ => FALLBACK_WIDTH,
    }
}

fn write_stdout(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

/// Runs facad with the arguments that follow the program name.
pub fn run<S: AsRef<str>>(args: &[S]) -> ExitCode {
    let target = match parse_args(args) {
        CliAction::Help => {
            print_help();
            return ExitCode::SUCCESS;
        }
        CliAction::Version => {
            print_version();
            return ExitCode::SUCCESS;
        }
        CliAction::Init => {
            let path = Config::default_path();
            return match Config::generate_default(&path) {
                Ok(()) => {
                    println!("Default config written to {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("facad: {}", e);
                    ExitCode::FAILURE
                }
            };
        }
        CliAction::Unrecognized(opt) => {
            print_unrecognized(&opt);
            return ExitCode::FAILURE;
        }
        CliAction::List(target) => target,
    };

    let config = Config::load();
    let app = App::new(&config);

    let listing = match app.collect(&target) {
        Ok(listing) => listing,
        Err(e) => {
            eprintln!("facad: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let palette = config.theme().palette(io::stdout().is_tty());
    let out = app.render(&listing, terminal_width(), &palette);

    match write_stdout(&out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("facad: write error: {}", e);
            ExitCode::FAILURE
        }
    }
}
