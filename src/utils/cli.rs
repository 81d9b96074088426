//! Command-line argument parsing and help for facad.
//!
//! When invoked with no args (facad), the current directory is listed.

use crate::utils::is_glob_pattern;

use std::path::PathBuf;

/// What to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The current working directory.
    Cwd,
    /// One directory, or a single file listed on its own.
    Path(PathBuf),
    /// A pattern to expand.
    Glob(String),
    /// An explicit list of files and directories, each listed as one entry.
    Paths(Vec<PathBuf>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    List(Target),
    Help,
    Version,
    Init,
    Unrecognized(String),
}

/// Parses the arguments that follow the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> CliAction {
    let mut paths: Vec<&str> = Vec::new();
    let mut options_done = false;

    for arg in args.iter().map(AsRef::as_ref) {
        if options_done {
            paths.push(arg);
            continue;
        }
        match arg {
            "-h" | "--help" => return CliAction::Help,
            "-v" | "--version" => return CliAction::Version,
            "--init" => return CliAction::Init,
            "--" => options_done = true,
            opt if opt.starts_with('-') && opt.len() > 1 => {
                return CliAction::Unrecognized(opt.to_owned());
            }
            path => paths.push(path),
        }
    }

    let target = match paths.as_slice() {
        [] => Target::Cwd,
        [one] if is_glob_pattern(one) => Target::Glob((*one).to_owned()),
        [one] => Target::Path(PathBuf::from(one)),
        many => Target::Paths(many.iter().map(PathBuf::from).collect()),
    };
    CliAction::List(target)
}

pub fn print_version() {
    println!("facad {}", env!("CARGO_PKG_VERSION"));
}

pub fn print_help() {
    println!(
        r#"facad - A colorful ls with emoji file-type glyphs and git status markers

USAGE:
  facad [OPTION] [PATH | PATTERN | FILE...]

ARGUMENTS:
  PATH                    Directory to list (defaults to current directory)
  PATTERN                 Glob pattern to expand, e.g. '*.rs'
  FILE...                 Several files or directories, listed as entries

OPTIONS:
      --init              Generate a default configuration file
  -h, --help              Print help information
  -v, --version           Display the current installed version of facad

ENVIRONMENT:
  FACAD_CONFIG            Override the default config path
  FACAD_LOG               Diagnostic log filter, e.g. "debug"
"#
    );
}

pub fn print_unrecognized(opt: &str) {
    eprintln!("facad: unrecognized option '{}'", opt);
    eprintln!("Try 'facad --help' for more information.");
}
