//! Directory scanning and the [Entry] record used throughout facad.
//!
//! [scan_dir] reads one directory level and classifies every member; [scan_targets]
//! does the same for an explicit list of paths (command line arguments or glob matches).
//! Members whose metadata cannot be read are skipped with a one-line warning.

use crate::core::classify::{Attributes, Classifier};
use crate::core::error::FacadError;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One listed directory member: its name, the glyph it was given and a few flags.
/// Created once per member and left untouched except for a status annotation
/// applied before sorting.
///
/// Target-list entries are shown by the path as given; `bare` then holds the final
/// component, which decides the hidden flag and the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: Box<str>,
    bare: Option<Box<str>>,
    glyph: &'static str,
    flags: u8,
    status: Option<char>,
}

impl Entry {
    // Flag bit definitions
    pub const IS_DIR: u8 = 1 << 0;
    pub const IS_HIDDEN: u8 = 1 << 1;
    pub const HAS_MODIFIED: u8 = 1 << 2;

    /// Marker shown for directories that only contain changed files.
    pub const MODIFIED_DESCENDANT_MARKER: char = '*';

    /// Creates an entry. The hidden flag is derived from the name.
    pub fn new(name: impl Into<Box<str>>, glyph: &'static str, flags: u8) -> Self {
        Self::build(name.into(), None, glyph, flags)
    }

    /// Creates an entry shown as `label` whose own file name is `bare`.
    /// `bare` is empty for paths without a final component such as `..`.
    pub fn labeled(
        label: impl Into<Box<str>>,
        bare: impl Into<Box<str>>,
        glyph: &'static str,
        flags: u8,
    ) -> Self {
        Self::build(label.into(), Some(bare.into()), glyph, flags)
    }

    fn build(name: Box<str>, bare: Option<Box<str>>, glyph: &'static str, flags: u8) -> Self {
        debug_assert!(!glyph.is_empty(), "entry {name} without glyph");
        let mut flags = flags & !Self::IS_HIDDEN;
        if bare.as_deref().unwrap_or(&name).starts_with('.') {
            flags |= Self::IS_HIDDEN;
        }
        Entry {
            name,
            bare,
            glyph,
            flags,
            status: None,
        }
    }

    /// Shorthand for a plain directory entry.
    pub fn dir(name: impl Into<Box<str>>, glyph: &'static str) -> Self {
        Self::new(name, glyph, Self::IS_DIR)
    }

    /// Shorthand for a plain file entry.
    pub fn file(name: impl Into<Box<str>>, glyph: &'static str) -> Self {
        Self::new(name, glyph, 0)
    }

    /// Directories and symlinks to directories sort as directories.
    fn attribute_flags(attrs: Attributes) -> u8 {
        if attrs.is_dir || attrs.target_is_dir {
            Self::IS_DIR
        } else {
            0
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn glyph(&self) -> &'static str {
        self.glyph
    }

    /// The final path component. Equal to [Entry::name] for directory members.
    #[inline]
    pub fn bare_name(&self) -> &str {
        self.bare.as_deref().unwrap_or(&self.name)
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn has_modified_descendant(&self) -> bool {
        self.flags & Self::HAS_MODIFIED != 0
    }

    /// Extension used for ordering: text after the last dot, empty when there is
    /// no dot or the only dot starts the name.
    pub fn extension(&self) -> &str {
        let bare = self.bare_name();
        match bare.rfind('.') {
            Some(0) | None => "",
            Some(idx) => &bare[idx + 1..],
        }
    }

    /// The character shown in the `(X)` status marker, if any.
    pub fn marker(&self) -> Option<char> {
        self.status.or_else(|| {
            (self.is_dir() && self.has_modified_descendant()).then_some(Self::MODIFIED_DESCENDANT_MARKER)
        })
    }

    /// Attaches the version-control status code.
    pub fn annotate(&mut self, code: char) {
        self.status = Some(code);
    }

    pub fn mark_modified_descendant(&mut self) {
        self.flags |= Self::HAS_MODIFIED;
    }
}

fn warn_skipped(name: &str, err: &io::Error) {
    eprintln!("facad: warning: unable to get info for {}: {}", name, err);
}

/// Canonical form of a directory path, so `.`, `..` and symlinked spellings of the
/// same directory pick the same rules. Falls back to a lexically absolute path when
/// the directory cannot be resolved.
pub fn resolve_dir(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Reads the members of `path` (one level) and classifies them.
/// `.` and `..` are never returned by `read_dir`.
///
/// # Errors
/// Fails only when the directory itself cannot be opened.
pub fn scan_dir(path: &Path) -> Result<Vec<Entry>, FacadError> {
    let reader = fs::read_dir(path).map_err(|e| FacadError::open(path, e))?;
    let classifier = Classifier::for_dir(&resolve_dir(path));
    let mut entries = Vec::with_capacity(256);

    for entry in reader {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn_skipped(&path.display().to_string(), &e);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        let md = match entry.metadata() {
            Ok(md) => md,
            Err(e) => {
                warn_skipped(&name, &e);
                continue;
            }
        };

        let entry_path = entry.path();
        let attrs = Attributes::from_metadata(&md, &entry_path);
        let glyph = classifier.classify(&name, attrs, entry_path.as_path());
        entries.push(Entry::new(name, glyph, Entry::attribute_flags(attrs)));
    }

    tracing::debug!(dir = %path.display(), count = entries.len(), rules = ?classifier.rules(), "scanned");
    Ok(entries)
}

/// Classifies an explicit list of paths. Entries are labeled by the path as given;
/// hidden flag and extension come from the final component.
pub fn scan_targets(targets: &[PathBuf]) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(targets.len());
    for target in targets {
        let label = target.to_string_lossy().into_owned();
        let md = match fs::symlink_metadata(target) {
            Ok(md) => md,
            Err(e) => {
                warn_skipped(&label, &e);
                continue;
            }
        };
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let classifier = Classifier::for_dir(&resolve_dir(parent));
        let attrs = Attributes::from_metadata(&md, target);
        let bare = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let subject = if bare.is_empty() { label.as_str() } else { bare.as_str() };
        let glyph = classifier.classify(subject, attrs, target.as_path());
        entries.push(Entry::labeled(label, bare, glyph, Entry::attribute_flags(attrs)));
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::icons;
    use std::error;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn entry_flags() {
        let file = Entry::file("file.txt", icons::TEXT);
        assert!(!file.is_dir());
        assert!(!file.is_hidden());
        assert_eq!(file.name(), "file.txt");

        let dir = Entry::dir(".hidden_folder", icons::FOLDER);
        assert!(dir.is_dir());
        assert!(dir.is_hidden());
    }

    #[test]
    fn hidden_flag_follows_the_name() {
        let e = Entry::new("visible", icons::TEXT, Entry::IS_HIDDEN);
        assert!(!e.is_hidden());
    }

    #[test]
    fn extension_rules() {
        assert_eq!(Entry::file("a.tar.gz", icons::TEXT).extension(), "gz");
        assert_eq!(Entry::file(".bashrc", icons::TEXT).extension(), "");
        assert_eq!(Entry::file("README", icons::TEXT).extension(), "");
        assert_eq!(Entry::file("trailing.", icons::TEXT).extension(), "");
    }

    #[test]
    fn markers() {
        let mut file = Entry::file("main.rs", "🦀");
        assert_eq!(file.marker(), None);
        file.annotate('M');
        assert_eq!(file.marker(), Some('M'));

        let mut dir = Entry::dir("src", icons::FOLDER);
        dir.mark_modified_descendant();
        assert_eq!(dir.marker(), Some(Entry::MODIFIED_DESCENDANT_MARKER));
        dir.annotate('?');
        assert_eq!(dir.marker(), Some('?'));
    }

    #[test]
    fn scan_classifies_members() -> Result<(), Box<dyn error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("src"))?;
        File::create(tmp.path().join("main.rs"))?;
        fs::write(tmp.path().join(".gitignore"), "target\n")?;

        let mut entries = scan_dir(tmp.path())?;
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        let got: Vec<(&str, &str)> = entries.iter().map(|e| (e.name(), e.glyph())).collect();
        assert_eq!(got, vec![(".gitignore", "🙈"), ("main.rs", "🦀"), ("src", icons::FOLDER)]);
        assert!(entries[0].is_hidden());
        assert!(entries[2].is_dir());
        Ok(())
    }

    #[test]
    fn scan_empty_dir() -> Result<(), Box<dyn error::Error>> {
        let tmp = TempDir::new()?;
        assert!(scan_dir(tmp.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn scan_nonexistent() {
        let result = scan_dir(Path::new("/path/does/not/exist"));
        assert!(matches!(result, Err(FacadError::NotFound(_))));
    }

    #[test]
    fn targets_skip_missing_paths() -> Result<(), Box<dyn error::Error>> {
        let tmp = TempDir::new()?;
        let present = tmp.path().join("notes.md");
        File::create(&present)?;
        let entries = scan_targets(&[present.clone(), tmp.path().join("gone.txt")]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), present.to_string_lossy());
        assert_eq!(entries[0].bare_name(), "notes.md");
        assert_eq!(entries[0].glyph(), "📑");
        Ok(())
    }

    #[test]
    fn labeled_entries_use_the_final_component() {
        let e = Entry::labeled("./x.rs", "x.rs", "🦀", 0);
        assert_eq!(e.name(), "./x.rs");
        assert!(!e.is_hidden());
        assert_eq!(e.extension(), "rs");

        let up = Entry::labeled("../x", "x", icons::TEXT, 0);
        assert!(!up.is_hidden());
        assert_eq!(up.extension(), "");

        let parent = Entry::labeled("..", "", icons::FOLDER, Entry::IS_DIR);
        assert!(!parent.is_hidden());

        let dotfile = Entry::labeled("sub/.env", ".env", icons::SETTINGS, 0);
        assert!(dotfile.is_hidden());
        assert_eq!(dotfile.extension(), "");
    }

    #[test]
    fn dotted_target_paths_are_not_hidden() -> Result<(), Box<dyn error::Error>> {
        let tmp = TempDir::new()?;
        let nested = tmp.path().join("sub");
        fs::create_dir(&nested)?;
        fs::write(tmp.path().join("lib.rs"), "")?;

        let via_parent = nested.join("..").join("lib.rs");
        let via_dot = tmp.path().join(".").join("lib.rs");
        let entries = scan_targets(&[via_parent.clone(), via_dot, nested.join("..")]);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name(), via_parent.to_string_lossy());
        assert!(entries.iter().all(|e| !e.is_hidden()));
        assert_eq!(entries[0].extension(), "rs");
        assert_eq!(entries[0].glyph(), "🦀");
        assert!(entries[2].is_dir());
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn device_rules_follow_the_resolved_directory() -> Result<(), Box<dyn error::Error>> {
        if !Path::new("/dev/null").exists() {
            return Ok(());
        }
        let glyph_of = |entries: &[Entry]| {
            entries.iter().find(|e| e.name() == "null").map(Entry::glyph)
        };
        let expected = icons::DEVICE_NAMES.get("null").copied();
        assert_eq!(glyph_of(&scan_dir(Path::new("/dev"))?), expected);
        assert_eq!(glyph_of(&scan_dir(Path::new("/dev/../dev"))?), expected);
        assert_eq!(glyph_of(&scan_dir(Path::new("/dev/"))?), expected);

        let targets = scan_targets(&[PathBuf::from("/dev/../dev/null")]);
        assert_eq!(targets.first().map(Entry::glyph), expected);
        assert_eq!(resolve_dir(Path::new("/dev/../dev")), Path::new("/dev"));
        Ok(())
    }
}
