//! Glyph classification for directory entries.
//!
//! A [Classifier] walks an explicit, ordered list of [Stage]s and returns the glyph of
//! the first stage that matches. Cheap metadata stages come first; the two stages that
//! read file content share a single bounded read of the file head, taken lazily and
//! only for regular files.
//!
//! Entries under `/dev` use the [RuleSet::Device] stages instead: device nodes are never
//! opened and their names carry no meaningful extensions.

use crate::ui::icons;

use once_cell::unsync::OnceCell;

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Bytes read from the head of a file for the text probe.
pub const HEAD_PEEK_BYTES: usize = 1024;
/// Longest first line considered for interpreter signatures.
pub const FIRST_LINE_BYTES: usize = 256;

/// Owner execute permission bit.
#[cfg(unix)]
const OWNER_EXEC: u32 = 0o100;

/// Metadata the classifier needs about one entry. All of it comes from a single
/// `lstat` (plus a `stat` of the target for symlinks).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    pub is_symlink: bool,
    pub is_dir: bool,
    pub target_is_dir: bool,
    pub is_regular: bool,
    pub is_executable: bool,
}

impl Attributes {
    pub fn regular_file() -> Self {
        Attributes {
            is_regular: true,
            ..Default::default()
        }
    }

    pub fn directory() -> Self {
        Attributes {
            is_dir: true,
            ..Default::default()
        }
    }

    /// Builds attributes from `lstat` metadata. `path` is only used to follow symlinks.
    pub fn from_metadata(md: &fs::Metadata, path: &Path) -> Self {
        let ft = md.file_type();
        let is_symlink = ft.is_symlink();
        let target_is_dir = is_symlink && fs::metadata(path).map(|t| t.is_dir()).unwrap_or(false);

        #[cfg(unix)]
        let is_executable = {
            use std::os::unix::fs::PermissionsExt;
            ft.is_file() && md.permissions().mode() & OWNER_EXEC != 0
        };
        #[cfg(not(unix))]
        let is_executable = false;

        Attributes {
            is_symlink,
            is_dir: ft.is_dir(),
            target_is_dir,
            is_regular: ft.is_file(),
            is_executable,
        }
    }
}

/// Source of file content for the content stages.
pub trait ContentPeek {
    /// Reads at most `limit` bytes from the start of the content.
    fn peek(&self, limit: usize) -> io::Result<Vec<u8>>;
}

impl ContentPeek for Path {
    fn peek(&self, limit: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(limit);
        File::open(self)?.take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl ContentPeek for [u8] {
    fn peek(&self, limit: usize) -> io::Result<Vec<u8>> {
        Ok(self[..self.len().min(limit)].to_vec())
    }
}

impl ContentPeek for str {
    fn peek(&self, limit: usize) -> io::Result<Vec<u8>> {
        self.as_bytes().peek(limit)
    }
}

/// Content that cannot be read. Used where probing is unsafe or pointless.
pub struct NoContent;

impl ContentPeek for NoContent {
    fn peek(&self, _limit: usize) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "no content"))
    }
}

/// One step of the resolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Symlink,
    Directory,
    NameSubstring,
    ExactName,
    ContentSignature,
    Extension,
    Hidden,
    Executable,
    TextContent,
    DeviceName,
    DevicePrefix,
    Device,
}

const STANDARD_STAGES: &[Stage] = &[
    Stage::Symlink,
    Stage::Directory,
    Stage::NameSubstring,
    Stage::ExactName,
    Stage::ContentSignature,
    Stage::Extension,
    Stage::Hidden,
    Stage::Executable,
    Stage::TextContent,
];

const DEVICE_STAGES: &[Stage] = &[
    Stage::Symlink,
    Stage::Directory,
    Stage::DeviceName,
    Stage::DevicePrefix,
    Stage::Device,
];

/// Which family of rules applies to a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleSet {
    #[default]
    Standard,
    Device,
}

impl RuleSet {
    /// Device rules apply to the `/dev` directory itself, nowhere else.
    pub fn for_dir(dir: &Path) -> Self {
        if dir == Path::new("/dev") {
            RuleSet::Device
        } else {
            RuleSet::Standard
        }
    }

    pub fn stages(self) -> &'static [Stage] {
        match self {
            RuleSet::Standard => STANDARD_STAGES,
            RuleSet::Device => DEVICE_STAGES,
        }
    }
}

/// The glyph chosen for an entry and the stage that chose it.
/// `stage` is `None` when nothing matched and the unknown glyph was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub glyph: &'static str,
    pub stage: Option<Stage>,
}

/// Per-entry state shared by the stages. The head of the file is read at most once.
struct Subject<'a, C: ContentPeek + ?Sized> {
    name: &'a str,
    lowered: Cow<'a, str>,
    attrs: Attributes,
    content: &'a C,
    head: OnceCell<Option<Vec<u8>>>,
}

impl<'a, C: ContentPeek + ?Sized> Subject<'a, C> {
    fn new(name: &'a str, attrs: Attributes, content: &'a C) -> Self {
        let lowered = if name.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(name.to_ascii_lowercase())
        } else {
            Cow::Borrowed(name)
        };
        Subject {
            name,
            lowered,
            attrs,
            content,
            head: OnceCell::new(),
        }
    }

    fn head(&self) -> Option<&[u8]> {
        if !self.attrs.is_regular {
            return None;
        }
        self.head
            .get_or_init(|| self.content.peek(HEAD_PEEK_BYTES).ok())
            .as_deref()
    }

    fn first_line(&self) -> Option<Cow<'_, str>> {
        let head = self.head()?;
        let head = &head[..head.len().min(FIRST_LINE_BYTES)];
        let end = head.iter().position(|&b| b == b'\n').unwrap_or(head.len());
        Some(String::from_utf8_lossy(&head[..end]))
    }

    fn extension(&self) -> Option<&str> {
        match self.name.rfind('.') {
            Some(idx) if idx + 1 < self.name.len() => Some(&self.name[idx + 1..]),
            _ => None,
        }
    }
}

impl Stage {
    fn apply<C: ContentPeek + ?Sized>(self, subject: &Subject<'_, C>) -> Option<&'static str> {
        let attrs = subject.attrs;
        match self {
            Stage::Symlink => attrs.is_symlink.then_some(if attrs.target_is_dir {
                icons::LINK_DIR
            } else {
                icons::LINK
            }),
            Stage::Directory => attrs.is_dir.then_some(icons::FOLDER),
            Stage::NameSubstring => icons::NAME_SUBSTRINGS
                .iter()
                .find(|&&(key, _)| subject.lowered.contains(key))
                .map(|&(_, glyph)| glyph),
            Stage::ExactName => icons::exact_name_glyph(&subject.lowered),
            Stage::ContentSignature => {
                let line = subject.first_line()?;
                icons::CONTENT_SIGNATURES
                    .iter()
                    .find(|&&(key, _)| line.contains(key))
                    .map(|&(_, glyph)| glyph)
            }
            Stage::Extension => subject.extension().and_then(icons::extension_glyph),
            Stage::Hidden => subject.name.starts_with('.').then_some(icons::SETTINGS),
            Stage::Executable => attrs.is_executable.then_some(icons::EXECUTABLE),
            Stage::TextContent => subject
                .head()
                .filter(|head| looks_like_text(head))
                .map(|_| icons::TEXT),
            Stage::DeviceName => icons::DEVICE_NAMES.get(subject.name).copied(),
            Stage::DevicePrefix => icons::DEVICE_PREFIXES
                .iter()
                .find(|&&(key, _)| subject.name.starts_with(key))
                .map(|&(_, glyph)| glyph),
            Stage::Device => Some(icons::DEVICE),
        }
    }
}

/// Every byte printable ASCII or whitespace. An empty head counts as text.
pub fn looks_like_text(head: &[u8]) -> bool {
    head.iter()
        .all(|&b| b.is_ascii_graphic() || b == b' ' || b.is_ascii_whitespace() || b == 0x0b)
}

/// Resolves glyphs for entries of one directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    pub fn new(rules: RuleSet) -> Self {
        Classifier { rules }
    }

    pub fn for_dir(dir: &Path) -> Self {
        Self::new(RuleSet::for_dir(dir))
    }

    #[inline]
    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Runs the stage chain and reports which stage decided.
    pub fn resolve<C>(&self, name: &str, attrs: Attributes, content: &C) -> Resolution
    where
        C: ContentPeek + ?Sized,
    {
        let subject = Subject::new(name, attrs, content);
        for &stage in self.rules.stages() {
            if let Some(glyph) = stage.apply(&subject) {
                tracing::trace!(name, ?stage, glyph, "classified");
                return Resolution {
                    glyph,
                    stage: Some(stage),
                };
            }
        }
        Resolution {
            glyph: icons::UNKNOWN,
            stage: None,
        }
    }

    pub fn classify<C>(&self, name: &str, attrs: Attributes, content: &C) -> &'static str
    where
        C: ContentPeek + ?Sized,
    {
        self.resolve(name, attrs, content).glyph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use tempfile::tempdir;

    fn on_disk(c: &Classifier, path: &Path) -> &'static str {
        let Ok(md) = fs::symlink_metadata(path) else {
            return icons::UNKNOWN;
        };
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        c.classify(&name, Attributes::from_metadata(&md, path), path)
    }

    fn resolve_file(name: &str, content: &str) -> Resolution {
        Classifier::default().resolve(name, Attributes::regular_file(), content)
    }

    #[test]
    fn symlinks_and_directories_come_first() {
        let c = Classifier::default();
        let link = Attributes {
            is_symlink: true,
            ..Default::default()
        };
        let link_dir = Attributes {
            is_symlink: true,
            target_is_dir: true,
            ..Default::default()
        };
        assert_eq!(c.classify("Makefile", link, &NoContent), icons::LINK);
        assert_eq!(c.classify("src", link_dir, &NoContent), icons::LINK_DIR);
        assert_eq!(c.classify("notes.txt", Attributes::directory(), &NoContent), icons::FOLDER);
    }

    #[test]
    fn gitignore_resolves_by_exact_name() {
        let res = resolve_file(".gitignore", "target/\n");
        assert_eq!(res.stage, Some(Stage::ExactName));
        assert_eq!(res.glyph, "🙈");
    }

    #[test]
    fn exact_name_ignores_case() {
        assert_eq!(resolve_file("MAKEFILE", "").glyph, "🧰");
        assert_eq!(resolve_file("makefile", "").glyph, "🧰");
    }

    #[test]
    fn substring_beats_exact_and_extension() {
        let res = resolve_file("vmlinuz-6.8.0-generic", "");
        assert_eq!(res.stage, Some(Stage::NameSubstring));
        assert_eq!(res.glyph, "🐧");

        let res = resolve_file("Dockerfile.dev", "FROM rust\n");
        assert_eq!(res.stage, Some(Stage::NameSubstring));
        assert_eq!(res.glyph, "🐳");
    }

    #[test]
    fn shebang_resolves_by_content_signature() {
        let res = resolve_file("deploy", "#!/usr/bin/env bash\nset -e\n");
        assert_eq!(res.stage, Some(Stage::ContentSignature));
        assert_eq!(res.glyph, "💰");

        let res = resolve_file("tool", "#!/usr/bin/env python3\n");
        assert_eq!(res.glyph, "🐍");
    }

    #[test]
    fn signature_only_looks_at_first_line() {
        let res = resolve_file("notes", "hello\n#!/bin/bash\n");
        assert_eq!(res.stage, Some(Stage::TextContent));
    }

    #[test]
    fn signature_precedes_extension() {
        let res = resolve_file("run.txt", "#!/bin/sh\necho hi\n");
        assert_eq!(res.stage, Some(Stage::ContentSignature));
        assert_eq!(res.glyph, "🐚");
    }

    #[test]
    fn extension_is_case_insensitive_and_uses_last_dot() {
        assert_eq!(resolve_file("archive.tar.GZ", "").glyph, "📦");
        assert_eq!(resolve_file("main.RS", "").stage, Some(Stage::Extension));
        assert_eq!(resolve_file("script.sh", "").glyph, "💻");
    }

    #[test]
    fn hidden_fallback_then_executable_then_text() {
        assert_eq!(resolve_file(".zshrc", "export A=1\n").stage, Some(Stage::Hidden));

        let exe = Attributes {
            is_executable: true,
            ..Attributes::regular_file()
        };
        let c = Classifier::default();
        assert_eq!(c.resolve("a.out", exe, &[0x7fu8, b'E', b'L', b'F'][..]).glyph, icons::EXECUTABLE);

        assert_eq!(resolve_file("NOTES", "plain words\n\ttabbed\n").glyph, icons::TEXT);
        assert_eq!(resolve_file("EMPTY", "").glyph, icons::TEXT);
    }

    #[test]
    fn binary_content_is_unknown() {
        let c = Classifier::default();
        let res = c.resolve("blob", Attributes::regular_file(), &[0u8, 159, 146, 150][..]);
        assert_eq!(res.stage, None);
        assert_eq!(res.glyph, icons::UNKNOWN);
    }

    #[test]
    fn content_is_never_read_for_special_files() {
        let fifo = Attributes::default();
        let c = Classifier::default();
        let res = c.resolve("pipe", fifo, "#!/bin/bash\n");
        assert_eq!(res.glyph, icons::UNKNOWN);
    }

    #[test]
    fn unreadable_content_falls_through() {
        let res = Classifier::default().resolve("mystery", Attributes::regular_file(), &NoContent);
        assert_eq!(res.glyph, icons::UNKNOWN);
    }

    #[test]
    fn device_rules() {
        let c = Classifier::new(RuleSet::Device);
        let node = Attributes::default();
        assert_eq!(c.resolve("null", node, &NoContent).stage, Some(Stage::DeviceName));
        assert_eq!(c.classify("sda1", node, &NoContent), "💽");
        assert_eq!(c.classify("ttyS0", node, &NoContent), "🖥️");
        assert_eq!(c.classify("something.txt", node, &NoContent), icons::DEVICE);
        assert_eq!(c.classify("input", Attributes::directory(), &NoContent), icons::FOLDER);
    }

    #[test]
    fn rule_set_for_dir() {
        assert_eq!(RuleSet::for_dir(Path::new("/dev")), RuleSet::Device);
        assert_eq!(RuleSet::for_dir(Path::new("/dev/input")), RuleSet::Standard);
        assert_eq!(RuleSet::for_dir(Path::new("/home")), RuleSet::Standard);
    }

    #[test]
    fn classification_is_pure() {
        let c = Classifier::default();
        for name in ["a.py", "README", "x", ".env", "Cargo.toml"] {
            let first = c.resolve(name, Attributes::regular_file(), "data\n");
            let second = c.resolve(name, Attributes::regular_file(), "data\n");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn classifies_files_on_disk() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let script = dir.path().join("build");
        fs::write(&script, "#!/usr/bin/env python\nprint('hi')\n")?;
        fs::create_dir(dir.path().join("sub"))?;

        let c = Classifier::default();
        assert_eq!(on_disk(&c, &script), "🐍");
        assert_eq!(on_disk(&c, &dir.path().join("sub")), icons::FOLDER);
        assert_eq!(on_disk(&c, &dir.path().join("missing")), icons::UNKNOWN);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_dir_on_disk() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("real"))?;
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias"))?;
        assert_eq!(on_disk(&Classifier::default(), &dir.path().join("alias")), icons::LINK_DIR);
        Ok(())
    }
}
