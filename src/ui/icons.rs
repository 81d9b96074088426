//! Rule tables mapping file names, extensions, shebangs and device nodes to emoji glyphs.
//!
//! Every table is static data consulted by the classifier in [crate::core::classify].
//! Slices are ordered: the first matching row wins, so the order of rows is part of
//! the behavior and must not be re-sorted. Tables whose keys are unique and whose
//! order does not matter are compile-time [phf] maps.

use once_cell::sync::Lazy;
use phf::phf_map;

use std::collections::HashMap;

pub const LINK: &str = "🔗";
pub const LINK_DIR: &str = "🔗📁";
pub const FOLDER: &str = "📁";
pub const SETTINGS: &str = "⚙️";
pub const EXECUTABLE: &str = "💾";
pub const TEXT: &str = "📝";
pub const UNKNOWN: &str = "❓";
pub const DEVICE: &str = "🔧";

/// Substrings of notable file names, matched case-insensitively anywhere in the name.
/// Consulted before exact names since these files tend to carry version or
/// flavour suffixes (`vmlinuz-6.8.0-generic`, `Dockerfile.dev`).
#[rustfmt::skip]
pub static NAME_SUBSTRINGS: &[(&str, &str)] = &[
    ("vmlinuz", "🐧"),
    ("initrd", "🐧"),
    ("initramfs", "🐧"),
    ("grub", "🥾"),
    ("shadow", "🕶️"),
    ("fstab", "⬜"),
    ("dockerfile", "🐳"),
    ("docker-compose", "🐳"),
];

/// Whole file names. Keys are lowercase, lookups lowercase the name first.
pub static EXACT_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "makefile" => "🧰",
    "gnumakefile" => "🧰",
    "makefile.am" => "🏭",
    "configure.ac" => "🏭",
    "cmakelists.txt" => "🏭",
    "meson.build" => "🏭",
    "build.ninja" => "🥷",
    ".ninja_deps" => "🥷",
    ".ninja_log" => "🥷",
    ".gitignore" => "🙈",
    ".dockerignore" => "🙈",
    ".hgignore" => "🙈",
    ".npmignore" => "🙈",
    ".bzrignore" => "🙈",
    ".eslintignore" => "🙈",
    ".terraformignore" => "🙈",
    ".prettierignore" => "🙈",
    ".p4ignore" => "🙈",
    ".gitlab-ci.yml" => "🦊",
    ".travis.yml" => "⛑️",
    "swagger.yaml" => "🧣",
    "jenkinsfile" => "🔴",
    "tags" => "🏷️",
    "license" => "⚖️",
    "license-mit" => "⚖️",
    "license-apache" => "⚖️",
    "copying" => "⚖️",
    "cargo.toml" => "🦀",
    "cargo.lock" => "🔒",
    "readme" => "📖",
    "readme.md" => "📖",
};

/// Interpreter signatures looked for in the first line of a regular file.
#[rustfmt::skip]
pub static CONTENT_SIGNATURES: &[(&str, &str)] = &[
    ("#!/bin/sh", "🐚"),
    ("#!/usr/bin/sh", "🐚"),
    ("#!/usr/bin/env sh", "🐚"),
    ("#!/bin/bash", "💰"),
    ("#!/usr/bin/bash", "💰"),
    ("#!/usr/bin/env bash", "💰"),
    ("#!/bin/dash", "🐚"),
    ("#!/usr/bin/dash", "🐚"),
    ("#!/usr/bin/env dash", "🐚"),
    ("#!/bin/zsh", "🆉"),
    ("#!/usr/bin/zsh", "🆉"),
    ("#!/usr/bin/env zsh", "🆉"),
    ("#!/bin/ksh", "🐚"),
    ("#!/usr/bin/ksh", "🐚"),
    ("#!/usr/bin/env ksh", "🐚"),
    ("#!/usr/bin/perl", "🐪"),
    ("#!/usr/local/bin/perl", "🐪"),
    ("#!/usr/bin/env perl", "🐪"),
    ("#!/opt/bin/perl", "🐪"),
    ("#!/bin/ruby", "♦️"),
    ("#!/usr/bin/ruby", "♦️"),
    ("#!/usr/local/bin/ruby", "♦️"),
    ("#!/usr/bin/env ruby", "♦️"),
    ("#!/opt/local/bin/ruby", "♦️"),
    ("#!/usr/bin/python", "🐍"),
    ("#!/usr/local/bin/python", "🐍"),
    ("#!/usr/bin/env python", "🐍"),
    ("#!/usr/bin/lua", "🌙"),
    ("#!/usr/local/bin/lua", "🌙"),
    ("#!/usr/bin/env lua", "🌙"),
    ("#!/usr/bin/tcl", "☯️"),
    ("#!/usr/local/bin/tcl", "☯️"),
    ("#!/usr/bin/env tcl", "☯️"),
    ("#!/usr/bin/awk", "🐦"),
    ("#!/usr/local/bin/awk", "🐦"),
    ("#!/usr/bin/env awk", "🐦"),
    ("#!/usr/bin/gawk", "🐦"),
    ("#!/usr/bin/env gawk", "🐦"),
    ("#!/usr/bin/node", "💚"),
    ("#!/usr/local/bin/node", "💚"),
    ("#!/usr/bin/env node", "💚"),
    ("#!/usr/bin/nodejs", "💚"),
    ("#!/usr/bin/env nodejs", "💚"),
    ("#!/usr/bin/php", "🐘"),
    ("#!/usr/local/bin/php", "🐘"),
    ("#!/usr/bin/env php", "🐘"),
    ("#!/usr/bin/fish", "🐟"),
    ("#!/usr/local/bin/fish", "🐟"),
    ("#!/usr/bin/env fish", "🐟"),
];

/// File extensions. Some keys appear more than once with different glyphs; only
/// the first row for a key is reachable (see [shadowed_extensions]).
#[rustfmt::skip]
pub static EXTENSIONS: &[(&str, &str)] = &[
    ("md", "📑"), ("jpg", "📸"), ("jpeg", "📸"), ("png", "📸"), ("gif", "📸"),
    ("bmp", "📸"), ("svg", "📸"), ("webp", "📸"),
    ("mp4", "🎬"), ("avi", "🎬"), ("mkv", "🎬"), ("mov", "🎬"), ("flv", "🎬"),
    ("wmv", "🎬"), ("webm", "🎬"),
    ("mp3", "🎧"), ("wav", "🎧"), ("ogg", "🎧"), ("flac", "🎧"), ("m4a", "🎧"),
    ("aac", "🎧"),
    ("zip", "📦"), ("tar", "📦"), ("gz", "📦"), ("bz2", "📦"), ("xz", "📦"),
    ("7z", "📦"), ("rar", "📦"), ("deb", "📥"), ("rpm", "📥"),
    ("py", "🐍"), ("sh", "💻"), ("js", "💻"), ("css", "🎨"), ("cpp", "🔬"),
    ("c", "🔬"), ("java", "☕"), ("go", "🐹"), ("rb", "♦️"), ("rs", "🦀"),
    ("php", "🐘"), ("h", "🧢"), ("hpp", "🧢"), ("class", "☕"), ("kt", "💻"),
    ("scala", "📐"), ("jsx", "💻"), ("tf", "🏗️"), ("tsx", "💻"), ("vue", "🟩"),
    ("dart", "🦋"), ("lua", "💻"), ("pl", "🐪"), ("r", "📈"), ("m", "💻"),
    ("mm", "💻"), ("asm", "💻"), ("s", "💻"), ("f", "🅵"), ("f90", "🅵"),
    ("lisp", "💻"), ("hs", "💻"), ("ml", "Ⓜ️"), ("clj", "💻"), ("groovy", "💻"),
    ("jl", "💻"), ("ex", "💻"), ("exs", "💻"), ("elm", "💻"), ("coffee", "☕"),
    ("ts", "🅃"), ("d", "🅳"), ("cs", "💻"), ("vb", "💻"), ("fs", "💻"),
    ("sql", "🗄️"), ("pas", "🏫"), ("lhs", "💻"), ("cob", "💻"), ("o", "🧩"),
    ("db", "🗄️"), ("mod", "🐹"), ("gem", "💎"),
    ("txt", "📝"), ("rst", "📝"), ("log", "🪵"),
    ("ttf", "🔤"), ("otf", "🔤"), ("woff", "🔤"), ("woff2", "🔤"),
    ("pdf", "📚"), ("djvu", "📚"), ("epub", "📚"),
    ("pem", "🔑"), ("crt", "🔑"), ("key", "🔑"), ("pub", "🔑"), ("p12", "🔑"),
    ("csv", "📊"), ("torrent", "🌊"), ("iso", "💽"), ("img", "💽"),
    ("qcow", "🐮"), ("qcow2", "🐮"), ("vv", "🕹️"),
    ("doc", "📄"), ("docx", "📄"), ("odt", "📄"), ("rtf", "📄"), ("xls", "📄"),
    ("xlsx", "📄"), ("ods", "📄"), ("ppt", "📄"), ("pptx", "📄"), ("odp", "📄"),
    ("conf", "⚙️"), ("config", "⚙️"), ("toml", "⚙️"), ("cfg", "⚙️"),
    ("yaml", "🅈"), ("yml", "🅈"), ("json", "🏝️"), ("ini", "⚙️"),
    ("target", "🎯"), ("service", "🚀"), ("socket", "🔌"),
    ("vim", "🖖"), ("blend", "🧈"), ("app", "📱"), ("dmg", "💿"), ("pkg", "📦"),
    ("patch", "🩹"), ("plist", "📋"), ("scpt", "📜"), ("swift", "🐦"),
    ("xcodeproj", "🛠️"), ("mlmodel", "🧠"), ("arobject", "🎭"), ("cmake", "🏭"),
    ("mvn", "🏹"), ("html", "🌐"), ("sks", "🎮"), ("car", "🚗"),
    ("xcassets", "🗂️"), ("dSYM", "🐛"), ("terminal", "🖥️"), ("lock", "🔒"),
    ("webloc", "🔗"), ("workflow", "🔄"), ("apk", "📱"), ("rc", "👟"),
    ("bundle", "🎁"), ("pb", "📋"), ("sock", "🧦"), ("tmp", "⏳"), ("ko", "🌰"),
    ("ccl", "🎨"), ("sh", "🐚"), ("bash", "💰"), ("fish", "🐟"), ("xib", "🖼️"),
    ("ninja", "🥷"), ("lisp", "λ"), ("cl", "λ"), ("lsp", "λ"),
    ("ada", "✈️"), ("adb", "✈️"), ("ads", "✈️"), ("zsh", "🆉"),
    ("gradle", "🐘"), ("lock", "🔒"), ("mermaid", "🌊"), ("plantuml", "🌱"),
    ("dot", "📍"), ("drawio", "📉"), ("ipa", "📲"), ("xcodeproj", "🛠️"),
    ("mlmodel", "🤖"), ("icns", "🖼️"), ("framework", "🏗️"), ("xcassets", "🗂️"),
    ("playground", "🎠"), ("part", "🧩"), ("diff", "🆚"), ("bak", "🔙"),
    ("cache", "⏱️"), ("desktop", "🖥️"), ("cron", "📅"), ("env", "🌍"),
    ("bin", "💾"), ("pid", "🪪"), ("swap", "🔄"),
];

/// Exact device node names under `/dev`.
pub static DEVICE_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "loop" => "🔁",
    "null" => "🕳️",
    "zero" => "🕳️",
    "random" => "🎲",
    "urandom" => "🎲",
    "tty" => "🖥️",
    "usb" => "🔌",
    "vga_arbiter" => "🖼️",
    "vhci" => "🔌",
    "vhost-net" => "🌐",
    "vhost-vsock" => "💬",
    "mcelog" => "📋",
    "media0" => "🎬",
    "mei0" => "🧠",
    "mem" => "🗄️",
    "hpet" => "⏱️",
    "hwrng" => "🎲",
    "kmsg" => "📜",
    "kvm" => "🌰",
    "zram" => "🗜️",
    "udmabuf" => "🔄",
    "uhid" => "🕹️",
    "rfkill" => "📡",
    "ppp" => "🌐",
    "ptmx" => "🖥️",
    "userfaultfd" => "🚧",
    "nvram" => "🗄️",
    "port" => "🔌",
    "autofs" => "🚗",
    "btrfs-control" => "🌳",
    "console" => "🖥️",
    "full" => "🔒",
    "fuse" => "🔥",
    "gpiochip0" => "📌",
    "cuse" => "🧩",
    "cpu_dma_latency" => "⏱️",
};

/// Device node name prefixes under `/dev`, in precedence order.
#[rustfmt::skip]
pub static DEVICE_PREFIXES: &[(&str, &str)] = &[
    ("loop", "🔁"), ("sd", "💽"), ("tty", "🖥️"), ("usb", "🔌"), ("video", "🎥"),
    ("nvme", "💽"), ("lp", "🖨️"), ("hidraw", "🔠"), ("vcs", "📟"), ("vcsa", "📟"),
    ("ptp", "🕰️"), ("rtc", "🕰️"), ("watchdog", "🐕"), ("mtd", "⚡"),
];

/// Lowercased extension to glyph, first row per key wins.
/// Built on first use so the per-entry lookup does not scan [EXTENSIONS].
static EXTENSION_INDEX: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::with_capacity(EXTENSIONS.len());
    for &(key, glyph) in EXTENSIONS {
        let key = key.to_ascii_lowercase();
        if let Some(kept) = index.get(&key) {
            tracing::trace!(extension = %key, kept = %kept, shadowed = %glyph, "duplicate extension rule");
            continue;
        }
        index.insert(key, glyph);
    }
    index
});

/// Looks up a glyph for an extension (without the dot), ignoring case.
pub fn extension_glyph(ext: &str) -> Option<&'static str> {
    if ext.bytes().any(|b| b.is_ascii_uppercase()) {
        EXTENSION_INDEX.get(&ext.to_ascii_lowercase()).copied()
    } else {
        EXTENSION_INDEX.get(ext).copied()
    }
}

/// Looks up a whole-name association, ignoring case.
pub fn exact_name_glyph(name: &str) -> Option<&'static str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        EXACT_NAMES.get(name.to_ascii_lowercase().as_str()).copied()
    } else {
        EXACT_NAMES.get(name).copied()
    }
}

/// Extension rows that can never match because an earlier row has the same key.
/// Returned as `(key, shadowed glyph, winning glyph)`.
pub fn shadowed_extensions() -> Vec<(&'static str, &'static str, &'static str)> {
    EXTENSIONS
        .iter()
        .enumerate()
        .filter_map(|(i, &(key, glyph))| {
            EXTENSIONS[..i]
                .iter()
                .find(|(earlier, _)| earlier.eq_ignore_ascii_case(key))
                .map(|&(_, winner)| (key, glyph, winner))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_extension_row_wins() {
        assert_eq!(extension_glyph("sh"), Some("💻"));
        assert_eq!(extension_glyph("lisp"), Some("💻"));
        assert_eq!(extension_glyph("mlmodel"), Some("🧠"));
    }

    #[test]
    fn extension_lookup_ignores_case() {
        assert_eq!(extension_glyph("RS"), Some("🦀"));
        assert_eq!(extension_glyph("dsym"), Some("🐛"));
        assert_eq!(extension_glyph("DSYM"), Some("🐛"));
        assert_eq!(extension_glyph("nope"), None);
    }

    #[test]
    fn shadowed_rows_are_reported() {
        let shadowed = shadowed_extensions();
        assert!(shadowed.contains(&("sh", "🐚", "💻")));
        assert!(shadowed.contains(&("lisp", "λ", "💻")));
        assert!(shadowed.contains(&("mlmodel", "🤖", "🧠")));
        assert!(!shadowed.iter().any(|(key, _, _)| *key == "rs"));
    }

    #[test]
    fn exact_names_are_lowercase_keys() {
        assert!(EXACT_NAMES.keys().all(|k| !k.bytes().any(|b| b.is_ascii_uppercase())));
        assert_eq!(exact_name_glyph("Makefile"), Some("🧰"));
        assert_eq!(exact_name_glyph("CMakeLists.txt"), Some("🏭"));
    }

    #[test]
    fn every_glyph_is_non_empty() {
        let rows = NAME_SUBSTRINGS
            .iter()
            .chain(CONTENT_SIGNATURES)
            .chain(EXTENSIONS)
            .chain(DEVICE_PREFIXES);
        for (key, glyph) in rows {
            assert!(!glyph.is_empty(), "empty glyph for {key}");
        }
        assert!(EXACT_NAMES.values().chain(DEVICE_NAMES.values()).all(|g| !g.is_empty()));
    }
}
