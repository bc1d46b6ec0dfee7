//! Entry name filtering.
//!
//! Decides what happens to each archive entry purely from its name as
//! authored in the archive. Matching is case-sensitive and uses `/` as the
//! only path separator, which is what the zip format mandates.

/// Substring that marks an entry as source material anywhere in its name.
pub const SOURCE_MARKER: &str = "img-source";

/// Extensions whose entries are dropped from the rewritten archive.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[".lua", ".psd", ".xcf", ".blend", ".jpg"];

/// Base names whose entries are dropped from the rewritten archive.
pub const EXCLUDED_BASE_NAMES: &[&str] = &[
    "LICENSE",
    "README.md",
    "script.dat",
    "banner.png",
    "preview.png",
    "preview.jpg",
];

/// Extension of entries replaced by the placeholder.
pub const PLACEHOLDER_EXTENSION: &str = ".png";

/// What the rewriter does with a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    /// Drop the entry.
    Exclude,
    /// Keep name and timestamp, replace content with the placeholder.
    Placeholder,
    /// Keep the directory entry as-is.
    Directory,
    /// Copy the entry content unchanged.
    Copy,
}

/// Returns `true` if the entry should be dropped entirely.
///
/// # Examples
///
/// ```
/// use zipscrub_core::filter::should_exclude;
///
/// assert!(should_exclude("textures/img-source/wall.png"));
/// assert!(should_exclude("scripts/init.lua"));
/// assert!(should_exclude("docs/README.md"));
/// assert!(!should_exclude("textures/wall.png"));
/// assert!(!should_exclude("scripts/init.LUA"));
/// ```
#[must_use]
pub fn should_exclude(name: &str) -> bool {
    if name.contains(SOURCE_MARKER) {
        return true;
    }

    let ext = extension(name);
    if EXCLUDED_EXTENSIONS.contains(&ext) {
        return true;
    }

    EXCLUDED_BASE_NAMES.contains(&base_name(name))
}

/// Returns `true` if the entry content should become the placeholder.
#[must_use]
pub fn is_placeholder_target(name: &str) -> bool {
    extension(name) == PLACEHOLDER_EXTENSION
}

/// Classifies an entry. Exclusion always wins, so an excluded directory is
/// dropped too.
///
/// # Examples
///
/// ```
/// use zipscrub_core::filter::EntryAction;
/// use zipscrub_core::filter::classify;
///
/// assert_eq!(classify("preview.png", false), EntryAction::Exclude);
/// assert_eq!(classify("icons/", true), EntryAction::Directory);
/// assert_eq!(classify("icons/app.png", false), EntryAction::Placeholder);
/// assert_eq!(classify("mod.json", false), EntryAction::Copy);
/// ```
#[must_use]
pub fn classify(name: &str, is_dir: bool) -> EntryAction {
    if should_exclude(name) {
        EntryAction::Exclude
    } else if is_dir {
        EntryAction::Directory
    } else if is_placeholder_target(name) {
        EntryAction::Placeholder
    } else {
        EntryAction::Copy
    }
}

/// Returns the extension of the last path segment, including the leading
/// dot, or `""` when the segment has no dot.
///
/// # Examples
///
/// ```
/// use zipscrub_core::filter::extension;
///
/// assert_eq!(extension("a/b/c.tar.gz"), ".gz");
/// assert_eq!(extension("a.d/readme"), "");
/// assert_eq!(extension(".lua"), ".lua");
/// assert_eq!(extension("dir/"), "");
/// ```
#[must_use]
pub fn extension(name: &str) -> &str {
    let segment = name.rfind('/').map_or(name, |i| &name[i + 1..]);
    segment.rfind('.').map_or("", |i| &segment[i..])
}

/// Returns the last path segment, ignoring trailing separators.
///
/// An empty name yields `"."` and a name made only of separators yields
/// `"/"`, so the result is never empty.
///
/// # Examples
///
/// ```
/// use zipscrub_core::filter::base_name;
///
/// assert_eq!(base_name("docs/LICENSE"), "LICENSE");
/// assert_eq!(base_name("assets/icons/"), "icons");
/// assert_eq!(base_name(""), ".");
/// ```
#[must_use]
pub fn base_name(name: &str) -> &str {
    if name.is_empty() {
        return ".";
    }
    let trimmed = name.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rfind('/').map_or(trimmed, |i| &trimmed[i + 1..])
}
