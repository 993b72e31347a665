//! Path utilities for locating test assets.
//!
//! Fonts are large and licence-encumbered, so none ships with the
//! repository. Tests that need one look for it in a few well-known places.

use std::path::PathBuf;

/// System fonts tried, in order, when `POSTER_TEST_FONT` is not set.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Bold.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
];

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Searches for a TrueType font usable in tests.
///
/// This function checks the following locations in order:
/// 1. Environment variable `POSTER_TEST_FONT` (if set)
/// 2. `static/fonts/msyhbd.ttf` under the workspace root
/// 3. [`SYSTEM_FONT_CANDIDATES`]
///
/// # Returns
///
/// `Some(PathBuf)` if a font file is found, `None` otherwise.
pub fn find_test_font() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(font) = std::env::var("POSTER_TEST_FONT") {
        candidates.push(PathBuf::from(font));
    }
    candidates.push(workspace_root().join("static/fonts/msyhbd.ttf"));
    candidates.extend(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

    candidates.into_iter().find(|path| path.is_file())
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory with a specific prefix.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_is_valid() {
        let root = workspace_root();
        assert!(
            root.join("Cargo.toml").exists(),
            "Workspace root should contain Cargo.toml: {:?}",
            root
        );
    }

    #[test]
    fn test_find_test_font_returns_existing_file() {
        if let Some(path) = find_test_font() {
            assert!(path.is_file());
        }
    }

    #[test]
    fn test_temp_test_dir_with_prefix() {
        let dir = temp_test_dir_with_prefix("poster_test_");
        let path_str = dir.path().to_string_lossy();
        assert!(path_str.contains("poster_test_"));
    }
}
