//! Shared test utilities for the weather poster workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Weather record fixtures
//! - Background image generators and raster inspection helpers
//! - Font discovery and skip macros for tests that need a TrueType font
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{require_test_font, fixtures};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro to skip a test if no TrueType font is available.
///
/// Fonts are not checked into the repository. Set `POSTER_TEST_FONT` to a
/// `.ttf` file, or install one of the fonts listed in
/// [`paths::SYSTEM_FONT_CANDIDATES`].
///
/// # Usage
///
/// ```ignore
/// use test_utils::require_test_font;
///
/// #[test]
/// fn test_truetype_rendering() {
///     let font_path = require_test_font!();
///     // Test code using font_path...
/// }
/// ```
///
/// If no font is found, the test prints a skip message and returns early.
#[macro_export]
macro_rules! require_test_font {
    () => {{
        match $crate::find_test_font() {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: No TrueType font found. Set POSTER_TEST_FONT to a .ttf file.");
                return;
            }
        }
    }};
}

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(270.4_f32, 270.0_f32, 1.0_f32); // passes
/// assert_approx_eq!(275.0_f32, 270.0_f32, 1.0_f32); // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of pixel channels.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_rgb_approx_eq;
///
/// assert_rgb_approx_eq!(pixel, [175, 175, 175], 2);
/// ```
#[macro_export]
macro_rules! assert_rgb_approx_eq {
    ($pixel:expr, [$r:expr, $g:expr, $b:expr], $tolerance:expr) => {{
        let pixel = $pixel;
        $crate::assert_approx_eq!(pixel[0], $r, $tolerance);
        $crate::assert_approx_eq!(pixel[1], $g, $tolerance);
        $crate::assert_approx_eq!(pixel[2], $b, $tolerance);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_rgb_approx_eq_passes() {
        let pixel = image::Rgba([174u8, 176, 175, 255]);
        assert_rgb_approx_eq!(pixel, [175, 175, 175], 1);
    }
}
