//! Shared test utilities for integration tests
//!
//! Provides the sample directory used across the CLI tests.

use assert_fs::prelude::*;

/// Files written by [`make_sample_dir`], in sorted order.
pub const SAMPLE_FILES: [&str; 10] = [
    "photo_v1.jpg",
    "photo_v2.jpg",
    "photo_v3.jpg",
    "readme_v1.0.0.txt",
    "readme_v2.1.0.txt",
    "report_draft.pdf",
    "report_final.pdf",
    "setup.exe",
    "setup_v2.exe",
    "unique_notes.md",
];

/// Create a flat directory with three families of versioned files, one
/// pair of excluded executables, and one file that matches nothing.
pub fn make_sample_dir() -> assert_fs::TempDir
{
    // Initialize the temporary root
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    for name in SAMPLE_FILES
    {
        // Content is irrelevant; only names are compared
        tmp.child(name)
            .write_str(name)
            .expect("write sample");
    }

    // Return the prepared directory to the caller
    tmp
}
