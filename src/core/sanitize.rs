//! Filepath: src/core/sanitize.rs
//! Folder names that are legal everywhere we run.
//!
//! Windows rules are applied on every platform so a plan computed on Linux
//! stays valid when the same directory is organized from Windows.

use crate::core::normalize::split_extension;
use crate::core::rules::Rules;

impl Rules
{
    /// Make `name` usable as a folder name. Never fails, never empty.
    pub fn sanitize(&self, name: &str) -> String
    {
        if name.is_empty()
        {
            return self
                .fallback_name
                .clone();
        }

        let replaced: String = name
            .chars()
            .map(|c| if self.invalid_chars.contains(&c) { '_' } else { c })
            .collect();
        let mut out = replaced
            .trim_matches([' ', '.'])
            .to_string();

        // Device names are reserved with any extension (CON.txt too)
        let (base, _) = split_extension(&out);
        if self
            .reserved_names
            .contains(&base.to_uppercase())
        {
            out = format!("__{out}");
        }

        if out
            .chars()
            .count()
            > self.max_name_len
        {
            let truncated: String = out
                .chars()
                .take(self.max_name_len)
                .collect();
            out = truncated
                .trim_end_matches([' ', '.'])
                .to_string();
        }

        if out.is_empty()
        {
            return self
                .fallback_name
                .clone();
        }

        out
    }
}
