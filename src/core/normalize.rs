//! Filepath: src/core/normalize.rs
//! Filename normalization: the canonical key two files are compared on.
//!
//! Order of operations:
//!   1) strip the final extension segment (`archive.tar.gz` keeps `.tar`)
//!   2) remove every version token (`_v1.0.0`, ` ver2`, `.1.2.0`)
//!   3) remove every standalone status marker (`_final`, ` draft`)
//!   4) trim trailing underscores and spaces

use crate::core::rules::Rules;

/// Final path component, splitting on both `/` and `\`.
pub fn base_name(path: &str) -> &str
{
    path.rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
}

/// Split `name` into `(stem, extension)` where the extension keeps its dot.
///
/// A dot only starts an extension when a non-dot character precedes it in
/// the final path component, so `.pdf` and `..` have no extension.
pub fn split_extension(name: &str) -> (&str, &str)
{
    let base_start = name
        .rfind(['/', '\\'])
        .map_or(0, |i| i + 1);

    let Some(dot) = name.rfind('.')
    else
    {
        return (name, "");
    };

    if dot < base_start
    {
        return (name, "");
    }

    if name[base_start..dot]
        .chars()
        .any(|c| c != '.')
    {
        (&name[..dot], &name[dot..])
    }
    else
    {
        (name, "")
    }
}

impl Rules
{
    /// Canonical comparison key for `filename`. May be empty.
    pub fn normalize(&self, filename: &str) -> String
    {
        if filename.is_empty()
        {
            return String::new();
        }

        let (stem, _) = split_extension(filename);
        let without_versions = self
            .version
            .replace_all(stem, "");
        let without_markers = self.strip_markers(&without_versions);

        without_markers
            .trim_end_matches(['_', ' '])
            .to_string()
    }

    /// Remove every bounded marker occurrence, left to right.
    fn strip_markers(
        &self,
        text: &str,
    ) -> String
    {
        let Some(marker) = &self.marker
        else
        {
            return text.to_string();
        };

        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut at = 0;

        while at <= text.len()
        {
            let Some(caps) = marker.captures_at(text, at)
            else
            {
                break;
            };
            let Some(m) = caps.name("m")
            else
            {
                break;
            };

            out.push_str(&text[copied..m.start()]);
            copied = m.end();

            // The boundary char is not consumed; an empty match cannot occur
            at = m.end();
        }

        out.push_str(&text[copied..]);
        out
    }
}
