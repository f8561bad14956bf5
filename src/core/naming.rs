//! Filepath: src/core/naming.rs
//! Picking a folder name for a group.
//!
//! The representative is the medoid of the normalized keys: the key whose
//! summed similarity to every key in the group (itself included) is highest.

use tracing::trace;

use crate::core::error::{Error, Result};
use crate::core::rules::Rules;

impl Rules
{
    /// Most representative normalized key of `filenames`.
    ///
    /// Earlier keys win ties. Fails on an empty list.
    pub fn representative_name<S: AsRef<str>>(
        &self,
        filenames: &[S],
    ) -> Result<String>
    {
        if filenames.is_empty()
        {
            return Err(Error::InvalidArgument {
                name: "filenames",
                message: "list cannot be empty".to_string(),
            });
        }

        let keys: Vec<String> = filenames
            .iter()
            .map(|f| self.normalize(f.as_ref()))
            .collect();

        let mut best: Option<&str> = None;
        let mut best_score = 0.0;
        for key in &keys
        {
            let score: f64 = keys
                .iter()
                .map(|other| self.similarity(key, other))
                .sum();
            trace!(key = %key, score, "medoid candidate");

            if score > best_score
            {
                best_score = score;
                best = Some(key.as_str());
            }
        }

        let chosen = best
            .filter(|k| !k.is_empty())
            .unwrap_or(keys[0].as_str())
            .trim();

        if chosen.is_empty()
        {
            Ok(self
                .fallback_name
                .clone())
        }
        else
        {
            Ok(chosen.to_string())
        }
    }

    /// Sanitized folder name for a group of filenames.
    pub fn folder_name<S: AsRef<str>>(
        &self,
        filenames: &[S],
    ) -> Result<String>
    {
        let name = self.representative_name(filenames)?;
        Ok(self.sanitize(&name))
    }
}
