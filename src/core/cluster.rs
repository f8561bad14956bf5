//! Filepath: src/core/cluster.rs
//! Grouping filenames by name similarity.
//!
//! ## Greedy anchor clustering
//!
//! Files are visited in input order. The first file not yet placed becomes
//! an *anchor*; every later unplaced file scoring at least `threshold`
//! against the anchor joins it. Groups smaller than the rule set's minimum
//! are dropped and their files stay *orphaned*.
//!
//! Membership is decided against the anchor only, never transitively, so a
//! file joins the first anchor it matches even if a later anchor would score
//! higher. Reordering the input can therefore change the result. Cost is
//! O(n²) similarity evaluations, fine for a single directory listing.

use crate::core::error::{Error, Result};
use crate::core::normalize::base_name;
use crate::core::rules::Rules;

/// Common interface for filename grouping strategies.
pub trait ClusterStrategy
{
    /// Short stable identifier, used in logs and JSON output.
    fn name(&self) -> &'static str;

    /// Group `names` and return, per emitted group, the member indices in
    /// input order. Groups are disjoint and listed in anchor order.
    fn group(
        &self,
        rules: &Rules,
        names: &[&str],
        threshold: f64,
    ) -> Result<Vec<Vec<usize>>>;
}

/// Single-pass, order-dependent, anchor-based grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyAnchorClustering;

impl ClusterStrategy for GreedyAnchorClustering
{
    fn name(&self) -> &'static str
    {
        "greedy-anchor"
    }

    fn group(
        &self,
        rules: &Rules,
        names: &[&str],
        threshold: f64,
    ) -> Result<Vec<Vec<usize>>>
    {
        check_threshold(threshold)?;

        let bases: Vec<&str> = names
            .iter()
            .map(|n| base_name(n))
            .collect();
        let mut used = vec![false; bases.len()];
        let mut groups = Vec::new();

        for i in 0..bases.len()
        {
            if used[i]
            {
                continue;
            }
            used[i] = true;

            let mut members = vec![i];
            for j in (i + 1)..bases.len()
            {
                if used[j]
                {
                    continue;
                }

                if rules.similarity(bases[i], bases[j]) >= threshold
                {
                    members.push(j);
                    used[j] = true;
                }
            }

            if members.len() >= rules.min_cluster_size()
            {
                groups.push(members);
            }
        }

        Ok(groups)
    }
}

/// Reject thresholds outside `[0, 1]`, NaN included.
pub fn check_threshold(threshold: f64) -> Result<()>
{
    if (0.0..=1.0).contains(&threshold)
    {
        Ok(())
    }
    else
    {
        Err(Error::InvalidArgument {
            name: "threshold",
            message: format!("must be between 0.0 and 1.0, got {threshold}"),
        })
    }
}

impl Rules
{
    /// Group `files` with [`GreedyAnchorClustering`].
    pub fn cluster<S: AsRef<str>>(
        &self,
        files: &[S],
        threshold: f64,
    ) -> Result<Vec<Vec<String>>>
    {
        self.cluster_with(&GreedyAnchorClustering, files, threshold)
    }

    /// Group `files` with an explicit strategy.
    pub fn cluster_with<C, S>(
        &self,
        strategy: &C,
        files: &[S],
        threshold: f64,
    ) -> Result<Vec<Vec<String>>>
    where
        C: ClusterStrategy + ?Sized,
        S: AsRef<str>,
    {
        let names: Vec<&str> = files
            .iter()
            .map(|f| f.as_ref())
            .collect();

        let groups = strategy.group(self, &names, threshold)?;
        Ok(groups
            .into_iter()
            .map(|idxs| {
                idxs.into_iter()
                    .map(|i| names[i].to_string())
                    .collect()
            })
            .collect())
    }
}
