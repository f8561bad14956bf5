//! Filepath: src/core/similarity.rs
//! Longest-common-block similarity ratio.
//!
//! The score of two sequences is `2 * M / T`, where `M` is the total length
//! of the matching blocks and `T` the combined length. Blocks are found
//! greedily: take the longest common contiguous run, then recurse into the
//! unmatched regions on either side of it. When the second sequence has 200
//! or more elements, elements occurring in more than 1% of it are dropped
//! from the index used to seed matches (they can still extend a match).

use std::collections::HashMap;

use crate::core::rules::Rules;

/// Sequences at least this long get the popular-element filter.
const POPULAR_MIN_LEN: usize = 200;

/// Block matcher over two char sequences.
struct BlockMatcher<'s>
{
    a: &'s [char],
    b: &'s [char],

    /// Positions of each element of `b`, ascending, popular elements removed
    b2j: HashMap<char, Vec<usize>>,
}

impl<'s> BlockMatcher<'s>
{
    fn new(
        a: &'s [char],
        b: &'s [char],
    ) -> Self
    {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b
            .iter()
            .enumerate()
        {
            b2j.entry(c)
                .or_default()
                .push(j);
        }

        if b.len() >= POPULAR_MIN_LEN
        {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, idxs| idxs.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` x `b[blo..bhi]`.
    ///
    /// Returns `(i, j, k)` with `a[i..i+k] == b[j..j+k]`; among maximal
    /// blocks the one starting earliest in `a`, then earliest in `b`, wins.
    fn longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize)
    {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi
        {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(js) = self
                .b2j
                .get(&a[i])
            {
                for &j in js
                {
                    if j < blo
                    {
                        continue;
                    }
                    if j >= bhi
                    {
                        break;
                    }

                    let prev = if j > 0 { j2len.get(&(j - 1)).copied().unwrap_or(0) } else { 0 };
                    let k = prev + 1;
                    next.insert(j, k);

                    if k > best_k
                    {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_k = k;
                    }
                }
            }
            j2len = next;
        }

        // Grow across elements the popular filter hid from the index
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1]
        {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi && best_j + best_k < bhi && a[best_i + best_k] == b[best_j + best_k]
        {
            best_k += 1;
        }

        (best_i, best_j, best_k)
    }

    /// Sum of the sizes of all matching blocks.
    fn matched_len(&self) -> usize
    {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop()
        {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0
            {
                continue;
            }

            total += k;
            if alo < i && blo < j
            {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi
            {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }
}

/// Raw block ratio of two strings, compared char by char as given.
///
/// Two empty strings score 1.0. The pair is put in a canonical order first
/// so the result does not depend on argument order.
pub fn ratio(
    a: &str,
    b: &str,
) -> f64
{
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let x: Vec<char> = first
        .chars()
        .collect();
    let y: Vec<char> = second
        .chars()
        .collect();

    let total = x.len() + y.len();
    if total == 0
    {
        return 1.0;
    }

    let matched = BlockMatcher::new(&x, &y).matched_len();
    2.0 * matched as f64 / total as f64
}

impl Rules
{
    /// Case-insensitive similarity of two filenames after normalization.
    pub fn similarity(
        &self,
        a: &str,
        b: &str,
    ) -> f64
    {
        let left = self
            .normalize(a)
            .to_lowercase();
        let right = self
            .normalize(b)
            .to_lowercase();

        ratio(&left, &right)
    }
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::*;
    use crate::core::rules::RulesConfig;

    fn rules() -> Rules
    {
        Rules::compile(&RulesConfig::default()).unwrap()
    }

    #[test]
    fn ratio_matches_hand_computed_values()
    {
        // "abcd" vs "bcde": one block "bcd" of 3 -> 6/8
        assert_eq!(ratio("abcd", "bcde"), 0.75);
        // "abxcd" vs "abcd": blocks "ab" and "cd" -> 8/9
        assert!((ratio("abxcd", "abcd") - 8.0 / 9.0).abs() < 1e-12);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("a", ""), 0.0);
    }

    #[test]
    fn blocks_are_found_on_both_sides_of_the_longest()
    {
        // longest "cdef", then "ab" on the left and "gh" on the right
        let a = "ab_cdef_gh";
        let b = "ab-cdef-gh";
        assert!((ratio(a, b) - 16.0 / 20.0).abs() < 1e-12);
    }

    #[test]
    fn long_sequences_use_the_popular_filter_but_still_match()
    {
        let a = "a".repeat(250);
        assert_eq!(ratio(&a, &a), 1.0);

        let b = format!("{}b", "a".repeat(249));
        let r = ratio(&a, &b);
        assert!(r > 0.99 && r < 1.0, "{r}");
    }

    #[test]
    fn identical_and_case_insensitive()
    {
        let r = rules();
        assert_eq!(r.similarity("photo", "photo"), 1.0);
        assert_eq!(r.similarity("PHOTO", "photo"), 1.0);
        assert_eq!(r.similarity("Photo_V1", "photo_v1"), 1.0);
    }

    #[test]
    fn empty_inputs()
    {
        let r = rules();
        assert_eq!(r.similarity("", ""), 1.0);
        assert_eq!(r.similarity("photo", ""), 0.0);
        assert_eq!(r.similarity("", "photo"), 0.0);
    }

    #[test]
    fn versions_markers_and_extensions_are_ignored()
    {
        let r = rules();
        assert_eq!(r.similarity("readme_v1.0.0.txt", "readme_v2.0.0.txt"), 1.0);
        assert_eq!(r.similarity("document_final.pdf", "document_draft.pdf"), 1.0);
        assert_eq!(r.similarity("report.pdf", "report.txt"), 1.0);
        assert_eq!(r.similarity("photo_v1.0.0_final.jpg", "photo_v2.1.0_draft.png"), 1.0);
    }

    #[test]
    fn partial_similarity()
    {
        let r = rules();
        let s = r.similarity("photo_backup", "photo_archive");
        assert!(s > 0.5 && s < 1.0, "{s}");

        assert!(r.similarity("report_draft", "report_final") > 0.6);
        assert!(r.similarity("写真_v1", "写真_v2") > 0.5);
        assert!(r.similarity("report_v1.0.0.pdf", "photo_v1.0.0.pdf") < 0.6);
        assert_eq!(r.similarity("abc", "xyz"), 0.0);
    }

    proptest! {
        #[test]
        fn prop_reflexive(s in "\\PC{0,40}") {
            let r = rules();
            prop_assert_eq!(r.similarity(&s, &s), 1.0);
        }

        #[test]
        fn prop_symmetric_and_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
            let r = rules();
            let ab = r.similarity(&a, &b);
            let ba = r.similarity(&b, &a);
            prop_assert_eq!(ab, ba);
            prop_assert!((0.0..=1.0).contains(&ab));
        }

        #[test]
        fn prop_raw_ratio_symmetric(a in "[a-e]{0,250}", b in "[a-e]{0,250}") {
            prop_assert_eq!(ratio(&a, &b), ratio(&b, &a));
        }
    }
}
