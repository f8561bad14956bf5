//! Properties of the public grouping API over generated filenames.

use std::collections::HashSet;

use foldup::{Error, Rules, RulesConfig};
use proptest::prelude::*;

fn rules() -> Rules {
    Rules::compile(&RulesConfig::default()).expect("default rules compile")
}

fn filename() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["photo", "report", "readme", "notes", "budget", "img"]),
        prop::sample::select(vec!["", "_v1", "_v2", " v3", "_final", "_draft", "_copy", "_2023", "_ab"]),
        prop::sample::select(vec![".jpg", ".pdf", ".txt", ".md", ""]),
    )
        .prop_map(|(stem, tail, ext)| format!("{stem}{tail}{ext}"))
}

proptest! {
    #[test]
    fn clusters_are_disjoint_and_drawn_from_input(
        files in prop::collection::vec(filename(), 0..24),
        threshold in 0.0f64..=1.0,
    ) {
        let rules = rules();
        let clusters = rules.cluster(&files, threshold).expect("valid threshold");

        let mut seen = HashSet::new();
        let mut consumed = 0usize;
        for cluster in &clusters {
            prop_assert!(cluster.len() >= 2);
            consumed += cluster.len();
            for name in cluster {
                prop_assert!(files.contains(name));
            }
        }

        // Duplicated input names may appear in several clusters, but never
        // more often than they were supplied.
        for cluster in &clusters {
            for name in cluster {
                seen.insert(name.clone());
            }
        }
        for name in &seen {
            let supplied = files.iter().filter(|f| *f == name).count();
            let used = clusters.iter().flatten().filter(|f| *f == name).count();
            prop_assert!(used <= supplied);
        }
        prop_assert!(consumed <= files.len());
    }

    #[test]
    fn members_meet_threshold_against_their_anchor(
        files in prop::collection::vec(filename(), 0..24),
        threshold in 0.0f64..=1.0,
    ) {
        let rules = rules();
        for cluster in rules.cluster(&files, threshold).expect("valid threshold") {
            let anchor = &cluster[0];
            for member in &cluster[1..] {
                prop_assert!(rules.similarity(anchor, member) >= threshold);
            }
        }
    }

    #[test]
    fn folder_names_are_always_usable(
        files in prop::collection::vec(filename(), 1..8),
    ) {
        let rules = rules();
        let name = rules.folder_name(&files).expect("non-empty group");
        prop_assert!(!name.is_empty());
        prop_assert!(!name.ends_with(' ') && !name.ends_with('.'));
        prop_assert!(!name.chars().any(|c| "<>:\"/\\|?*".contains(c)));
    }
}

#[test]
fn versions_and_markers_collapse_to_one_group() {
    let rules = rules();
    let files = ["photo_v1.jpg", "photo_v2.jpg", "photo_final.jpg", "unrelated.txt"];

    let clusters = rules.cluster(&files, 0.7).expect("cluster");

    assert_eq!(clusters, vec![vec!["photo_v1.jpg", "photo_v2.jpg", "photo_final.jpg"]]);
    assert_eq!(rules.folder_name(&clusters[0]).expect("name"), "photo");
}

#[test]
fn invalid_threshold_is_an_error() {
    let rules = rules();
    for bad in [-0.1, 1.5, f64::NAN] {
        let err = rules.cluster(&["a", "b"], bad).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "threshold", .. }));
    }
}

#[test]
fn empty_inputs_produce_nothing() {
    let rules = rules();
    let none: [&str; 0] = [];
    assert!(rules.cluster(&none, 0.7).expect("cluster").is_empty());
    assert!(rules.folder_name(&none).is_err());
}
