//! **foldup** - Group similarly named files into descriptively named folders
//!
//! Filenames are reduced to a comparison key (extension, version tokens and
//! status markers stripped), scored pairwise with a longest-common-block
//! ratio, grouped around anchors, and each group is named after its medoid.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - pure grouping logic plus the scan/organize commands
pub mod core {
    /// Error type for the pure grouping functions
    pub mod error;
    pub use error::{Error, Result};

    /// Immutable rule set (patterns, reserved names, limits)
    pub mod rules;
    pub use rules::{Rules, RulesConfig};

    /// Filename to comparison key
    pub mod normalize;

    /// Longest-common-block similarity ratio
    pub mod similarity;

    /// Greedy anchor clustering behind a strategy trait
    pub mod cluster;
    pub use cluster::{ClusterStrategy, GreedyAnchorClustering};

    /// Medoid folder naming
    pub mod naming;

    /// Filesystem-safe folder names
    pub mod sanitize;

    /// Directory plan: files, groups, counts
    pub mod plan;
    pub use plan::{Group, Plan};

    /// Plain-text preview rendering
    pub mod report;

    /// `scan` command
    pub mod scan;
    pub use scan::run as scan_run;

    /// `organize` command and move execution
    pub mod organize;
    pub use organize::{OrganizeReport, run as organize_run};
}

/// Infrastructure - Configuration, directory listing, and logging
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, OrganizeConfig, init as config_init, load_config};

    /// Single-level directory listing
    pub mod walk;
    pub use walk::FileWalker;

    /// tracing subscriber setup
    pub mod logging;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::{
    ClusterStrategy, Error, GreedyAnchorClustering, Plan, Rules, RulesConfig, organize_run,
    scan_run,
};
pub use crate::infra::{Config, FileWalker, load_config};
