//! storyboard-sync - regenerate a Utopia storyboard from a component tree
//!
//! # Usage
//!
//! ```bash
//! storyboard-sync
//! storyboard-sync --root app/src --output utopia/storyboard.js
//! storyboard-sync --no-preserve --include-utils -v
//! storyboard-sync --dry-run
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::{debug, info};

use storyboard_sync::config::{load_config, SyncOptions};
use storyboard_sync::logging::{self, LogSettings};
use storyboard_sync::sync::run_sync;

#[derive(Parser, Debug)]
#[command(name = "storyboard-sync")]
#[command(version)]
#[command(about = "Scan React components and regenerate the Utopia storyboard")]
#[command(long_about = None)]
struct Cli {
    /// Source tree to scan
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Storyboard file to read and rewrite
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON file overriding the default settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Include utility, index and hook files
    #[arg(long)]
    include_utils: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Recompute positions of existing scenes
    #[arg(long)]
    no_preserve: bool,

    /// Keep scenes whose component no longer exists
    #[arg(long)]
    no_prune: bool,

    /// Do not create scenes for components that lack one
    #[arg(long)]
    no_force_regenerate: bool,

    /// Print the storyboard instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Also write JSONL logs to this file
    #[arg(long, value_name = "FILE")]
    log_json: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> SyncOptions {
        SyncOptions {
            include_utilities: self.include_utils,
            preserve: !self.no_preserve,
            prune: !self.no_prune,
            force_regenerate: !self.no_force_regenerate,
            dry_run: self.dry_run,
        }
    }
}

/// Drop arguments the CLI does not know, so stray flags never abort a run.
///
/// Known flags keep their value (`--root src` or `--root=src`); anything
/// else, including bare words, is discarded.
fn retain_known_args(args: Vec<String>) -> Vec<String> {
    let command = Cli::command();
    let mut longs: Vec<(String, bool)> = vec![("help".to_string(), false), ("version".to_string(), false)];
    let mut shorts: Vec<(char, bool)> = vec![('h', false), ('V', false)];
    for arg in command.get_arguments() {
        let takes_value = arg.get_action().takes_values();
        if let Some(long) = arg.get_long() {
            longs.push((long.to_string(), takes_value));
        }
        if let Some(short) = arg.get_short() {
            shorts.push((short, takes_value));
        }
    }

    let mut kept = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    if let Some(program) = iter.next() {
        kept.push(program);
    }

    while let Some(arg) = iter.next() {
        let takes_value = if let Some(long) = arg.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            longs
                .iter()
                .find(|(known, _)| known == name)
                .map(|(_, takes_value)| *takes_value && !inline_value)
        } else if let Some(short) = arg.strip_prefix('-') {
            let mut chars = short.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => shorts
                    .iter()
                    .find(|(known, _)| *known == c)
                    .map(|(_, takes_value)| *takes_value),
                _ => None,
            }
        } else {
            None
        };

        match takes_value {
            Some(true) => {
                kept.push(arg);
                if let Some(value) = iter.next() {
                    kept.push(value);
                }
            }
            Some(false) => kept.push(arg),
            None => debug!(arg = %arg, "Ignoring unrecognized argument"),
        }
    }
    kept
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(retain_known_args(std::env::args().collect()));

    let _guard = logging::init(&LogSettings {
        verbose: cli.verbose,
        json_path: cli.log_json.clone(),
    });

    let mut config = load_config(cli.config.as_deref());
    if let Some(root) = &cli.root {
        config.root_dir = root.clone();
    }
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }

    let options = cli.options();
    debug!(?options, root = %config.root_dir.display(), "Starting storyboard sync");

    let outcome = run_sync(&config, &options)
        .with_context(|| format!("failed to update {}", config.output_path.display()))?;

    if options.dry_run {
        print!("{}", outcome.text);
    } else if outcome.report.changed {
        info!(path = %outcome.report.output_path.display(), "Storyboard updated");
    } else {
        info!(path = %outcome.report.output_path.display(), "Storyboard already up to date");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unknown_flags_are_dropped() {
        let kept = retain_known_args(args(&[
            "storyboard-sync",
            "--frobnicate",
            "--no-prune",
            "-x",
            "stray",
            "--verbose",
        ]));
        assert_eq!(kept, args(&["storyboard-sync", "--no-prune", "--verbose"]));
    }

    #[test]
    fn test_known_flags_keep_their_values() {
        let kept = retain_known_args(args(&[
            "storyboard-sync",
            "--root",
            "app/src",
            "--output=out/storyboard.js",
            "-v",
        ]));
        assert_eq!(
            kept,
            args(&["storyboard-sync", "--root", "app/src", "--output=out/storyboard.js", "-v"])
        );
    }

    #[test]
    fn test_flags_map_to_options() {
        let cli = Cli::parse_from(retain_known_args(args(&[
            "storyboard-sync",
            "--include-utils",
            "--no-preserve",
            "--no-force-regenerate",
            "--unknown",
        ])));
        let options = cli.options();
        assert!(options.include_utilities);
        assert!(!options.preserve);
        assert!(options.prune);
        assert!(!options.force_regenerate);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_defaults_match_sync_options() {
        let cli = Cli::parse_from(args(&["storyboard-sync"]));
        assert_eq!(cli.options(), SyncOptions::default());
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
