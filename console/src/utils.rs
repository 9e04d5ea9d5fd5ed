use std::path::PathBuf;

use clap::Args;
use genarray::utils::NUM_THREADS_ENV;
use glob::glob;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::{
    warn,
    LevelFilter,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        long,
        default_value_t = false,
        help_heading = "UTILS",
        help = "Display progress bar."
    )]
    pub progress: bool,
    #[arg(
        long,
        default_value_t = false,
        help_heading = "UTILS",
        help = "Print debug messages."
    )]
    pub verbose:  bool,
    #[arg(
        long,
        help_heading = "UTILS",
        help = "Number of threads to use. All cores when not set."
    )]
    pub threads:  Option<usize>,
}

impl UtilsArgs {
    /// Sets up logging and the thread count. Must run before any work is
    /// submitted to the thread pool.
    pub fn setup(&self) -> anyhow::Result<()> {
        let level = if self.verbose {
            LevelFilter::Debug
        }
        else {
            LevelFilter::Info
        };
        pretty_env_logger::formatted_builder()
            .filter_level(level)
            .parse_env("RUST_LOG")
            .try_init()?;

        if let Some(threads) = self.threads {
            std::env::set_var(NUM_THREADS_ENV, threads.to_string());
        }
        Ok(())
    }
}

pub fn init_pbar(total: usize) -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}, ETA: {eta}] \
                 [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}",
            )?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Processing...");
    Ok(progress_bar)
}

pub(crate) fn expand_wildcards(paths: &[String]) -> Vec<PathBuf> {
    let mut expanded_paths = Vec::new();

    for path in paths {
        if path.contains('*') || path.contains('?') {
            match glob(path) {
                Ok(matches) => {
                    expanded_paths.extend(matches.filter_map(Result::ok));
                },
                Err(e) => warn!("Error processing wildcard '{}': {}", path, e),
            }
        }
        else {
            expanded_paths.push(PathBuf::from(path));
        }
    }

    expanded_paths
}
