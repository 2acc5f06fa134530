//! Command line front end for gherkbot.
//!
//! `gherkbot convert` turns one feature file into a Robot Framework script;
//! `gherkbot sync` mirrors a directory of feature files into a directory of
//! scripts.

mod cli;
mod config;
mod logging;
mod output;

fn main() -> eyre::Result<()> {
    cli::run()
}
