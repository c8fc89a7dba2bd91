//! QueryLens TUI — terminal overview of the query compatibility pipeline.
//!
//! Provides an overview screen with expandable detail sections and a
//! technical decisions browser, built with `ratatui` + `crossterm`.

mod app;
mod cli;
mod screens;
mod widgets;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    cli::dispatch(Cli::parse())
}
