//! Tidings - format blog posts as newsletter emails.

mod cli;
mod compiler;
mod config;
mod embed;
mod logger;
mod pipeline;
mod session;
mod source;
mod utils;
mod vdom;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::NewsletterConfig;
use session::Session;
use source::GitHubSource;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = NewsletterConfig::load(&cli)?;
    let source = GitHubSource::new(config.source.clone()).context("failed to set up post source")?;
    let session = Session::new(config, source);

    match &cli.command {
        Commands::List { refresh } => cli::list::list_posts(&session, *refresh),
        Commands::Fetch { name, output } => cli::fetch::fetch_post(&session, name, output.as_deref()),
        Commands::Render {
            input,
            url,
            output,
            stdout,
        } => {
            let output = (!stdout).then_some(output.as_path());
            cli::render::render_post(&session, input, url.as_deref(), output)
        }
        Commands::Meta { input, pretty } => cli::meta::show_meta(&session, input, *pretty),
        Commands::Preview { input, url, .. } => {
            let document = cli::common::read_document(input, &session)?;
            cli::preview::Preview::new(&session, document, url.clone()).run()
        }
    }
}
