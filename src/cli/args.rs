//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Format blog posts as inline-styled newsletter emails
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: tidings.toml, optional)
    #[arg(short = 'C', long, global = true, default_value = "tidings.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List posts in the source repository, most recent first
    #[command(visible_alias = "l")]
    List {
        /// Refetch instead of using the cached listing
        #[arg(short, long)]
        refresh: bool,
    },

    /// Fetch a post's raw Markdown for editing
    #[command(visible_alias = "f")]
    Fetch {
        /// Post file name, as printed by `list`
        name: String,

        /// Write to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Render a post into newsletter HTML
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Override the computed "View in Browser" URL
        #[arg(short = 'u', long, value_hint = clap::ValueHint::Url)]
        url: Option<String>,

        /// Output file
        #[arg(short, long, default_value = "newsletter.html", value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,

        /// Print the HTML to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Show derived metadata (title, date, article URL) without rendering
    #[command(visible_alias = "m")]
    Meta {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Serve the rendered newsletter for preview and download
    #[command(visible_alias = "p")]
    Preview {
        #[command(flatten)]
        input: InputArgs,

        /// Override the computed "View in Browser" URL
        #[arg(short = 'u', long, value_hint = clap::ValueHint::Url)]
        url: Option<String>,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Where the Markdown comes from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Markdown file to read. Use `-` to read from stdin.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Fetch this post from the source repository instead
    #[arg(long, conflicts_with = "input")]
    pub post: Option<String>,
}
