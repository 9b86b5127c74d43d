use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("tagdo v", env!("CARGO_PKG_VERSION"), " - todos with @category tags"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read and write data in a different directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Write logs here instead of <data dir>/tagdo.log
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a todo, or move a matching one to the top (`"Stretch @pe"`)
    Add(AddArgs),
    /// List todos, most recent first
    List,
    /// List categories
    Categories,
    /// Show what the input would offer for partially typed text
    Suggest(SuggestArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Todo text, optionally ending in a category tag
    pub text: String,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Text as typed so far
    #[arg(default_value = "")]
    pub text: String,
}
