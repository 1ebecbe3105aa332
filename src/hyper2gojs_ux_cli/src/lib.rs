use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hypernomicon::cmd::{ConvertArgs, DebatesArgs};
use serde::Serialize;

pub mod convert;
pub mod debates;
pub mod service_management;

#[derive(Debug, Clone, Copy, ValueEnum, Default, Serialize)]
pub enum LogMode {
    Full,
    Json,
    #[default]
    Compact,
}

#[derive(Debug, Serialize, Parser, Clone)]
#[command(author, version, about = "Convert Hypernomicon XML to Block Editor (GoJS) JSON", long_about = None)]
pub struct Cli {
    /// Turn debugging information on (repeat for higher levels)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = "HYPER2GOJS_DEBUG")]
    pub debug: u8,

    #[command(subcommand)]
    pub command: CliCommands,

    /// How log lines are formatted
    #[clap(long, global = true, value_enum)]
    pub log_mode: Option<LogMode>,

    /// File for logs to be written to
    #[arg(long, global = true, value_parser)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Serialize, Subcommand, Clone)]
pub enum CliCommands {
    Convert(ConvertArgs),
    Debates(DebatesArgs),
    /// generate CLI help markdown
    CliHelpMd,
}

pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        CliCommands::Convert(args) => convert::execute(args),
        CliCommands::Debates(args) => debates::execute(args),
        CliCommands::CliHelpMd => {
            clap_markdown::print_help_markdown::<Cli>();
            Ok(())
        }
    }
}
