use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// conrelay: run a console program in a separate process and stream its
/// screen back line by line.
#[derive(Parser, Debug)]
#[command(name = "conrelay", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `conrelay=debug`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command line and print its output as it is relayed.
    Run {
        #[arg(required = true, num_args = 1..)]
        command_line: Vec<String>,
    },

    /// Remote role, started by a supervisor.
    #[command(name = "__child__", hide = true)]
    Child {
        supervisor_pid: u32,

        #[arg(required = true, num_args = 1..)]
        command_line: Vec<String>,

        /// Channel directory created by the supervisor.
        #[arg(long)]
        channel: PathBuf,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
