mod cli_exec;
mod cli_runtime;
mod cli_subcommands;

pub(crate) use self::cli_subcommands::{Commands, ConfigCommands, ProjectCommands, SnippetCommands};

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
