//! ifcheck CLI entry point

use clap::Parser;
use ifcheck::cli::{Cli, Command};
use std::process;

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Check {
            model,
            tools_dir,
            filter,
            params,
            output,
            verbose,
        } => ifcheck::cli::check::run_check(
            &model,
            tools_dir,
            filter.as_deref(),
            &params,
            output,
            verbose,
            cli.color,
        ),
        Command::List { tools_dir, output } => ifcheck::cli::list::run_list(tools_dir, output),
    };

    process::exit(exit_code);
}
