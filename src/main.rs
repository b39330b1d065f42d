mod cli;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    cli::common::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Info(args) => cli::commands::info::execute(args),
        Commands::Eval(args) => cli::commands::eval::execute(args),
        Commands::Jacobian(args) => cli::commands::jacobian::execute(args),
        Commands::Hessian(args) => cli::commands::hessian::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
