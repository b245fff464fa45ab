use clap::Parser;

use cfml_lint::cli::{Cli, Commands};
use cfml_lint::commands::{run_both, run_config, run_format, run_lint, run_rules};
use cfml_lint::logging::{Verbosity, with_logging};

fn main() {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);

    let exit_code = with_logging(verbosity, || match &cli.command {
        Commands::Lint(args) => run_lint(args, &cli),
        Commands::Format(args) => run_format(args, &cli),
        Commands::Both(args) => run_both(args, &cli),
        Commands::Rules => run_rules(),
        Commands::Config(args) => run_config(args, &cli),
    });

    std::process::exit(exit_code);
}
