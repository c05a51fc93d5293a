use clap::Parser;

use limit_resolver::{
    adapters::bridge,
    cli::{self, Args},
    error::AppResult,
};

fn main() -> AppResult<()> {
    let args = Args::parse();
    limit_resolver::logging::init(&args.log_level);

    if args.stdio {
        return bridge::run(args);
    }

    cli::print_resolutions(&args, std::io::stdout().lock())
}
