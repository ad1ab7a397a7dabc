use clap::Parser;
use webos_cli::cli::Cli;
use webos_cli::error::CliError;
use webos_cli::{commands, logging};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::dispatch(cli).await {
		handle_error(&err);
		std::process::exit(1);
	}
}

fn handle_error(err: &CliError) {
	eprintln!("error: {err}");

	let mut source = std::error::Error::source(err);
	while let Some(cause) = source {
		eprintln!("  caused by: {cause}");
		source = cause.source();
	}

	if let Some(hint) = err.hint() {
		eprintln!("hint: {hint}");
	}
}
