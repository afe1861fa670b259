use clap::Parser;
use labkit_cli::{init_tracing, run_cli, Cli};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    let stdout = std::io::stdout();
    let code = run_cli(&cli, &mut stdout.lock());
    std::process::exit(code);
}
