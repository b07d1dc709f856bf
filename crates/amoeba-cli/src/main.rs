use amoeba_cli::{run, Cli};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", amoeba_cli::format_error(&e));
        std::process::exit(1);
    }
}
