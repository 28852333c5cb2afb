//! Diagramsmith CLI - Turn plain-English descriptions into diagram source

mod cli;

use clap::Parser;

fn main() {
    // Logging is installed by the app once the flags are known
    let cli_args = cli::Cli::parse();

    let mut app = cli::DiagramsmithApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
