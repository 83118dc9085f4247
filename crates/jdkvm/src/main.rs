use std::process::ExitCode;

use clap::Parser;
use cli::App;
use config::Context;

mod cli;
mod config;
mod logging;

fn main() -> ExitCode {
    let app = App::parse();
    logging::init(app.verbose, app.quiet);

    match run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(app: App) -> anyhow::Result<()> {
    let mut ctx = Context::load(app.config)?;
    let result = app.cmd.run(&mut ctx, app.quiet);
    // Persist whatever the command changed, including a cleared current
    // version after a failed switch.
    let saved = ctx.save();
    result.and(saved)
}
