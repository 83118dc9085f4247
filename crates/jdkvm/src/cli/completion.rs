use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

use crate::cli::App;

#[derive(Args, Clone, Debug)]
pub struct CompletionArg {
    shell: Shell,
}

pub fn completion(arg: CompletionArg) -> Result<()> {
    let mut cmd = App::command();
    generate(arg.shell, &mut cmd, "jdkvm", &mut std::io::stdout());
    Ok(())
}
