use anyhow::{Context as _, Result, bail};
use clap::Args;
use jdkvm_store::Error;

use crate::cli::print_warnings;
use crate::config::Context;

#[derive(Args, Clone, Debug)]
pub struct SwitchArg {
    #[arg(id = "name", value_name = "VERSION")]
    version: String,
}

pub fn switch(arg: SwitchArg, ctx: &mut Context) -> Result<()> {
    let v = arg.version;
    let mut lifecycle = ctx.lifecycle(false)?;
    let result = lifecycle.switch_to(&v);
    ctx.record(&lifecycle);

    let report = match result {
        Err(Error::NotInstalled { .. }) => {
            bail!("JDK {v} is not installed, type `jdkvm list` to see what is installed")
        }
        other => other.with_context(|| format!("failed to switch to JDK {v}"))?,
    };
    print_warnings(&report.warnings);
    println!("Now using JDK {v}");
    Ok(())
}
