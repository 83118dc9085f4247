use anyhow::{Result, bail};
use clap::Args;
use jdkvm_store::Error;

use crate::cli::print_warnings;
use crate::config::Context;

#[derive(Args, Clone, Debug)]
pub struct RemoveArg {
    #[arg(id = "name", value_name = "VERSION")]
    version: String,
}

pub fn remove(arg: RemoveArg, ctx: &mut Context) -> Result<()> {
    let v = arg.version;
    let mut lifecycle = ctx.lifecycle(false)?;
    let result = lifecycle.remove_version(&v);
    ctx.record(&lifecycle);

    let report = match result {
        Ok(report) => report,
        Err(Error::NotInstalled { .. }) => {
            bail!("JDK {v} is not installed, type `jdkvm list` to see what is installed")
        }
        Err(e) => {
            if let Error::RemoveFailed { path, .. } = &e {
                eprintln!("Manually remove {}.", path.display());
            }
            return Err(anyhow::Error::new(e).context(format!("error removing JDK {v}")));
        }
    };
    print_warnings(&report.warnings);
    println!("Removed JDK {v}");
    Ok(())
}
