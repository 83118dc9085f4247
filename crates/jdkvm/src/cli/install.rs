use anyhow::{Context as _, Result, bail};
use clap::Args;
use jdkvm_fetch::{fetch_index, find_release};

use crate::config::Context;

#[derive(Args, Clone, Debug)]
pub struct InstallArg {
    /// Version name as listed by `jdkvm rls`.
    #[arg(id = "name", value_name = "VERSION")]
    version: String,
}

pub fn install(arg: InstallArg, ctx: &mut Context, quiet: bool) -> Result<()> {
    let v = arg.version;
    let mut lifecycle = ctx.lifecycle(!quiet)?;
    if lifecycle.store().is_installed(&v) {
        bail!("Version {v} is already installed.");
    }

    let index = ctx.index_url();
    let releases = fetch_index(&ctx.fetcher(false)?, &index)
        .with_context(|| format!("failed to fetch the version index from {index}"))?;
    let Some(release) = find_release(&releases, &v) else {
        bail!("JDK {v} is not available for download, run `jdkvm rls` to see available versions");
    };

    if !quiet {
        println!("Installing JDK {v} ...");
    }
    let report = lifecycle
        .install(&v, &release.url)
        .with_context(|| format!("could not install JDK {v}"))?;
    tracing::info!(path = %report.path.display(), "installed");

    if !quiet {
        println!("Installation complete. If you want to use this version, type\n\n    jdkvm switch {v}");
    }
    Ok(())
}
