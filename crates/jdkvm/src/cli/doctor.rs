use std::path::Path;

use anyhow::{Context as _, Result, bail};
use clap::Args;
use jdkvm_platform::env::is_in_path;
use jdkvm_store::{ActiveLink, VersionStore};

use crate::config::Context;

#[derive(Args, Clone, Debug)]
pub struct DoctorArg {}

/// Compare the active link with the recorded current version.
pub fn doctor(_arg: DoctorArg, ctx: &mut Context) -> Result<()> {
    let settings = ctx.settings();
    let store = VersionStore::new(&settings.store_root);
    let link = ActiveLink::new(&settings.java_home);

    let active = link
        .resolve(&store)
        .context("run `jdkvm switch <version>` to repair the active link")?;
    let recorded = settings.current.as_deref();
    if active.as_deref() != recorded {
        bail!(
            "recorded version is {} but the active link points to {}; run `jdkvm switch <version>` to repair",
            recorded.unwrap_or("none"),
            active.as_deref().unwrap_or("nothing"),
        );
    }

    match active {
        Some(v) => println!("JDK {v} is active at {}", link.path().display()),
        None => println!("No version is active"),
    }
    if std::env::var_os("JAVA_HOME").is_none_or(|home| Path::new(&home) != link.path()) {
        eprintln!("warning: JAVA_HOME does not point at {}, run `jdkvm init`", link.path().display());
    }
    if !is_in_path(link.path().join("bin")) {
        eprintln!("warning: {} is not on PATH", link.path().join("bin").display());
    }
    Ok(())
}
