use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use jdkvm_platform::RuntimeEnv;

use crate::config::{Context, DEFAULT_INDEX};

#[derive(Args, Clone, Debug)]
pub struct InitArg {
    /// Path of the active version link; JAVA_HOME points here.
    #[arg(long = "java-home", value_name = "PATH")]
    java_home: Option<PathBuf>,
    /// URL of the remote version index.
    #[arg(long = "originalpath", value_name = "URL")]
    originalpath: Option<String>,
}

pub fn init(arg: InitArg, ctx: &mut Context) -> Result<()> {
    let config = &mut ctx.config;
    if let Some(home) = arg.java_home {
        config.java_home = Some(home);
    }
    if let Some(url) = arg.originalpath {
        config.original_path = Some(url);
    }
    config.java_home.get_or_insert_with(|| ctx.layout.java_home());
    config.original_path.get_or_insert_with(|| DEFAULT_INDEX.to_string());
    config.store.get_or_insert_with(|| ctx.layout.store());
    config.download.get_or_insert_with(|| ctx.layout.download());
    if !cfg!(windows) {
        config.env_script.get_or_insert_with(|| ctx.layout.env_script());
    }

    let java_home = ctx.java_home();
    ctx.env_sync()
        .sync(&RuntimeEnv::new(&java_home))
        .context(if cfg!(windows) {
            "failed to set `JAVA_HOME` and `PATH`, please run as administrator"
        } else {
            "failed to write the environment script"
        })?;

    println!("set `JAVA_HOME` to {}", java_home.display());
    if let Some(script) = ctx.config.env_script.as_ref().filter(|_| !cfg!(windows)) {
        println!("add this line to your shell profile:\n\n    . \"{}\"", script.display());
    }
    Ok(())
}
