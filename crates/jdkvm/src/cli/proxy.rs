use anyhow::{Context as _, Result};
use clap::Args;
use jdkvm_fetch::ClientSetting;

use crate::config::Context;

#[derive(Args, Clone, Debug)]
pub struct ProxyArg {
    /// Print the configured proxy.
    #[arg(long)]
    show: bool,
    /// Proxy URL for downloads; an empty value clears it.
    #[arg(long, value_name = "URL", conflicts_with = "show")]
    set: Option<String>,
}

pub fn proxy(arg: ProxyArg, ctx: &mut Context) -> Result<()> {
    match arg.set {
        Some(url) if url.trim().is_empty() => {
            ctx.config.proxy = None;
            println!("Proxy cleared");
        }
        Some(url) => {
            ClientSetting::default()
                .with_proxy(Some(url.clone()))
                .build()
                .with_context(|| format!("invalid proxy {url}"))?;
            println!("Proxy set to {url}");
            ctx.config.proxy = Some(url);
        }
        None => {
            println!("Current proxy: {}", ctx.config.proxy.as_deref().unwrap_or("none"));
        }
    }
    Ok(())
}
