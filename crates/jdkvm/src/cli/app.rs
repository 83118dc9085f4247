use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cli::{completion, doctor, init, install, list, proxy, remote, remove, switch};
use crate::config::Context;

#[derive(Clone, Debug, Parser)]
#[command(name = "jdkvm", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,

    /// Config file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output; repeat for debug.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(name = "init", about = "Set JAVA_HOME and PATH for the active version link")]
    Init(init::InitArg),
    #[command(alias = "ls", name = "list", about = "List installed versions")]
    List(list::ListArg),
    #[command(alias = "i", name = "install", about = "Download and install a version")]
    Install(install::InstallArg),
    #[command(alias = "s", name = "switch", about = "Switch the active version")]
    Switch(switch::SwitchArg),
    #[command(alias = "rm", name = "remove", about = "Remove an installed version")]
    Remove(remove::RemoveArg),
    #[command(name = "rls", about = "List versions available for download")]
    Rls(remote::RlsArg),
    #[command(name = "proxy", about = "Show or set the download proxy")]
    Proxy(proxy::ProxyArg),
    #[command(name = "doctor", about = "Check the active link against the recorded version")]
    Doctor(doctor::DoctorArg),
    #[command(name = "completion", about = "Print shell completions")]
    Completion(completion::CompletionArg),
}

impl Commands {
    pub fn run(self, ctx: &mut Context, quiet: bool) -> Result<()> {
        match self {
            Commands::Init(arg) => init::init(arg, ctx),
            Commands::List(arg) => list::list(arg, ctx),
            Commands::Install(arg) => install::install(arg, ctx, quiet),
            Commands::Switch(arg) => switch::switch(arg, ctx),
            Commands::Remove(arg) => remove::remove(arg, ctx),
            Commands::Rls(arg) => remote::rls(arg, ctx),
            Commands::Proxy(arg) => proxy::proxy(arg, ctx),
            Commands::Doctor(arg) => doctor::doctor(arg, ctx),
            Commands::Completion(arg) => completion::completion(arg),
        }
    }
}
