use anyhow::Result;
use clap::Args;
use jdkvm_store::InstalledEntry;

use crate::config::Context;

#[derive(Args, Clone, Debug)]
pub struct ListArg {}

pub fn list(_arg: ListArg, ctx: &mut Context) -> Result<()> {
    let lifecycle = ctx.lifecycle(false)?;
    print!("{}", render(&lifecycle.list()));
    Ok(())
}

fn render(entries: &[InstalledEntry]) -> String {
    if entries.is_empty() {
        return "No installations recognized.\n".to_string();
    }
    let mut out = String::from("Installed jdk (* marks in use):\n");
    for (i, entry) in entries.iter().enumerate() {
        let mark = if entry.is_current { "  * " } else { "    " };
        out.push_str(&format!("{mark}{}) {}\n", i + 1, entry.name));
    }
    out
}
