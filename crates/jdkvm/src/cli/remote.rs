use anyhow::{Context as _, Result};
use clap::Args;
use jdkvm_fetch::{JdkRelease, fetch_index};

use crate::config::Context;

const SHORT_LIST: usize = 10;

#[derive(Args, Clone, Debug)]
pub struct RlsArg {
    /// Show every version instead of the first ten.
    #[arg(short, long)]
    all: bool,
}

pub fn rls(arg: RlsArg, ctx: &mut Context) -> Result<()> {
    let index = ctx.index_url();
    let releases = fetch_index(&ctx.fetcher(false)?, &index)
        .with_context(|| format!("failed to fetch the version index from {index}"))?;
    print!("{}", render(&releases, arg.all, &index));
    Ok(())
}

fn render(releases: &[JdkRelease], all: bool, index: &str) -> String {
    let mut out = String::new();
    if releases.is_empty() {
        out.push_str("No JDK versions available for download.\n");
    }
    let shown = if all { releases.len() } else { SHORT_LIST };
    for (i, release) in releases.iter().take(shown).enumerate() {
        out.push_str(&format!("    {}) {}\n", i + 1, release.version));
    }
    if releases.len() > shown {
        out.push_str("\nuse \"jdkvm rls -a\" to show all the versions\n");
    }
    out.push_str(&format!("\nFor a complete list, visit {index}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn releases(n: usize) -> Vec<JdkRelease> {
        (1..=n)
            .map(|i| JdkRelease {
                version: format!("{i}"),
                url: format!("https://example.invalid/{i}.zip"),
            })
            .collect()
    }

    #[test]
    fn test_render_truncates() {
        let out = render(&releases(12), false, "https://example.invalid/index.json");
        assert!(out.contains("   10) 10\n"));
        assert!(!out.contains("11) 11"));
        assert!(out.contains("jdkvm rls -a"));
        assert!(out.ends_with("For a complete list, visit https://example.invalid/index.json\n"));
    }

    #[test]
    fn test_render_all() {
        let out = render(&releases(12), true, "x");
        assert!(out.contains("   12) 12\n"));
        assert!(!out.contains("rls -a"));
    }

    #[test]
    fn test_render_empty() {
        let out = render(&[], false, "x");
        assert!(out.starts_with("No JDK versions available for download.\n"));
    }
}
