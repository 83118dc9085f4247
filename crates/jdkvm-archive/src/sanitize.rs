use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive entry path against `base`.
///
/// Leading components are stripped first. Absolute entries and entries whose
/// `..` components climb out of `base` are rejected. Returns `Ok(None)` when
/// stripping consumes the whole path (the wrapper directory itself).
pub fn sanitize_path(entry: &Path, base: &Path, strip_components: usize) -> Result<Option<PathBuf>> {
    if entry.has_root() || matches!(entry.components().next(), Some(Component::Prefix(_))) {
        return Err(Error::ZipSlip {
            entry: entry.to_path_buf(),
            resolved: entry.to_path_buf(),
        });
    }

    let relative = normalize(entry).ok_or_else(|| Error::ZipSlip {
        entry: entry.to_path_buf(),
        resolved: base.join(entry),
    })?;

    let components: Vec<_> = relative.components().collect();
    if components.len() <= strip_components {
        return Ok(None);
    }
    let stripped: PathBuf = components[strip_components..].iter().collect();

    Ok(Some(base.join(stripped)))
}

/// Check that a symlink placed at `link` (already inside `base`) pointing at
/// `target` stays inside `base`. Returns the target unchanged when it does.
pub fn sanitize_symlink_target(target: &Path, link: &Path, base: &Path) -> Result<PathBuf> {
    let escape = || Error::SymlinkEscape {
        entry: link.to_path_buf(),
        target: target.to_path_buf(),
    };

    if target.has_root() || matches!(target.components().next(), Some(Component::Prefix(_))) {
        return Err(escape());
    }

    let link_dir = link
        .parent()
        .and_then(|p| p.strip_prefix(base).ok())
        .ok_or_else(escape)?;

    normalize(&link_dir.join(target)).ok_or_else(escape)?;
    Ok(target.to_path_buf())
}

/// Lexically normalize a relative path. `None` if `..` climbs above the start.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut result = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                result.pop();
                depth -= 1;
            }
            Component::Normal(part) => {
                result.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(result)
}
