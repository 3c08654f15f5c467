//! Path resolution for configuration files

use crate::system::System;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` components
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Keep leading '..' and never pop past the root
                match components.last() {
                    Some(Component::Normal(_)) => {
                        components.pop();
                    }
                    Some(Component::RootDir | Component::Prefix(_)) => {}
                    _ => components.push(component),
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Absolute form of a project root, relative paths resolved against the
/// current directory
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolute_root(system: &dyn System, project_root: &Path) -> io::Result<PathBuf> {
    if project_root.is_absolute() {
        return Ok(normalize_path(project_root));
    }
    let current = system.current_dir()?;
    Ok(normalize_path(&current.join(project_root)))
}

/// Resolve a configuration path against a project root
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_config_path(
    system: &dyn System,
    project_root: &Path,
    config_path: &Path,
) -> io::Result<PathBuf> {
    let root = absolute_root(system, project_root)?;
    Ok(normalize_path(&root.join(config_path)))
}
