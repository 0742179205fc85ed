use std::path::{Path, PathBuf};

use crate::error::HarnessError;

/// Location for saved plan files: `<XDG cache dir>/tfh/<slug>.tfplan`,
/// one slot per configuration directory.
pub fn plan_artifact_path(config_dir: &Path) -> Result<PathBuf, HarnessError> {
    let base = dirs::cache_dir()
        .ok_or_else(|| HarnessError::Config("no cache directory on this platform".to_string()))?;
    let dir = base.join("tfh");
    std::fs::create_dir_all(&dir)?;

    let canonical = config_dir
        .canonicalize()
        .unwrap_or_else(|_| config_dir.to_path_buf());
    Ok(dir.join(format!("{}.tfplan", slug(&canonical.display().to_string()))))
}

fn slug(path: &str) -> String {
    let mapped: String = path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    mapped.trim_matches('-').to_string()
}
