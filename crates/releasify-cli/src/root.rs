use std::path::{Path, PathBuf};

/// Resolve the directory actions run in.
///
/// The config file's own directory is the starting point; `working_dir` from
/// the config is applied on top of it, so relative values are relative to the
/// config file and absolute values win outright.
pub fn resolve_working_directory(config_path: &Path, working_dir: &Path) -> PathBuf {
    let base = config_path.parent().unwrap_or(Path::new(""));
    let dir = base.join(working_dir);
    if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir
    }
}
