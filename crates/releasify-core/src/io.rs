use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve where `src` lands when moved or copied to `dst`.
///
/// An existing directory at `dst` receives `src` under its own file name;
/// any other `dst` is used as the final path.
pub fn placement(src: &Path, dst: &Path) -> io::Result<PathBuf> {
    if !dst.is_dir() {
        return Ok(dst.to_path_buf());
    }
    let name = src.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' has no file name", src.display()),
        )
    })?;
    Ok(dst.join(name))
}

/// Copy a single file, into `dst` when `dst` is an existing directory.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    let target = placement(src, dst)?;
    fs::copy(src, target)?;
    Ok(())
}

/// Recursively copy the tree at `src` to a new directory `dst`.
///
/// Fails with `AlreadyExists` when `dst` is already present. The source is
/// listed before anything is created, so a missing source leaves `dst` alone
/// and a `dst` inside `src` is copied once rather than into itself.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    let entries = list_dir(src)?;
    if fs::symlink_metadata(dst).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", dst.display()),
        ));
    }
    fs::create_dir_all(dst)?;
    let root = normalized(dst)?;
    copy_entries(entries, dst, &root)
}

fn list_dir(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    fs::read_dir(dir)?.collect()
}

/// Copy listed entries into `dst`, never descending into `root`, the
/// directory the whole copy is being written to.
fn copy_entries(entries: Vec<fs::DirEntry>, dst: &Path, root: &Path) -> io::Result<()> {
    for entry in entries {
        let path = entry.path();
        let target = dst.join(entry.file_name());
        if path.is_dir() {
            if normalized(&path)? == root {
                continue;
            }
            let children = list_dir(&path)?;
            fs::create_dir(&target)?;
            copy_entries(children, &target, root)?;
        } else {
            fs::copy(&path, &target)?;
        }
    }
    Ok(())
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
///
/// Symlinks are not followed, so two spellings of the same location compare
/// equal without either having to exist.
pub fn normalized(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}

/// Move a file or directory tree.
///
/// A plain rename is tried first. When that fails while the source still
/// exists (for instance across mount points) the source is copied to the
/// destination and then removed.
pub fn move_path(src: &Path, dst: &Path) -> io::Result<()> {
    let target = placement(src, dst)?;
    if dst.is_dir() && fs::symlink_metadata(&target).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", target.display()),
        ));
    }
    if src.is_dir() && normalized(&target)?.starts_with(normalized(src)?) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "cannot move '{}' into itself at '{}'",
                src.display(),
                target.display()
            ),
        ));
    }

    let renamed = fs::rename(src, &target);
    let Err(rename_err) = renamed else {
        return Ok(());
    };
    if fs::symlink_metadata(src).is_err() {
        return Err(rename_err);
    }

    if src.is_file() {
        fs::copy(src, &target)?;
        fs::remove_file(src)
    } else {
        copy_tree(src, &target)?;
        fs::remove_dir_all(src)
    }
}

/// Remove a plain file, or a whole directory tree.
pub fn remove_path(path: &Path) -> io::Result<()> {
    if path.is_file() {
        fs::remove_file(path)
    } else {
        fs::remove_dir_all(path)
    }
}

/// Create an empty file, truncating any existing content.
pub fn touch(path: &Path) -> io::Result<()> {
    fs::File::create(path)?;
    Ok(())
}
