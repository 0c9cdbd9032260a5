use relative_path::RelativePathBuf;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Find absolute path to executable
///
/// First looks for executable in local directory (`in_dir`).
/// Otherwise, looks for executable in PATH.
pub fn find_executable_path<P>(binary_name: &str, in_dir: P) -> Result<PathBuf, which::Error>
where
    P: AsRef<Path>,
{
    let paths = in_dir.as_ref().as_os_str();

    // Search local directory
    let mut local_executables = which::which_in_global(binary_name, Some(paths))?;
    if let Some(path) = local_executables.next() {
        return Ok(path);
    }

    // Search PATH
    which::which(binary_name)
}

/// Copy a file, or a directory with everything below it, to `dest`
pub fn copy_recursively(src: &Path, dest: &Path) -> io::Result<()> {
    if src.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            copy_recursively(&entry.path(), &dest.join(entry.file_name()))?;
        }
        Ok(())
    } else {
        fs::copy(src, dest).map(|_| ())
    }
}

/// Express `path` relative to `base` when possible
pub fn relative_to(path: &Path, base: &Path) -> Option<RelativePathBuf> {
    if path.is_relative() {
        RelativePathBuf::from_path(path).ok()
    } else {
        let path_diff = pathdiff::diff_paths(path, base)?;
        RelativePathBuf::from_path(path_diff).ok()
    }
}

/// Get a platform-independent version of a file path
pub fn display_path<P>(path: P, base: &Path) -> String
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match relative_to(path, base) {
        Some(relative_path) => relative_path.to_string(),
        None => path.display().to_string(),
    }
}
