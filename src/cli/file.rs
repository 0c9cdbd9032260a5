use crate::test_id::TestId;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use tracing::warn;

const GLOB_CHARS: &[char] = &['*', '?', '['];

/// Turn command-line operands into test identifiers
///
/// A directory stands for every `*.in` file below it and a glob pattern for
/// every file it matches. Anything else is taken as an `ID.in` path as is,
/// so a missing file fails its own test instead of vanishing. Duplicates are
/// dropped, first occurrence wins.
pub fn expand_test_paths(test_paths: &[String], current_dir: &Path) -> Vec<TestId> {
    test_paths
        .iter()
        .flat_map(|test_path| expand_test_path(test_path, current_dir))
        .unique()
        .map(TestId::new)
        .collect()
}

fn expand_test_path(test_path: &str, current_dir: &Path) -> Vec<PathBuf> {
    let path = Path::new(test_path);
    let on_disk = current_dir.join(path);

    if on_disk.is_dir() {
        let pattern = path.join("**").join("*.in");
        locate_test_files(&pattern.to_string_lossy(), current_dir)
    } else if !on_disk.exists() && test_path.contains(GLOB_CHARS) {
        locate_test_files(test_path, current_dir)
    } else {
        vec![path.to_path_buf()]
    }
}

fn locate_test_files(pattern: &str, current_dir: &Path) -> Vec<PathBuf> {
    let absolute_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_owned()
    } else {
        current_dir.join(pattern).to_string_lossy().into_owned()
    };

    let entries = match glob::glob(&absolute_pattern) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(pattern, error = %err, "invalid test pattern");
            return vec![];
        }
    };

    let mut output = vec![];
    for entry in entries {
        match entry {
            Ok(found) if found.is_file() => output.push(strip_current_dir(found, current_dir)),
            Ok(_) => {}
            Err(err) => warn!(error = %err, "unreadable path while expanding tests"),
        }
    }

    if output.is_empty() {
        warn!(pattern, "no tests found");
    }
    output.sort();

    output
}

fn strip_current_dir(path: PathBuf, current_dir: &Path) -> PathBuf {
    match path.strip_prefix(current_dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path,
    }
}
