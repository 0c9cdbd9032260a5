use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// Path to the `ID.in` file naming a test
///
/// All other fixtures of the test share its directory and file stem.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
pub struct TestId {
    path: PathBuf,
}

impl TestId {
    pub fn new<P>(path: P) -> TestId
    where
        P: Into<PathBuf>,
    {
        TestId { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn base_id(&self) -> OsString {
        self.path.file_stem().map(OsString::from).unwrap_or_default()
    }

    /// `base_dir/base_id`, the common prefix of all fixtures
    pub fn base(&self) -> PathBuf {
        self.base_dir().join(self.base_id())
    }

    /// Fixture with the same stem and the extension `ext` (given with its dot)
    pub fn sibling(&self, ext: &str) -> PathBuf {
        let mut name = self.base_id();
        name.push(ext);
        self.base_dir().join(name)
    }

    /// Same test, with its path made absolute against `current_dir`
    pub fn absolute(&self, current_dir: &Path) -> TestId {
        if self.path.is_absolute() {
            self.clone()
        } else {
            TestId::new(current_dir.join(&self.path))
        }
    }
}

impl Display for TestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
