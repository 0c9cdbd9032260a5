//! Per-project configuration handed to the generic runner.
//!
//! A [`ProjectVariant`] says how to build the command line for a test, which
//! fixtures to stage next to it, and how to compare its output.

use crate::filters::{self, TextFilter};
use crate::test_case::{ProgramCommand, TestCase};
use crate::test_id::TestId;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

pub type ArgumentBuilder = fn(&TestId) -> io::Result<Vec<String>>;
pub type FixtureEnumerator = fn(&TestId) -> Vec<PathBuf>;

#[derive(Clone, Copy, Debug)]
pub enum ComparePolicy {
    /// Raw stdout against the golden file, line by line, ignoring trailing
    /// whitespace at the end of the text
    RebuildSequence,
    /// Both texts pass through the filter before being split into lines
    Filtered(TextFilter),
}

impl ComparePolicy {
    pub fn mismatch_message(&self) -> &'static str {
        match self {
            Self::RebuildSequence => "Wrong sequence of rebuilding commands issued",
            Self::Filtered(_) => "Output does not match expected output",
        }
    }

    pub fn lines(&self, text: &str) -> Vec<String> {
        match self {
            Self::RebuildSequence => filters::to_lines(text),
            Self::Filtered(filter) => filter(text).lines().map(String::from).collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProjectVariant {
    pub name: &'static str,
    pub bin_name: &'static str,
    pub usage_operands: &'static str,
    pub program: String,
    pub build_arguments: ArgumentBuilder,
    pub input_files: FixtureEnumerator,
    pub expected_stdout_ext: &'static str,
    pub compare: ComparePolicy,
    pub env_remove: Vec<String>,
    pub time_limit: Option<Duration>,
    pub report_char_limit: Option<usize>,
}

impl ProjectVariant {
    /// Runs `make.Main -f ID.mk -D ID.dir <targets in ID.in>` and expects the
    /// rebuild commands listed in `ID.std`
    pub fn make() -> ProjectVariant {
        ProjectVariant {
            name: "make",
            bin_name: "make-tester",
            usage_operands: "TEST...",
            program: String::from("java -ea make.Main"),
            build_arguments: make_arguments,
            input_files: make_input_files,
            expected_stdout_ext: ".std",
            compare: ComparePolicy::RebuildSequence,
            env_remove: vec![],
            time_limit: None,
            report_char_limit: None,
        }
    }

    /// Runs `trip.Main -m ID.map <contents of ID.in>` and expects `ID.out`
    /// modulo blank lines and surrounding whitespace
    pub fn trip() -> ProjectVariant {
        ProjectVariant {
            name: "trip",
            bin_name: "trip-tester",
            usage_operands: "TEST...",
            program: String::from("java -ea trip.Main"),
            build_arguments: trip_arguments,
            input_files: trip_input_files,
            expected_stdout_ext: ".out",
            compare: ComparePolicy::Filtered(filters::strip_blank_and_edge_whitespace),
            env_remove: vec![],
            time_limit: Some(Duration::from_secs(15)),
            report_char_limit: None,
        }
    }

    /// Feeds `ID.in` to a headless `galaxy.Main` and expects `ID.out` with
    /// comments removed
    pub fn galaxy() -> ProjectVariant {
        ProjectVariant {
            name: "galaxy",
            bin_name: "galaxy-tester",
            usage_operands: "TEST.in...",
            program: String::from("java -ea galaxy.Main --testing --no-display"),
            build_arguments: no_arguments,
            input_files: galaxy_input_files,
            expected_stdout_ext: ".out",
            compare: ComparePolicy::Filtered(filters::strip_comments),
            env_remove: vec![String::from("DISPLAY")],
            time_limit: None,
            report_char_limit: Some(10000),
        }
    }

    pub fn usage(&self) -> String {
        format!("Usage: {} [--show=N] {}", self.bin_name, self.usage_operands)
    }

    pub fn expected_stdout_file(&self, id: &TestId) -> PathBuf {
        id.sibling(self.expected_stdout_ext)
    }

    /// The `.err` golden file, present only for tests expected to fail
    pub fn expected_stderr_file(&self, id: &TestId) -> Option<PathBuf> {
        let path = id.sibling(".err");
        path.is_file().then_some(path)
    }

    pub fn test_case(&self, id: &TestId, command: &ProgramCommand) -> io::Result<TestCase> {
        let mut arguments = command.fixed_arguments.clone();
        arguments.extend((self.build_arguments)(id)?);

        Ok(TestCase {
            id: id.clone(),
            program: command.program.clone(),
            arguments,
            stdin: Some(id.path().to_path_buf()),
            input_files: (self.input_files)(id),
            env_remove: self.env_remove.clone(),
            time_limit: self.time_limit,
        })
    }
}

// ARGUMENT BUILDERS

fn read_operands(id: &TestId) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(id.path())?;
    Ok(content.split_whitespace().map(String::from).collect())
}

fn make_arguments(id: &TestId) -> io::Result<Vec<String>> {
    let base = id.base().display().to_string();

    let mut arguments = vec![
        String::from("-f"),
        format!("{}.mk", base),
        String::from("-D"),
        format!("{}.dir", base),
    ];
    arguments.extend(read_operands(id)?);

    Ok(arguments)
}

fn trip_arguments(id: &TestId) -> io::Result<Vec<String>> {
    let base = id.base().display().to_string();

    let mut arguments = vec![String::from("-m"), format!("{}.map", base)];
    arguments.extend(read_operands(id)?);

    Ok(arguments)
}

fn no_arguments(_id: &TestId) -> io::Result<Vec<String>> {
    Ok(vec![])
}

// FIXTURE ENUMERATORS

fn existing_siblings(id: &TestId, extensions: &[&str]) -> Vec<PathBuf> {
    extensions
        .iter()
        .map(|ext| id.sibling(ext))
        .filter(|path| path.exists())
        .collect()
}

fn make_input_files(id: &TestId) -> Vec<PathBuf> {
    existing_siblings(id, &[".mk", ".dir", ".in"])
}

fn trip_input_files(id: &TestId) -> Vec<PathBuf> {
    existing_siblings(id, &[".in", ".map"])
}

fn galaxy_input_files(id: &TestId) -> Vec<PathBuf> {
    existing_siblings(id, &[".in"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn fixture_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn command() -> ProgramCommand {
        ProgramCommand {
            program: PathBuf::from("/usr/bin/java"),
            fixed_arguments: vec![String::from("-ea"), String::from("make.Main")],
        }
    }

    #[test]
    fn test_make_arguments() {
        let dir = fixture_dir(&[("t1.in", "A B\n")]);
        let id = TestId::new(dir.path().join("t1.in"));
        let base = dir.path().join("t1").display().to_string();

        assert_eq!(
            make_arguments(&id).unwrap(),
            vec![
                String::from("-f"),
                format!("{}.mk", base),
                String::from("-D"),
                format!("{}.dir", base),
                String::from("A"),
                String::from("B"),
            ]
        );
    }

    #[test]
    fn test_trip_arguments() {
        let dir = fixture_dir(&[("t1.in", "  Berkeley Oakland  \n")]);
        let id = TestId::new(dir.path().join("t1.in"));
        let base = dir.path().join("t1").display().to_string();

        assert_eq!(
            trip_arguments(&id).unwrap(),
            vec![
                String::from("-m"),
                format!("{}.map", base),
                String::from("Berkeley"),
                String::from("Oakland"),
            ]
        );
    }

    #[test]
    fn test_arguments_fail_without_in_file() {
        let dir = fixture_dir(&[]);
        let id = TestId::new(dir.path().join("missing.in"));

        assert!(make_arguments(&id).is_err());
        assert!(trip_arguments(&id).is_err());
    }

    #[test]
    fn test_make_input_files_only_existing() {
        let dir = fixture_dir(&[("t1.in", "A"), ("t1.mk", "A: B\n")]);
        let id = TestId::new(dir.path().join("t1.in"));

        assert_eq!(
            make_input_files(&id),
            vec![dir.path().join("t1.mk"), dir.path().join("t1.in")]
        );
    }

    #[test]
    fn test_make_input_files_include_directory() {
        let dir = fixture_dir(&[("t1.in", "A")]);
        fs::create_dir(dir.path().join("t1.dir")).unwrap();
        let id = TestId::new(dir.path().join("t1.in"));

        assert_eq!(
            make_input_files(&id),
            vec![dir.path().join("t1.dir"), dir.path().join("t1.in")]
        );
    }

    #[test]
    fn test_trip_input_files() {
        let dir = fixture_dir(&[("t1.in", ""), ("t1.map", ""), ("t1.out", "")]);
        let id = TestId::new(dir.path().join("t1.in"));

        assert_eq!(
            trip_input_files(&id),
            vec![dir.path().join("t1.in"), dir.path().join("t1.map")]
        );
    }

    #[test]
    fn test_expected_stderr_file_only_when_present() {
        let dir = fixture_dir(&[("t1.in", ""), ("t2.in", ""), ("t2.err", "")]);
        let variant = ProjectVariant::make();

        let t1 = TestId::new(dir.path().join("t1.in"));
        let t2 = TestId::new(dir.path().join("t2.in"));

        assert_eq!(variant.expected_stderr_file(&t1), None);
        assert_eq!(variant.expected_stderr_file(&t2), Some(dir.path().join("t2.err")));
    }

    #[test]
    fn test_expected_stdout_file_per_variant() {
        let id = TestId::new("tests/t1.in");

        assert_eq!(
            ProjectVariant::make().expected_stdout_file(&id),
            Path::new("tests/t1.std")
        );
        assert_eq!(
            ProjectVariant::trip().expected_stdout_file(&id),
            Path::new("tests/t1.out")
        );
    }

    #[test]
    fn test_test_case_prepends_fixed_arguments() {
        let dir = fixture_dir(&[("t1.in", "all")]);
        let id = TestId::new(dir.path().join("t1.in"));

        let test_case = ProjectVariant::make().test_case(&id, &command()).unwrap();

        assert_eq!(&test_case.arguments[..3], &["-ea", "make.Main", "-f"]);
        assert_eq!(test_case.arguments.last().map(String::as_str), Some("all"));
        assert_eq!(test_case.stdin, Some(dir.path().join("t1.in")));
        assert_eq!(test_case.time_limit, None);
    }

    #[test]
    fn test_galaxy_runs_headless() {
        let variant = ProjectVariant::galaxy();

        assert_eq!(variant.env_remove, vec![String::from("DISPLAY")]);
        assert_eq!(variant.report_char_limit, Some(10000));
        assert_eq!(variant.usage(), "Usage: galaxy-tester [--show=N] TEST.in...");
    }

    #[test]
    fn test_trip_has_time_limit() {
        assert_eq!(ProjectVariant::trip().time_limit, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_filtered_lines() {
        let policy = ComparePolicy::Filtered(filters::strip_blank_and_edge_whitespace);

        assert_eq!(policy.lines("  a\n\n b  \n"), vec!["a", "b"]);
    }
}
