use crate::test_id::TestId;
use crate::utils::file;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;
use wait_timeout::ChildExt;

/// Everything needed to launch the program under test for one test
#[derive(Clone, Debug)]
pub struct TestCase {
    pub id: TestId,
    pub program: PathBuf,
    pub arguments: Vec<String>,
    pub stdin: Option<PathBuf>,
    pub input_files: Vec<PathBuf>,
    pub env_remove: Vec<String>,
    pub time_limit: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Output is not valid UTF-8")]
    FailedToDecodeUtf8,
    #[error("Program was terminated without an exit code")]
    MissingExitCode,
    #[error("Time limit exceeded ({} s)", .0.as_secs())]
    TimedOut(Duration),
    #[error("No program configured")]
    EmptyCommand,
    #[error("The program '{0}' was not found")]
    ProgramNotFound(String),
    #[error("{0}")]
    IOError(#[from] io::Error),
}

// PROGRAM COMMAND

/// Program under test, given as a command line such as `java -ea make.Main`
#[derive(Clone, Debug)]
pub struct ProgramCommand {
    pub program: PathBuf,
    pub fixed_arguments: Vec<String>,
}

impl ProgramCommand {
    /// Split `command` on whitespace and resolve its first word to an executable
    pub fn resolve(command: &str, current_dir: &Path) -> Result<ProgramCommand, RunError> {
        let mut words = command.split_whitespace();
        let program_name = words.next().ok_or(RunError::EmptyCommand)?;

        let program = file::find_executable_path(program_name, current_dir)
            .map_err(|_err| RunError::ProgramNotFound(program_name.to_owned()))?;

        Ok(ProgramCommand {
            program,
            fixed_arguments: words.map(String::from).collect(),
        })
    }
}

// RUN

pub fn run(test_case: &TestCase) -> Result<ProcessOutput, RunError> {
    let stdin_content = test_case.stdin.as_ref().map(fs::read).transpose()?;
    let scratch_dir = stage_input_files(&test_case.input_files)?;

    let mut cmd = Command::new(&test_case.program);
    cmd.current_dir(scratch_dir.path());
    cmd.args(&test_case.arguments);
    for var_name in &test_case.env_remove {
        cmd.env_remove(var_name);
    }
    cmd.stdin(if stdin_content.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    debug!(
        test = %test_case.id,
        program = %test_case.program.display(),
        arguments = ?test_case.arguments,
        "spawning program under test"
    );

    let mut child = cmd.spawn()?;

    let stdin_writer = match (stdin_content, child.stdin.take()) {
        (Some(content), Some(pipe)) => Some(spawn_writer(content, pipe)),
        _ => None,
    };
    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let exit_status = wait_for_exit(&mut child, test_case.time_limit)?;

    if let Some(writer) = stdin_writer {
        join(writer)?;
    }
    let stdout = decode(stdout_reader.map(join).transpose()?)?;
    let stderr = decode(stderr_reader.map(join).transpose()?)?;

    let exit_code = exit_code(exit_status)?;

    debug!(test = %test_case.id, exit_code, "program finished");

    Ok(ProcessOutput {
        exit_code,
        stdout,
        stderr,
    })
}

/// Copy the fixtures into a fresh directory the program will run in
fn stage_input_files(input_files: &[PathBuf]) -> io::Result<TempDir> {
    let scratch_dir = tempfile::Builder::new()
        .prefix("fixture-tester-")
        .tempdir()?;

    for input_file in input_files {
        if let Some(file_name) = input_file.file_name() {
            let dest = scratch_dir.path().join(file_name);
            debug!(from = %input_file.display(), to = %dest.display(), "staging fixture");
            file::copy_recursively(input_file, &dest)?;
        }
    }

    Ok(scratch_dir)
}

fn wait_for_exit(child: &mut Child, time_limit: Option<Duration>) -> Result<ExitStatus, RunError> {
    let Some(limit) = time_limit else {
        return Ok(child.wait()?);
    };

    match child.wait_timeout(limit)? {
        Some(exit_status) => Ok(exit_status),
        None => {
            child.kill()?;
            child.wait()?;
            Err(RunError::TimedOut(limit))
        }
    }
}

/// The program's exit code, or the negated signal number when a signal
/// ended it
fn exit_code(exit_status: ExitStatus) -> Result<i32, RunError> {
    if let Some(code) = exit_status.code() {
        return Ok(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = exit_status.signal() {
            return Ok(-signal);
        }
    }

    Err(RunError::MissingExitCode)
}

fn spawn_reader<T>(mut pipe: T) -> JoinHandle<io::Result<Vec<u8>>>
where
    T: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf: Vec<u8> = vec![];
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn spawn_writer<T>(content: Vec<u8>, mut pipe: T) -> JoinHandle<io::Result<()>>
where
    T: Write + Send + 'static,
{
    thread::spawn(move || match pipe.write_all(&content) {
        // The program may exit without reading all of its input
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    })
}

fn join<T>(handle: JoinHandle<io::Result<T>>) -> io::Result<T> {
    handle
        .join()
        .map_err(|_panic| io::Error::other("pipe thread panicked"))?
}

fn decode(buf: Option<Vec<u8>>) -> Result<String, RunError> {
    String::from_utf8(buf.unwrap_or_default()).map_err(|_err| RunError::FailedToDecodeUtf8)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn test_exit_code_of_normal_exit() {
        // Raw wait status: exit code in the high byte
        let exit_status = ExitStatus::from_raw(2 << 8);

        assert_eq!(exit_code(exit_status).unwrap(), 2);
    }

    #[test]
    fn test_exit_code_of_killed_program_is_negative_signal() {
        let exit_status = ExitStatus::from_raw(9);

        assert_eq!(exit_code(exit_status).unwrap(), -9);
    }
}
