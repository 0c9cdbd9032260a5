use crate::filters;
use crate::test_case::ProcessOutput;
use crate::test_id::TestId;
use crate::test_result::{FailureReason, Verdict};
use crate::variant::ProjectVariant;
use std::fs;
use std::io;

/// Decide whether `output` is what the golden files of `id` describe
///
/// Tests with an `.err` file must fail with the recorded (redacted) error
/// output. All others must exit with 0 and print the expected lines.
pub fn judge(variant: &ProjectVariant, id: &TestId, output: &ProcessOutput) -> io::Result<Verdict> {
    if let Some(err_file) = variant.expected_stderr_file(id) {
        if output.exit_code == 0 {
            return Ok(Verdict::Fail(FailureReason::ErrorNotDetected));
        }

        let expected = filters::unwindow(&fs::read_to_string(err_file)?);
        let got = filters::redact_errors(&output.stderr);

        return if got == expected {
            Ok(Verdict::Pass)
        } else {
            Ok(Verdict::Fail(FailureReason::ErrorOutputMismatch { expected, got }))
        };
    }

    if output.exit_code != 0 {
        return Ok(Verdict::Fail(FailureReason::ExecutionError {
            exit_code: output.exit_code,
            stderr: output.stderr.clone(),
        }));
    }

    let expected_stdout = fs::read_to_string(variant.expected_stdout_file(id))?;
    let expected = variant.compare.lines(&expected_stdout);
    let got = variant.compare.lines(&output.stdout);

    if expected == got {
        Ok(Verdict::Pass)
    } else {
        Ok(Verdict::Fail(FailureReason::WrongOutput {
            message: variant.compare.mismatch_message(),
            expected,
            got,
        }))
    }
}
