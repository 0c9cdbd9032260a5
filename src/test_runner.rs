use crate::config::OutputFormat;
use crate::formats::tree::Node;
use crate::formats::{tap, tree};
use crate::test_case::{self, ProgramCommand, RunError};
use crate::test_id::TestId;
use crate::test_result::Verdict;
use crate::utils::file;
use crate::variant::ProjectVariant;
use crate::verdict;
use colored::Colorize;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct ReportConfig {
    pub number_of_tests: usize,
    pub format: OutputFormat,
    /// How many failures to describe in detail, all of them when `None`
    pub show: Option<usize>,
    pub char_limit: Option<usize>,
    pub current_dir: PathBuf,
}

impl ReportConfig {
    fn display_id(&self, test_id: &TestId) -> String {
        file::display_path(test_id.path(), &self.current_dir)
    }
}

pub struct RunResult {
    pub test_id: TestId,
    pub result: Result<Verdict, RunError>,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        match &self.result {
            Ok(verdict) => verdict.is_success(),
            Err(_) => false,
        }
    }
}

// RUN TEST CASES

/// Run every test and report on stdout; `true` when all of them passed
pub fn test_all(
    report_config: &ReportConfig,
    variant: &ProjectVariant,
    command: &ProgramCommand,
    test_ids: &[TestId],
    run_in_parallel: bool,
) -> bool {
    let run_results = run_test_cases(report_config, variant, command, test_ids, run_in_parallel);
    run_results.iter().all(RunResult::is_success)
}

pub fn run_test_cases(
    report_config: &ReportConfig,
    variant: &ProjectVariant,
    command: &ProgramCommand,
    test_ids: &[TestId],
    run_in_parallel: bool,
) -> Vec<RunResult> {
    let run = |test_id: &TestId| -> RunResult {
        let result = run_test(variant, command, &test_id.absolute(&report_config.current_dir));

        if let Err(err) = &result {
            warn!(test = %test_id, error = %err, "failed to run test");
        }

        RunResult {
            test_id: test_id.clone(),
            result,
        }
    };

    info!(
        variant = variant.name,
        number_of_tests = test_ids.len(),
        parallel = run_in_parallel,
        "running tests"
    );
    report_start(report_config);

    // Parallel results are reported once all are in, so lines keep input order
    let run_results: Vec<RunResult> = if run_in_parallel {
        let run_results: Vec<RunResult> = test_ids.par_iter().map(run).collect();
        for (i, run_result) in run_results.iter().enumerate() {
            report_test_case(report_config, i, run_result);
        }
        run_results
    } else {
        test_ids
            .iter()
            .enumerate()
            .map(|(i, test_id)| {
                let run_result = run(test_id);
                report_test_case(report_config, i, &run_result);
                run_result
            })
            .collect()
    };

    report_summary(report_config, &run_results);

    run_results
}

fn run_test(
    variant: &ProjectVariant,
    command: &ProgramCommand,
    test_id: &TestId,
) -> Result<Verdict, RunError> {
    let test_case = variant.test_case(test_id, command)?;
    let output = test_case::run(&test_case)?;
    Ok(verdict::judge(variant, test_id, &output)?)
}

// REPORTING

fn report_start(report_config: &ReportConfig) {
    match report_config.format {
        OutputFormat::Summary => {
            summary_print_start(report_config.number_of_tests);
        }
        OutputFormat::Tap => {
            tap_print_start(report_config.number_of_tests);
        }
    }
}

fn report_test_case(report_config: &ReportConfig, index: usize, run_result: &RunResult) {
    match report_config.format {
        OutputFormat::Summary => {
            summary_print_test_case(&run_result.result);
        }
        OutputFormat::Tap => {
            let test_number_indent_level = report_config.number_of_tests.to_string().len();
            let message = report_config.display_id(&run_result.test_id);
            tap_print_test_case(
                index + 1,
                &message,
                &run_result.result,
                test_number_indent_level,
            );
        }
    }
}

fn report_summary(report_config: &ReportConfig, run_results: &[RunResult]) {
    match report_config.format {
        OutputFormat::Summary => {
            summary_print_summary(report_config, run_results);
        }
        OutputFormat::Tap => {}
    }
}

// SUMMARY HELPERS

fn summary_print_start(number_of_tests: usize) {
    println!("Running {} tests:", number_of_tests)
}

fn summary_print_test_case(result: &Result<Verdict, RunError>) {
    match result {
        Ok(verdict) if verdict.is_success() => print!("{}", ".".green()),
        _ => print!("{}", "F".red()),
    }
}

fn summary_print_summary(report_config: &ReportConfig, run_results: &[RunResult]) {
    println!(); // Add newline to dots

    let failures: Vec<&RunResult> = run_results.iter().filter(|r| !r.is_success()).collect();
    let shown = report_config.show.unwrap_or(failures.len()).min(failures.len());

    if shown > 0 {
        println!();
    }
    for run_result in &failures[..shown] {
        summary_print_failure(report_config, run_result);
    }
    if shown < failures.len() {
        println!("({} more failed tests not shown)", failures.len() - shown);
    }

    let number_of_failed_tests = failures.len();
    let number_of_passed_tests = run_results.len() - number_of_failed_tests;

    let status = if number_of_failed_tests == 0 {
        "OK".green()
    } else {
        "FAIL".red()
    };

    println!();
    println!(
        "Test result: {} ({} passed, {} failed)",
        status, number_of_passed_tests, number_of_failed_tests,
    );
}

fn summary_print_failure(report_config: &ReportConfig, run_result: &RunResult) {
    let header = format!("❌ {}", report_config.display_id(&run_result.test_id));

    match &run_result.result {
        Ok(Verdict::Fail(reason)) => {
            let tree = Node(
                header,
                tree::tree_from_failure(reason, report_config.char_limit),
            );
            let content =
                tree::draw_tree(&tree).unwrap_or_else(|_| String::from("Failed to draw tree\n"));
            print!("{}", content);
        }
        Ok(Verdict::Pass) => {}
        Err(err) => {
            println!("{}", header);
            println!("Failed to run test: {}", err);
        }
    }
}

// TAP HELPERS

fn tap_print_start(number_of_tests: usize) {
    tap::print_version();
    tap::print_plan(1, number_of_tests);
}

fn tap_print_test_case(
    test_number: usize,
    message: &str,
    result: &Result<Verdict, RunError>,
    indent_level: usize,
) {
    match result {
        Ok(Verdict::Pass) => tap::print_ok(test_number, message, indent_level),
        Ok(Verdict::Fail(reason)) => {
            let diagnostics = format!("message: \"{}\"\n", reason);
            tap::print_not_ok(test_number, message, &diagnostics, indent_level)
        }
        Err(err) => {
            let diagnostics = format!("message: \"Failed to run test: {}\"\n", err);
            tap::print_not_ok(test_number, message, &diagnostics, indent_level)
        }
    }
}
