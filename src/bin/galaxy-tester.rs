use fixture_tester::cli;
use fixture_tester::variant::ProjectVariant;
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::main(ProjectVariant::galaxy())
}
