use crate::cli::output::*;
use crate::core::selftest::run_self_test;

/// Returns an error when any check fails so `main` exits non-zero.
pub fn run() -> anyhow::Result<()> {
    let report = run_self_test();

    for check in &report.checks {
        if check.passed {
            success(&format!("{}: passed", check.name));
        } else {
            error(&format!("{}: failed ({})", check.name, check.detail));
        }
    }

    if !report.passed() {
        let failed: Vec<&str> = report
            .checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name)
            .collect();
        return Err(crate::PepdbError::SelfTest(failed.join(", ")).into());
    }
    Ok(())
}
