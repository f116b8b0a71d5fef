/// Built-in sanity checks run by `pepdb selftest`
use crate::bio::seguid::seguid;
use crate::storage::PeptideDatabase;

const SEGUID_INPUT: &str = "XCHGASCHTHASGCJHGJHJASCTASYCJASHHJASJHSAGDJHADATSF";
const SEGUID_EXPECTED: &str = "HlN4r5GDkBSYh4TcCDqGzb7ZOZ8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct SelfTestReport {
    pub checks: Vec<CheckResult>,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

fn check_database() -> CheckResult {
    let result = PeptideDatabase::open_in_memory().and_then(|db| db.table_counts());
    match result {
        Ok(counts) if counts.tax_node == 1 => CheckResult {
            name: "database",
            passed: true,
            detail: "schema created in memory".to_string(),
        },
        Ok(counts) => CheckResult {
            name: "database",
            passed: false,
            detail: format!("expected only the root node, found {}", counts.tax_node),
        },
        Err(e) => CheckResult {
            name: "database",
            passed: false,
            detail: e.to_string(),
        },
    }
}

fn check_seguid() -> CheckResult {
    let actual = seguid(SEGUID_INPUT);
    CheckResult {
        name: "seguid",
        passed: actual == SEGUID_EXPECTED,
        detail: actual,
    }
}

pub fn run_self_test() -> SelfTestReport {
    let checks = vec![check_database(), check_seguid()];
    for check in &checks {
        if check.passed {
            tracing::info!("[selftest] {}: passed", check.name);
        } else {
            tracing::error!("[selftest] {}: failed ({})", check.name, check.detail);
        }
    }
    SelfTestReport { checks }
}
