use crate::schema::{CaseResult, CaseStatus, RunSummary, SuiteReport, SCHEMA_VERSION};
use crate::suite::Suite;
use std::fmt;

/// An executable handle to a resolved suite.
///
/// The handle owns the suite instance and the identifier it was resolved
/// under. It is the only value a harness needs: [`SuiteHandle::case_ids`]
/// enumerates the cases and [`SuiteHandle::run`] executes them.
pub struct SuiteHandle {
    name: String,
    suite: Box<dyn Suite>,
}

impl SuiteHandle {
    pub fn new(name: impl Into<String>, suite: Box<dyn Suite>) -> Self {
        Self {
            name: name.into(),
            suite,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enumerate case identifiers without executing anything.
    pub fn case_ids(&self) -> Vec<String> {
        self.suite
            .tests()
            .iter()
            .map(|case| case.id().to_string())
            .collect()
    }

    /// Execute every case and produce a report.
    ///
    /// Each call re-enumerates the suite's cases; nothing is cached between
    /// runs. Results are sorted by case id so report output is stable across
    /// enumeration orders.
    pub fn run(&self) -> SuiteReport {
        let mut cases: Vec<CaseResult> = self
            .suite
            .tests()
            .into_iter()
            .map(|case| case.execute())
            .collect();
        cases.sort_by(|a, b| a.id.cmp(&b.id));

        let summary = summarize(&cases);

        SuiteReport {
            schema_version: SCHEMA_VERSION,
            suite: self.name.clone(),
            success: summary.failed == 0,
            cases,
            summary,
        }
    }
}

impl fmt::Debug for SuiteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn summarize(cases: &[CaseResult]) -> RunSummary {
    let mut summary = RunSummary::default();
    summary.total = cases.len() as u32;
    for case in cases {
        match case.status {
            CaseStatus::Passed => summary.passed += 1,
            CaseStatus::Failed => summary.failed += 1,
            CaseStatus::Skipped => summary.skipped += 1,
        }
    }
    summary
}
