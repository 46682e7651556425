use crate::schema::{CaseFailure, CaseResult, CaseStatus};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A named collection of executable test cases.
///
/// This is the capability a harness expects from a resolved suite.
/// Implementors only enumerate their cases; execution, panic containment and
/// reporting are handled by [`crate::SuiteHandle`].
///
/// `tests` is re-invoked for every enumeration or run, so implementations
/// must not assume a single call.
pub trait Suite: Send + Sync {
    fn tests(&self) -> Vec<TestCase>;
}

type CaseFn = dyn Fn() -> Result<(), CaseFailure> + Send + Sync;

/// A single executable case inside a [`Suite`].
pub struct TestCase {
    id: String,
    body: CaseBody,
}

enum CaseBody {
    Runnable(Box<CaseFn>),
    Ignored,
}

impl TestCase {
    pub fn new(
        id: impl Into<String>,
        run: impl Fn() -> Result<(), CaseFailure> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            body: CaseBody::Runnable(Box::new(run)),
        }
    }

    /// A case that is reported as skipped without executing.
    pub fn ignored(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: CaseBody::Ignored,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self.body, CaseBody::Ignored)
    }

    /// Execute the case, converting panics into failures so a single case
    /// cannot unwind out of a suite run.
    pub(crate) fn execute(self) -> CaseResult {
        let run = match self.body {
            CaseBody::Ignored => {
                return CaseResult {
                    id: self.id,
                    status: CaseStatus::Skipped,
                    failure: None,
                }
            }
            CaseBody::Runnable(run) => run,
        };

        let (status, failure) = match catch_unwind(AssertUnwindSafe(|| run())) {
            Ok(Ok(())) => (CaseStatus::Passed, None),
            Ok(Err(failure)) => (CaseStatus::Failed, Some(failure)),
            Err(payload) => (
                CaseStatus::Failed,
                Some(CaseFailure::with_kind(panic_message(&payload), "panic")),
            ),
        };

        CaseResult {
            id: self.id,
            status,
            failure,
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("id", &self.id)
            .field("ignored", &self.is_ignored())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "case panicked".to_string()
    }
}
