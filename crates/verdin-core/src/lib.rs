//! Core types for the Verdin harness: the suite capability, executable
//! cases, and the reporting schema shared with harness front-ends.
//!
//! A suite is anything implementing [`Suite`]: a collection of executable
//! [`TestCase`]s. Resolution (see `verdin-registry`) produces a
//! [`SuiteHandle`], which a harness uses to enumerate case ids or execute
//! the suite. Reports use a stable JSON schema carrying a `schemaVersion`
//! field to allow additive evolution without breaking consumers:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "suite": "smoke",
//!   "success": false,
//!   "cases": [
//!     { "id": "adds", "status": "passed" },
//!     { "id": "divides", "status": "failed", "failure": { "message": "boom" } },
//!     { "id": "slow", "status": "skipped" }
//!   ],
//!   "summary": { "total": 3, "passed": 1, "failed": 1, "skipped": 1 }
//! }
//! ```

pub mod handle;
pub mod schema;
pub mod suite;

pub use handle::SuiteHandle;
pub use schema::SCHEMA_VERSION;
pub use suite::{Suite, TestCase};
