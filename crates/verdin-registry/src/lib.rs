//! Suite registration and resolution for the Verdin harness.
//!
//! A [`SuiteRegistry`] maps suite identifiers to constructors registered at
//! startup. Registration requires the suite capability as a trait bound, so
//! every entry a lookup can return constructs into a usable suite; there is
//! no runtime shape check. Resolution reads the configured identifier
//! (`verdin-config`) at call time and fails with a typed [`ResolveError`],
//! letting a harness distinguish an unconfigured run from a misconfigured
//! one. [`SuiteRegistry::resolve_configured_or_empty`] is the tolerant
//! bootstrap variant: it logs the failure and resolves to no suite at all.
//!
//! ```
//! use verdin_core::{Suite, TestCase};
//! use verdin_registry::SuiteRegistry;
//!
//! #[derive(Default)]
//! struct SmokeSuite;
//!
//! impl Suite for SmokeSuite {
//!     fn tests(&self) -> Vec<TestCase> {
//!         vec![TestCase::new("adds", || Ok(()))]
//!     }
//! }
//!
//! let mut registry = SuiteRegistry::new();
//! registry.register::<SmokeSuite>("smoke").unwrap();
//!
//! let handle = registry.resolve("smoke").unwrap();
//! assert!(handle.run().success);
//! ```

mod error;
mod registry;

pub use error::{RegisterError, ResolveError, SuiteInitError};
pub use registry::SuiteRegistry;
