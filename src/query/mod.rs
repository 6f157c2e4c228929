//! Query engines for build event streams.
//!
//! A `QueryExecutor` evaluates one catalogue `Query` against an input stream
//! bound at construction time. Two engines are provided:
//! - `NativeExecutor`: in-process structural matching over parsed events
//! - `JqExecutor`: shells out to a `jq` binary with the query's filter program
//!
//! `StubExecutor` returns canned outputs and is used to test extraction
//! without any input file.

pub mod jq;
pub mod native;
pub mod stub;
pub mod traits;

// Re-export key types
pub use jq::JqExecutor;
pub use native::NativeExecutor;
pub use stub::StubExecutor;
pub use traits::{Query, QueryExecutor, Selector};
