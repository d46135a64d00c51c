//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `blockfall::{core,input,journal,term,types}`.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_journal as journal;
pub use blockfall_term as term;
pub use blockfall_types as types;
