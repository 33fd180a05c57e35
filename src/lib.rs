//! # hfrdup
//!
//! Find and remove duplicate files by content hash.
//!
//! Files are fingerprinted with SHA-256 and grouped by fingerprint. On top
//! of that sit five modes:
//!
//! - **find**: write a log of every duplicate group, with the earliest
//!   created file marked as the original
//! - **del**: delete every `DUPLICATE` listed in such a log
//! - **del_folder**: delete repeats within each directory
//! - **del_global**: delete repeats across the whole tree
//! - **del_ref**: delete files in a target tree that already exist in a
//!   read-only source tree

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod duplicates;
pub mod logging;
pub mod scanner;
