//! prereview - static checks for the files your branch touches
//!
//! Resolves the files changed since the merge point with a base git
//! reference, runs a fixed catalogue of line-level, structural, and import
//! checks over every eligible TypeScript/JavaScript file, and renders a
//! deterministic review report. Nothing is executed; all checks are either
//! textual or tree-sitter based.

pub mod cli;
pub mod detectors;
pub mod git;
pub mod models;
pub mod reporters;
pub mod rules;
