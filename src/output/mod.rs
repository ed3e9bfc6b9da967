//! Output module for presenting search results
//!
//! This module handles:
//! - Rendering match tables for the console
//! - Formatting scores, prices, and extended record fields

mod table;

pub use table::{print_matches, render_matches};
