//! Extraction layer.
//!
//! This module contains the page readers:
//! - Season index and results tab links (`SeasonIndexReader`)
//! - Season standings (`StandingsExtractor`)
//! - Results grouped by tour (`FixturesExtractor`)
//! - Top-four history (`TopNExtractor`)
//!
//! All readers are pure functions of a parsed document; fetching lives in
//! `utils::http` and orchestration in `pipeline`.

pub mod document;
mod fixtures;
mod index;
pub mod probe;
mod standings;
mod top_n;

pub use fixtures::FixturesExtractor;
pub use index::{SeasonIndexReader, SeasonLink};
pub use standings::StandingsExtractor;
pub use top_n::TopNExtractor;
