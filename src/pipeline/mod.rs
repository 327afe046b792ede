//! Pipeline entry points.
//!
//! - `CompetitionCrawler`: walk one competition's pages into a history
//! - `run_crawler`: crawl a list of competitions and persist each one

pub mod crawl;
mod history;

pub use crawl::run_crawler;
pub use history::CompetitionCrawler;
