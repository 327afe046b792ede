// src/lib.rs

//! Soccer history extractor library.
//!
//! Reads competition histories (standings, results by tour, podiums) from
//! soccer365.ru pages and hands them to a storage backend.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
