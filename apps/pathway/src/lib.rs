//! Career recommendation engine: scores a catalog of career paths against an
//! assessment profile, and keeps learning progress and assessment history.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod matching;
pub mod models;
pub mod state;
pub mod storage;
