pub mod cli;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod storage;

#[cfg(feature = "tui")]
pub mod tui;
