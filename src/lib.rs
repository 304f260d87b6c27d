pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod view;

pub use client::SummaryClient;
pub use config::Config;
pub use controller::{Completion, ResponseOrdering, SummaryRequestController};
pub use error::{Result, SummarizeError};
pub use view::{Status, SummaryView, TerminalView};
