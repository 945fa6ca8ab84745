pub mod client;
pub mod models;

pub use client::NasdaqClient;
pub use models::{FetchError, QuotePoint};
