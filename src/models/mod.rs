pub mod config;
pub mod page;
pub mod strategy;
pub mod time_sample;

pub use config::AppConfig;
pub use page::PageRender;
pub use strategy::{CachePolicy, Strategy};
pub use time_sample::{iso_timestamp, now_iso, TimeSample, RANDOM_BOUND, SAMPLE_MESSAGE};
