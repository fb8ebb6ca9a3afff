pub mod client_fetch;
pub mod page_renderer;
pub mod route_cache;
pub mod time_source;

pub use client_fetch::{ClientFetch, ClientState};
pub use page_renderer::{PageRenderer, RenderOutcome};
pub use route_cache::{CacheStatus, RouteCache};
pub use time_source::{produce_sample, HttpTimeSource, LocalTimeSource, TimeSource};
