pub mod fetcher;
pub mod web;

pub use fetcher::PageFetcher;
pub use web::WebFetcher;
