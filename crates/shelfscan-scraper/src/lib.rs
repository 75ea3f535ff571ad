pub mod client;
pub mod error;
pub mod extract;
pub mod proxy;
mod retry;

pub use client::SearchClient;
pub use error::ScraperError;
pub use extract::extract_products;
