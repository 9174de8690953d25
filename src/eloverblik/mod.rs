mod client;
mod collector;
mod fetcher;
mod timestamp;
mod token;

pub use client::Client;
pub use collector::SampleCollector;
pub use fetcher::EnergyDataFetcher;
pub use token::{FileTokenStore, TokenManager, TokenStore};
