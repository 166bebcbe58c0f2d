mod config;
mod error;
mod fetch;
mod parse;

pub use config::FetchConfig;
pub use error::{FetchError, ParseError};
pub use fetch::fetch_listing;
pub use parse::{parse_listing, SiteRow};
