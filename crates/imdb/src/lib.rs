mod client;
mod error;
pub mod models;
pub mod parse;

pub use client::ImdbClient;
pub use error::{ImdbError, ParseError};
pub use models::{Media, MediaType};

pub type Result<T> = std::result::Result<T, ImdbError>;
