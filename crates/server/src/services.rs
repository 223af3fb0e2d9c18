pub mod refresh;

pub use refresh::{RefreshError, RefreshJob};
