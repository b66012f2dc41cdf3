pub mod cli;
pub mod feeds;
pub mod page;
pub mod router;
pub mod state;
pub mod store;

mod error;

pub use error::Error;
