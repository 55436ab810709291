pub mod domain;
pub mod error;
pub mod signal;

pub use signal::{Signal, Subscription};
