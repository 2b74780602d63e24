#![forbid(unsafe_code)]

pub mod clip_pool;
pub mod error;
pub mod model;
pub mod time;

pub use clip_pool::{ClipPool, ClipPoolError};
pub use error::Error;
pub use time::Clock;
