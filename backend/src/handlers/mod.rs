//! HTTP request handlers

pub mod crop;
pub mod dashboard;
pub mod health;
pub mod recommendation;
pub mod soil;
pub mod weather;

pub use crop::*;
pub use dashboard::*;
pub use health::*;
pub use recommendation::*;
pub use soil::*;
pub use weather::*;
