//! Domain models for the Crop Recommendation Platform

mod crop;
mod dashboard;
mod recommendation;
mod soil;
mod user;
mod weather;

pub use crop::*;
pub use dashboard::*;
pub use recommendation::*;
pub use soil::*;
pub use user::*;
pub use weather::*;
