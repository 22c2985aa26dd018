#![forbid(unsafe_code)]

mod fold;
mod ids;
mod kind;
mod model;
mod tags;

pub use fold::*;
pub use ids::*;
pub use kind::*;
pub use model::*;
pub use tags::*;
