//! Token sources feeding the engine's decoder loop.

mod wedge;

pub use wedge::{wedge_channel, Delivery, WedgeSender, WedgeTokenSource};
