//! Domain layer: the bracket tree and its queries
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod bracket;
pub mod entities;
pub mod relation;
pub mod render;

pub use bracket::{Bracket, Depth, InOrderIter, Node, NodeId, TopDownIter};
pub use entities::{payload, BracketTemplate, Format, Payload, Position, Seat, SeatDescriptor};
pub use relation::{PositionalRelation, Side};
pub use render::BracketTreeConvert;
