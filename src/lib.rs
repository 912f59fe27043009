//! Tournament brackets as position-keyed binary trees.
//!
//! A [`Bracket`] stores seats in binary-search order over their position and
//! records the depth each seat was inserted at. [`PositionalRelation`] turns
//! "winners side", "losers side" and "round" into depth arithmetic over that
//! tree. Bracket shapes come from a [`TemplateProvider`], either the compiled-in
//! catalog or a directory of JSON templates.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;

pub use application::services::BracketService;
pub use application::{ApplicationError, ApplicationResult};
pub use config::Settings;
pub use domain::{
    payload, Bracket, BracketTreeConvert, Depth, Format, Node, NodeId, Payload, Position,
    PositionalRelation, Seat, SeatDescriptor, Side,
};
pub use infrastructure::{
    BuiltinTemplates, DirectoryTemplates, InfraError, InfraResult, TemplateProvider,
};
