//! Fluent, driver-aware SQL statement builders.
//!
//! [`Select`], [`Insert`], [`Update`] and [`Delete`] assemble SQL text with
//! named and inline placeholders. Values bound along the way are collected in
//! a per-statement [`Bind`] registry whose generated keys stay unique across
//! statements sharing a [`BindCounter`], so sub-selects can be embedded with
//! their values.

#[macro_use]
mod macros;

pub mod bind;
pub mod clause;
pub mod condition;
pub mod delete;
pub mod dialect;
pub mod error;
pub mod insert;
pub mod paging;
pub mod select;
pub mod update;
pub mod value;

pub use bind::{Bind, BindCounter, BindMap, Embedded, Inline};
pub use clause::Source;
pub use condition::Equals;
pub use delete::Delete;
pub use dialect::Dialect;
pub use error::{Result, StatementError};
pub use insert::{Column, Insert};
pub use paging::DEFAULT_PER_PAGE;
pub use select::Select;
pub use update::Update;
pub use value::{Param, ParamType, Value};
