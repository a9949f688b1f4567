//! Trait definitions for RankVectors operations.
//!
//! Each entity type implements the traits it supports, keeping the
//! endpoint paths and envelope shapes inside the implementations.

mod get;
mod list;
mod update;

pub use get::Get;
pub use list::List;
pub use update::Update;
