//! SeaORM entities mirroring the domain model.

pub mod group;
pub mod post;
pub mod user;
