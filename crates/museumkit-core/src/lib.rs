//! # MuseumKit Core
//!
//! Core types and utilities for MuseumKit.
//! Provides the floor plan data model, grid/meter unit helpers and the
//! error hierarchy shared by the editing engine.

pub mod data;
pub mod error;
pub mod units;

pub use data::{
    check_floors, Artwork, Bounds, Door, ElementId, ElementType, Floor, LinkDirection, LinkKind, PlanDocument,
    Point, Room, VerticalLink, Wall,
};

pub use error::{Error, InvariantViolation, ModelError, Result};
