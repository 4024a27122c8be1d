//! # MuseumKit
//!
//! Floor-plan editing engine for museum buildings. It checks that rooms,
//! walls, doors, artworks and vertical links placed on each floor stay
//! geometrically consistent, works out what a deletion drags along with
//! it, and keeps a bounded undo/redo history.
//!
//! ## Architecture
//!
//! MuseumKit is organized as a workspace with multiple crates:
//!
//! 1. **museumkit-core** - Plan data model, identifiers, units and errors
//! 2. **museumkit-settings** - Grid, constraint, history and view configuration
//! 3. **museumkit-editor** - Geometry, validation, cascade deletion, history
//!    and the editor state store
//! 4. **museumkit** - This crate: re-exports plus a small plan checking binary

// Re-export modules for main.rs
pub use museumkit_core::data;
pub use museumkit_editor as editor;
pub use museumkit_settings as settings;

pub use museumkit_core::{
    Artwork, Door, ElementId, ElementType, Floor, InvariantViolation, LinkDirection, LinkKind,
    ModelError, PlanDocument, Point, Room, VerticalLink, Wall,
};

pub use museumkit_editor::{
    analyze_deletion_plan, commit_deletion, validate_element, DeletionPlan, DeletionResult,
    EditorError, EditorResult, EditorState, History, Severity, Snapshot, StateUpdate, Tool,
    ValidationCode, ValidationContext, ValidationResult,
};

pub use museumkit_settings::{EditorConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
