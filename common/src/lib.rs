//! Shared models for the external-IDE integration.
//!
//! This crate contains pure data structures passed between the editor host
//! and the `ide-core` subsystem. Models have no business logic - they're
//! just data that can be passed between layers.
//!
//! ## Architecture
//!
//! - **common** (this crate): Pure data structures
//! - **ide-core**: Messaging server, launch strategies and the IDE manager
//!
//! Keeping the models separate means the host application can name editors
//! and report errors without pulling in the tokio-based core.

pub mod error;
pub mod external_editor;

pub use error::error_location::ErrorLocation;
pub use external_editor::ExternalEditorId;
