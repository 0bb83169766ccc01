//! External editor launch strategies, one per supported IDE family.
//!
//! Each strategy implements "ensure the editor is running and focused on
//! file:line:column". MonoDevelop and Visual Studio for Mac coordinate
//! through the messaging server; the rest are one-shot command lines.
//!
//! Dispatch is a tagged enum keyed by [`ExternalEditorId`]; the IDE
//! manager keeps at most one strategy alive and replaces it when the
//! configured editor changes.

pub(crate) mod ipc_launch;

pub mod custom;
pub mod mono_develop;
pub mod rider;
pub mod visual_studio;
pub mod visual_studio_mac;
pub mod vscode;

use crate::config::IdeConfig;
use crate::error::launch::LaunchError;
use crate::ipc::MessagingServer;

use common::{ErrorLocation, ExternalEditorId};

use std::panic::Location;
use std::sync::Arc;

/// Collaborators a strategy needs for one launch: the messaging server to
/// coordinate through and the project configuration for path resolution.
pub struct LaunchContext<'a> {
    pub server: &'a Arc<MessagingServer>,
    pub config: &'a IdeConfig,
}

/// The active launch strategy. One variant per IDE family.
#[derive(Debug)]
pub enum EditorStrategy {
    MonoDevelop(mono_develop::MonoDevelopEditor),
    VisualStudioForMac(visual_studio_mac::VisualStudioMacEditor),
    VisualStudio(visual_studio::VisualStudioEditor),
    VsCode(vscode::VsCodeEditor),
    Rider(rider::RiderEditor),
    Custom(custom::CustomEditor),
}

impl EditorStrategy {
    /// Build the strategy for `editor_id`, rejecting platform-restricted
    /// editors on the wrong OS before anything touches the filesystem.
    ///
    /// `ExternalEditorId::None` has no strategy; the caller handles it as
    /// "fall back to the built-in editor".
    pub(crate) fn create(editor_id: ExternalEditorId) -> Result<Self, LaunchError> {
        match editor_id {
            ExternalEditorId::VisualStudio if !cfg!(windows) => {
                Err(LaunchError::UnsupportedPlatform {
                    message: "Visual Studio not supported on this platform".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            ExternalEditorId::VisualStudioForMac if !cfg!(target_os = "macos") => {
                Err(LaunchError::UnsupportedPlatform {
                    message: "Visual Studio for Mac not supported on this platform".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            ExternalEditorId::VisualStudio => Ok(EditorStrategy::VisualStudio(
                visual_studio::VisualStudioEditor::new(),
            )),
            ExternalEditorId::VisualStudioForMac => Ok(EditorStrategy::VisualStudioForMac(
                visual_studio_mac::VisualStudioMacEditor::new(),
            )),
            ExternalEditorId::MonoDevelop => Ok(EditorStrategy::MonoDevelop(
                mono_develop::MonoDevelopEditor::new(),
            )),
            ExternalEditorId::VsCode => Ok(EditorStrategy::VsCode(vscode::VsCodeEditor::new())),
            ExternalEditorId::Rider => Ok(EditorStrategy::Rider(rider::RiderEditor::new())),
            ExternalEditorId::CustomEditor => {
                Ok(EditorStrategy::Custom(custom::CustomEditor::new()))
            }
            ExternalEditorId::None => Err(LaunchError::Launch {
                message: "No strategy exists for ExternalEditorId::None".to_string(),
                location: ErrorLocation::from(Location::caller()),
                source: "unreachable editor id".into(),
            }),
        }
    }

    /// Which editor this strategy drives; the manager uses it to decide
    /// whether the current strategy can be reused.
    pub fn editor_id(&self) -> ExternalEditorId {
        match self {
            EditorStrategy::MonoDevelop(_) => ExternalEditorId::MonoDevelop,
            EditorStrategy::VisualStudioForMac(_) => ExternalEditorId::VisualStudioForMac,
            EditorStrategy::VisualStudio(_) => ExternalEditorId::VisualStudio,
            EditorStrategy::VsCode(_) => ExternalEditorId::VsCode,
            EditorStrategy::Rider(_) => ExternalEditorId::Rider,
            EditorStrategy::Custom(_) => ExternalEditorId::CustomEditor,
        }
    }

    /// Open `script_path` at the 0-based `line`/`column` in this editor.
    pub(crate) fn launch(
        &mut self,
        ctx: &LaunchContext<'_>,
        script_path: &str,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Result<(), LaunchError> {
        match self {
            EditorStrategy::MonoDevelop(editor) => editor.launch(ctx, script_path, line, column),
            EditorStrategy::VisualStudioForMac(editor) => {
                editor.launch(ctx, script_path, line, column)
            }
            EditorStrategy::VisualStudio(editor) => editor.launch(ctx, script_path, line, column),
            EditorStrategy::VsCode(editor) => editor.launch(ctx, script_path, line, column),
            EditorStrategy::Rider(editor) => editor.launch(ctx, script_path, line, column),
            EditorStrategy::Custom(editor) => editor.launch(ctx, script_path, line, column),
        }
    }
}
