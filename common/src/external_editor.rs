//! Identifier for the external editor configured by the user.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FormatResult};

/// Which external code editor the user has configured.
///
/// `None` means no external editor is configured; callers are expected to
/// fall back to the built-in script editor when they see it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExternalEditorId {
    None,
    VisualStudio,
    VisualStudioForMac,
    MonoDevelop,
    VsCode,
    Rider,
    CustomEditor,
}

impl Default for ExternalEditorId {
    fn default() -> Self {
        ExternalEditorId::None
    }
}

impl Display for ExternalEditorId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        let name = match self {
            ExternalEditorId::None => "None",
            ExternalEditorId::VisualStudio => "Visual Studio",
            ExternalEditorId::VisualStudioForMac => "Visual Studio for Mac",
            ExternalEditorId::MonoDevelop => "MonoDevelop",
            ExternalEditorId::VsCode => "VSCode",
            ExternalEditorId::Rider => "JetBrains Rider",
            ExternalEditorId::CustomEditor => "Custom Editor",
        };
        write!(formatter, "{name}")
    }
}
