// Tests for strategy construction and platform gating.

use crate::editors::EditorStrategy;
use crate::error::launch::LaunchError;

use common::ExternalEditorId;

/// **VALUE**: Verifies that each constructible strategy reports the editor id
/// it was built for.
///
/// **WHY THIS MATTERS**: The manager compares this id against the configured
/// editor to decide between reusing and replacing the strategy; a mismatch
/// rebuilds the strategy on every request and drops process handles.
///
/// **BUG THIS CATCHES**: Would catch a copy-paste error in the enum dispatch
/// pairing a variant with the wrong id.
#[test]
fn given_created_strategy_then_editor_id_round_trips() {
    let ids = [
        ExternalEditorId::MonoDevelop,
        ExternalEditorId::VsCode,
        ExternalEditorId::Rider,
        ExternalEditorId::CustomEditor,
    ];

    for id in ids {
        let strategy = EditorStrategy::create(id).expect("platform-independent editor");
        assert_eq!(strategy.editor_id(), id);
    }
}

/// **VALUE**: Verifies that `None` never yields a strategy.
///
/// **WHY THIS MATTERS**: `None` means "use the built-in editor"; reaching
/// strategy creation with it is a caller bug that must fail loudly rather
/// than launch something arbitrary.
///
/// **BUG THIS CATCHES**: Would catch a catch-all arm in `create` mapping
/// `None` to a default editor.
#[test]
fn given_none_editor_id_then_no_strategy() {
    assert!(EditorStrategy::create(ExternalEditorId::None).is_err());
}

/// **VALUE**: Verifies that Visual Studio is rejected at construction off
/// Windows.
///
/// **WHY THIS MATTERS**: The gate runs before any filesystem access, so the
/// user gets "unsupported platform" instead of a misleading "opener not
/// found".
///
/// **BUG THIS CATCHES**: Would catch the platform check being moved after the
/// opener lookup.
#[cfg(not(windows))]
#[test]
fn given_visual_studio_off_windows_then_unsupported_platform() {
    let err = EditorStrategy::create(ExternalEditorId::VisualStudio)
        .expect_err("must be rejected off windows");

    assert!(matches!(err, LaunchError::UnsupportedPlatform { .. }));
}

/// **VALUE**: Verifies that Visual Studio for Mac is rejected at construction
/// off macOS.
///
/// **WHY THIS MATTERS**: Same early-gate contract as Visual Studio; the
/// messaging-server machinery must never spin up for an editor that cannot
/// exist on this OS.
///
/// **BUG THIS CATCHES**: Would catch the gate testing `windows` instead of
/// `target_os = "macos"`.
#[cfg(not(target_os = "macos"))]
#[test]
fn given_vs_mac_off_macos_then_unsupported_platform() {
    let err = EditorStrategy::create(ExternalEditorId::VisualStudioForMac)
        .expect_err("must be rejected off macos");

    assert!(matches!(err, LaunchError::UnsupportedPlatform { .. }));
}
