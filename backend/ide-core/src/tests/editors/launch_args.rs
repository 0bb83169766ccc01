// Argument-line tests for every editor's goto syntax. Each IDE counts
// lines and columns differently; these pin the exact conversions.

use crate::editors::{mono_develop, rider, visual_studio, visual_studio_mac, vscode};

use std::path::Path;

/// **VALUE**: Verifies MonoDevelop's argument line: IPC flag, solution, then
/// `file;line;column` with a 1-based line and 0-based column.
///
/// **WHY THIS MATTERS**: MonoDevelop parses this positional format verbatim;
/// a reordered or re-based argument opens the wrong location or nothing.
///
/// **BUG THIS CATCHES**: Would catch a lost `+ 1` on the line or an added one
/// on the column.
#[test]
fn given_position_when_building_monodevelop_args_then_line_one_based() {
    let args = mono_develop::build_args(
        Path::new("/game/Game.sln"),
        Path::new("/game/Player.cs"),
        Some(4),
        Some(2),
    );

    assert_eq!(
        args,
        vec!["--ipc-tcp", "/game/Game.sln", "/game/Player.cs;5;2"]
    );
}

/// **VALUE**: Verifies that MonoDevelop gets a bare file path when no line is
/// requested.
///
/// **WHY THIS MATTERS**: "Open the file" (double-click in the file dock) must
/// not jump the caret to line 1 of an already-open file.
///
/// **BUG THIS CATCHES**: Would catch a default position (";1;0") sneaking in.
#[test]
fn given_no_position_when_building_monodevelop_args_then_bare_file() {
    let args = mono_develop::build_args(
        Path::new("/game/Game.sln"),
        Path::new("/game/Player.cs"),
        None,
        Some(9),
    );

    assert_eq!(args, vec!["--ipc-tcp", "/game/Game.sln", "/game/Player.cs"]);
}

/// **VALUE**: Verifies that Visual Studio for Mac shares MonoDevelop's
/// argument shape.
///
/// **WHY THIS MATTERS**: Both IDEs descend from the same codebase and parse
/// the identical positional format; a divergence here breaks exactly one of
/// them and only on macOS.
///
/// **BUG THIS CATCHES**: Would catch the two arg builders drifting apart.
#[test]
fn given_position_when_building_vs_mac_args_then_matches_monodevelop_shape() {
    let args = visual_studio_mac::build_ipc_args(
        Path::new("/game/Game.sln"),
        Path::new("/game/Player.cs"),
        Some(4),
        Some(2),
    );

    assert_eq!(
        args,
        vec!["--ipc-tcp", "/game/Game.sln", "/game/Player.cs;5;2"]
    );
}

/// **VALUE**: Verifies VS Code's `-g file:line:col` goto argument with both
/// values 1-based.
///
/// **WHY THIS MATTERS**: VS Code is the only editor here that wants a 1-based
/// column too; copying another builder's column handling breaks caret
/// placement by one character.
///
/// **BUG THIS CATCHES**: Would catch a 0-based column or a missing `-g` flag.
#[test]
fn given_position_when_building_vscode_args_then_goto_one_based_line_and_column() {
    let args = vscode::build_open_args(
        Path::new("/game"),
        Path::new("/game/Player.cs"),
        Some(4),
        Some(2),
    );

    assert_eq!(args, vec!["/game", "-g", "/game/Player.cs:5:3"]);
}

/// **VALUE**: Verifies VS Code gets the solution directory plus the bare file
/// when no position is requested.
///
/// **WHY THIS MATTERS**: The directory argument keeps the request inside the
/// project's window; dropping it opens the file in whatever window VS Code
/// last focused.
///
/// **BUG THIS CATCHES**: Would catch the no-position branch losing either
/// argument.
#[test]
fn given_no_position_when_building_vscode_args_then_directory_and_file() {
    let args = vscode::build_open_args(
        Path::new("/game"),
        Path::new("/game/Player.cs"),
        None,
        None,
    );

    assert_eq!(args, vec!["/game", "/game/Player.cs"]);
}

/// **VALUE**: Verifies Rider's flag-based goto arguments (1-based line,
/// 0-based column) followed by solution and file.
///
/// **WHY THIS MATTERS**: Rider silently ignores malformed flags and just opens
/// the solution; a wrong flag order degrades to "no goto" with no error
/// anywhere.
///
/// **BUG THIS CATCHES**: Would catch flags emitted after the positional
/// arguments, where Rider treats them as file names.
#[test]
fn given_position_when_building_rider_args_then_flags_precede_paths() {
    let args = rider::build_open_args(
        Path::new("/game/Game.sln"),
        Path::new("/game/Player.cs"),
        Some(4),
        Some(2),
    );

    assert_eq!(
        args,
        vec![
            "--line",
            "5",
            "--column",
            "2",
            "/game/Game.sln",
            "/game/Player.cs"
        ]
    );
}

/// **VALUE**: Verifies the Visual Studio opener's `sln file;line;col` format
/// with both line and column 1-based.
///
/// **WHY THIS MATTERS**: The opener forwards these straight into the DTE
/// automation API, which is 1-based for both; a 0-based column places the
/// caret before the intended character.
///
/// **BUG THIS CATCHES**: Would catch column conversion diverging from the
/// opener's contract.
#[test]
fn given_position_when_building_visual_studio_args_then_both_one_based() {
    let args = visual_studio::build_args(
        Path::new("C:\\game\\Game.sln"),
        Path::new("C:\\game\\Player.cs"),
        Some(4),
        Some(2),
    );

    assert_eq!(args, vec!["C:\\game\\Game.sln", "C:\\game\\Player.cs;5;3"]);
}
