// Tests for the custom editor's argument template expansion.

use crate::editors::custom::{expand_args, split_args};

/// **VALUE**: Verifies placeholder substitution for all four placeholders,
/// case-insensitively.
///
/// **WHY THIS MATTERS**: Users copy templates from editor documentation with
/// arbitrary casing; `{Line}` must work the same as `{line}`.
///
/// **BUG THIS CATCHES**: Would catch a case-sensitive regex or a placeholder
/// replaced in the wrong pass.
#[test]
fn given_all_placeholders_when_expanded_then_substituted_case_insensitively() {
    let args = expand_args(
        "--open {File} --at {Line}:{COL} --root {project}",
        "/game",
        "/game/Player.cs",
        Some(4),
        Some(2),
    );

    assert_eq!(
        args,
        vec!["--open", "/game/Player.cs", "--at", "4:2", "--root", "/game"]
    );
}

/// **VALUE**: Verifies that a template without `{file}` still gets the file
/// path, appended as the last argument.
///
/// **WHY THIS MATTERS**: The minimal template is empty; the editor must still
/// receive the file to open.
///
/// **BUG THIS CATCHES**: Would catch the has-file-flag tracking resetting per
/// token instead of accumulating.
#[test]
fn given_template_without_file_placeholder_then_file_appended() {
    let args = expand_args("--reuse-window", "/game", "/game/Player.cs", None, None);

    assert_eq!(args, vec!["--reuse-window", "/game/Player.cs"]);
}

/// **VALUE**: Verifies that a quoted placeholder keeps a path with spaces in
/// one argument.
///
/// **WHY THIS MATTERS**: Project folders routinely contain spaces ("My
/// Game"); splitting the path across arguments hands the editor two garbage
/// paths.
///
/// **BUG THIS CATCHES**: Would catch placeholder substitution happening
/// before quote-aware splitting for `{file}`/`{project}`.
#[test]
fn given_quoted_file_placeholder_when_path_has_spaces_then_single_argument() {
    let args = expand_args(
        "\"{file}\" --line {line}",
        "/my game",
        "/my game/Player.cs",
        Some(0),
        None,
    );

    assert_eq!(args, vec!["/my game/Player.cs", "--line", "0"]);
}

/// **VALUE**: Verifies that missing line and column expand to 0 rather than
/// leaving the placeholder.
///
/// **WHY THIS MATTERS**: Most editors accept line 0 as "no jump"; a literal
/// `{line}` argument is an error for all of them.
///
/// **BUG THIS CATCHES**: Would catch substitution being skipped when the
/// position is absent.
#[test]
fn given_no_position_when_expanded_then_placeholders_become_zero() {
    let args = expand_args("{file}:{line}:{col}", "/game", "/game/Player.cs", None, None);

    assert_eq!(args, vec!["/game/Player.cs:0:0"]);
}

/// **VALUE**: Verifies plain whitespace splitting with collapsed runs.
///
/// **WHY THIS MATTERS**: Users format templates with aligned spacing; empty
/// arguments from double spaces confuse most CLIs.
///
/// **BUG THIS CATCHES**: Would catch empty tokens emitted between consecutive
/// spaces.
#[test]
fn given_multiple_spaces_when_split_then_no_empty_arguments() {
    assert_eq!(split_args("a  b   c"), vec!["a", "b", "c"]);
}

/// **VALUE**: Verifies that double quotes group words and are stripped from
/// the resulting argument.
///
/// **WHY THIS MATTERS**: This mirrors shell behavior users expect when
/// quoting paths in their template.
///
/// **BUG THIS CATCHES**: Would catch quotes being kept in the argument or the
/// in-quotes state not suppressing the space delimiter.
#[test]
fn given_quoted_section_when_split_then_grouped_and_quotes_stripped() {
    assert_eq!(
        split_args("open \"my file.cs\" --wait"),
        vec!["open", "my file.cs", "--wait"]
    );
}

/// **VALUE**: Verifies that an escaped quote becomes a literal quote inside
/// the argument.
///
/// **WHY THIS MATTERS**: Some editors take quoted sub-arguments (`--eval
/// \"...\"`); the splitter must pass the quote through instead of toggling
/// quote state on it.
///
/// **BUG THIS CATCHES**: Would catch `\"` treated as a delimiter, which
/// scrambles every argument after it.
#[test]
fn given_escaped_quote_when_split_then_literal_quote_kept() {
    assert_eq!(split_args(r#"--title \"My Game\""#), vec!["--title", "\"My", "Game\""]);
}
