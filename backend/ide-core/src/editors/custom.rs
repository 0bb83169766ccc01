//! Custom editor launch strategy.
//!
//! Runs a user-configured command line. The argument template supports
//! case-insensitive `{file}`, `{project}`, `{line}` and `{col}`
//! placeholders and quote-aware splitting, so paths with spaces survive.
//! When the template never mentions `{file}`, the file path is appended.

use crate::config::RES_SCHEME;
use crate::editors::LaunchContext;
use crate::error::launch::LaunchError;
use crate::os;

use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::{NoExpand, Regex};

static LINE_REGEX: OnceLock<Regex> = OnceLock::new();
static COL_REGEX: OnceLock<Regex> = OnceLock::new();
static PROJECT_REGEX: OnceLock<Regex> = OnceLock::new();
static FILE_REGEX: OnceLock<Regex> = OnceLock::new();

fn line_regex() -> &'static Regex {
    LINE_REGEX.get_or_init(|| Regex::new(r"(?i)\{line\}").expect("valid regex pattern"))
}

fn col_regex() -> &'static Regex {
    COL_REGEX.get_or_init(|| Regex::new(r"(?i)\{col\}").expect("valid regex pattern"))
}

fn project_regex() -> &'static Regex {
    PROJECT_REGEX.get_or_init(|| Regex::new(r"(?i)\{project\}").expect("valid regex pattern"))
}

fn file_regex() -> &'static Regex {
    FILE_REGEX.get_or_init(|| Regex::new(r"(?i)\{file\}").expect("valid regex pattern"))
}

#[derive(Debug)]
pub struct CustomEditor {}

impl CustomEditor {
    pub(crate) fn new() -> Self {
        Self {}
    }

    pub(crate) fn launch(
        &mut self,
        ctx: &LaunchContext<'_>,
        script_path: &str,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Result<(), LaunchError> {
        let exec_path = ctx.config.editor.custom_exec_path.trim();
        if exec_path.is_empty() {
            return Err(LaunchError::NotFound {
                message: "No custom editor executable configured".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let file = ctx.config.globalize_path(script_path);
        let project = ctx.config.globalize_path(RES_SCHEME);

        let args = expand_args(
            &ctx.config.editor.custom_exec_args,
            &project.display().to_string(),
            &file.display().to_string(),
            line,
            column,
        );

        let _child = os::spawn_detached(&PathBuf::from(exec_path), &args).map_err(|e| {
            LaunchError::Launch {
                message: format!("Failed to start custom editor '{exec_path}': {e}"),
                location: ErrorLocation::from(Location::caller()),
                source: Box::new(e),
            }
        })?;

        Ok(())
    }
}

/// Expand the argument template into an argument vector.
///
/// `{line}`/`{col}` are substituted before splitting (they never contain
/// spaces); `{project}`/`{file}` after, so paths with spaces stay inside
/// their token. Absent line/column expand to 0.
pub(crate) fn expand_args(
    template: &str,
    project: &str,
    file: &str,
    line: Option<u32>,
    column: Option<u32>,
) -> Vec<String> {
    let prepared = line_regex().replace_all(template, line.unwrap_or(0).to_string());
    let prepared = col_regex().replace_all(&prepared, column.unwrap_or(0).to_string());
    let prepared = prepared.trim().replace("\\\\", "\\");

    let mut args = Vec::new();
    let mut has_file_flag = false;

    for token in split_args(&prepared) {
        if file_regex().is_match(&token) {
            has_file_flag = true;
        }

        let token = project_regex().replace_all(&token, NoExpand(project));
        let token = file_regex().replace_all(&token, NoExpand(file));
        args.push(token.into_owned());
    }

    if !has_file_flag {
        args.push(file.to_string());
    }

    args
}

/// Split on spaces outside double quotes. Unescaped quotes delimit and
/// are stripped; `\"` becomes a literal quote.
pub(crate) fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;
    let mut prev_backslash = false;

    for ch in input.chars() {
        match ch {
            '"' if prev_backslash => {
                // Replace the backslash we already buffered with the quote.
                current.pop();
                current.push('"');
            }
            '"' => inside_quotes = !inside_quotes,
            ' ' if !inside_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
        prev_backslash = ch == '\\' && !prev_backslash;
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}
