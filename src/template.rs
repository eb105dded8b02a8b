//! Template engine for placeholder substitution.
//!
//! This module provides the engine that expands `$name` and `${name}`
//! placeholders in template text. Every artifact this tool writes goes
//! through it: the VM provisioning file, the package descriptor, and
//! the per-target setup script.
//!
//! # Syntax
//!
//! - `$name` - Substitutes the value of the configuration key `name`.
//!   A name is an ASCII identifier: a letter or underscore followed by
//!   letters, digits, or underscores.
//! - `${name}` - Braced form of the same placeholder, for names that
//!   run into adjacent identifier characters
//!   (e.g. `${package_manager}_setup.sh`).
//! - `$$` - Renders as a single literal `$`. No lookup is performed.
//!
//! # Error Handling
//!
//! Substitution is strict. A placeholder whose name is not a key in
//! the map is an error, not a silent no-op or an empty fill, so a typo
//! in a template can never reach a rendered artifact. A `$` that
//! introduces neither a placeholder nor the `$$` escape is an error as
//! well. Values are inserted verbatim; a `$` inside a value is never
//! re-scanned.

use std::collections::HashMap;
use std::fmt;

/// Error type for template substitution failures.
///
/// Positions are byte offsets of the introducing `$` in the template
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder named a key the configuration map does not define.
    UnresolvedPlaceholder {
        /// The placeholder name that failed to resolve.
        name: String,
        /// Byte offset of the `$` introducing the placeholder.
        position: usize,
    },
    /// A `$` was followed by neither an identifier, `{`, nor `$`.
    InvalidPlaceholder {
        /// Byte offset of the offending `$`.
        position: usize,
    },
    /// A `${` was opened but never closed.
    UnterminatedBrace {
        /// Byte offset of the `$` that opened the braced form.
        position: usize,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnresolvedPlaceholder { name, position } => {
                write!(
                    f,
                    "unresolved placeholder '${}' at position {} in template",
                    name, position
                )
            }
            TemplateError::InvalidPlaceholder { position } => {
                write!(f, "invalid placeholder at position {} in template", position)
            }
            TemplateError::UnterminatedBrace { position } => {
                write!(
                    f,
                    "unterminated '${{' at position {} in template",
                    position
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Substitute every placeholder in `template` with values from `vars`.
///
/// # Arguments
///
/// * `template` - The template text containing `$name` and `${name}`
///   placeholders
/// * `vars` - Map of placeholder names to replacement values
///
/// # Returns
///
/// * `Ok(String)` - The text with every placeholder replaced
/// * `Err(TemplateError)` - If any placeholder is undefined or
///   malformed
pub fn substitute(
    template: &str,
    vars: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            // $$ escape: emit one literal dollar.
            Some(&(_, '$')) => {
                chars.next();
                result.push('$');
            }
            // ${name} braced form: collect up to the closing brace.
            Some(&(_, '{')) => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => name.push(c),
                        None => {
                            return Err(TemplateError::UnterminatedBrace { position: pos });
                        }
                    }
                }
                if !is_identifier(&name) {
                    return Err(TemplateError::InvalidPlaceholder { position: pos });
                }
                result.push_str(lookup(vars, &name, pos)?);
            }
            // $name bare form: collect the longest identifier run.
            Some(&(_, c)) if is_identifier_start(c) => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if !is_identifier_char(c) {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                result.push_str(lookup(vars, &name, pos)?);
            }
            // Anything else after `$`, including end of input.
            _ => return Err(TemplateError::InvalidPlaceholder { position: pos }),
        }
    }

    Ok(result)
}

/// Resolve one placeholder name, or fail with its position.
fn lookup<'a>(
    vars: &'a HashMap<String, String>,
    name: &str,
    position: usize,
) -> Result<&'a str, TemplateError> {
    vars.get(name)
        .map(String::as_str)
        .ok_or_else(|| TemplateError::UnresolvedPlaceholder {
            name: name.to_string(),
            position,
        })
}

/// First character of a placeholder name: ASCII letter or underscore.
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Later characters of a placeholder name: ASCII letter, digit, or
/// underscore.
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A valid placeholder name is a non-empty ASCII identifier.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => chars.all(is_identifier_char),
        _ => false,
    }
}
