//! Placeholder parsing and substitution for execution-time values.
//!
//! Action invocations are fixed when a module is finalized, but some values
//! (credentials, the output directory) must only be read when an action runs.
//! Such values are written as placeholders and substituted by the executor.
//!
//! # Placeholder Formats
//!
//! - `$${env:NAME}` - the value of environment variable `NAME`
//! - `$${out}` - the output directory of the current run
//!
//! # Shell Variables
//!
//! Single `$` characters pass through unchanged, so `$HOME` needs no escaping.
//!
//! # Escaping
//!
//! Use `$$$` before `{` to produce a literal `$${` sequence.
//!
//! # Example
//!
//! ```
//! use modforge_lib::placeholder::{parse, Segment, Placeholder};
//!
//! let segments = parse("--user=$${env:SONATYPE_USERNAME}").unwrap();
//! assert_eq!(segments, vec![
//!     Segment::Literal("--user=".to_string()),
//!     Segment::Placeholder(Placeholder::Env("SONATYPE_USERNAME".to_string())),
//! ]);
//! ```

use thiserror::Error;

/// A parsed placeholder reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
  /// `$${env:NAME}`
  Env(String),

  /// `$${out}`
  Out,
}

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  Literal(String),
  Placeholder(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  #[error("unknown placeholder type: {0}")]
  UnknownType(String),

  #[error("malformed placeholder: {0}")]
  Malformed(String),

  #[error("environment variable '{0}' is not set")]
  UnresolvedEnv(String),

  #[error("no output directory available")]
  UnresolvedOut,
}

/// Resolves placeholder values during execution.
pub trait Resolver {
  fn resolve_env(&self, name: &str) -> Result<&str, PlaceholderError>;

  fn resolve_out(&self) -> Result<&str, PlaceholderError>;
}

/// Parse a string containing placeholders into segments.
///
/// # Errors
///
/// Returns an error if a placeholder is unclosed, empty or of an unknown type.
pub fn parse(input: &str) -> Result<Vec<Segment>, PlaceholderError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    if ch != '$' {
      literal.push(ch);
      continue;
    }

    match chars.peek() {
      Some((_, '$')) => {
        chars.next();

        match chars.peek() {
          Some((_, '$')) => {
            chars.next();
            match chars.peek() {
              Some((_, '{')) => {
                // $$${ escapes to a literal $${
                literal.push_str("$${");
                chars.next();
              }
              _ => literal.push_str("$$$"),
            }
          }
          Some((_, '{')) => {
            chars.next();

            if !literal.is_empty() {
              segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }

            let mut content = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
              if c == '}' {
                closed = true;
                break;
              }
              content.push(c);
            }

            if !closed {
              return Err(PlaceholderError::Unclosed(pos));
            }

            segments.push(Segment::Placeholder(parse_placeholder_content(&content)?));
          }
          _ => literal.push_str("$$"),
        }
      }
      _ => literal.push('$'),
    }
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

fn parse_placeholder_content(content: &str) -> Result<Placeholder, PlaceholderError> {
  if content == "out" {
    return Ok(Placeholder::Out);
  }

  let (kind, rest) = content
    .split_once(':')
    .ok_or_else(|| PlaceholderError::Malformed(format!("missing colon in '{content}'")))?;

  match kind {
    "env" => {
      if rest.is_empty() {
        return Err(PlaceholderError::Malformed(format!("env placeholder missing name: '{content}'")));
      }
      Ok(Placeholder::Env(rest.to_string()))
    }
    _ => Err(PlaceholderError::UnknownType(kind.to_string())),
  }
}

/// Parse and substitute in one step.
pub fn substitute(input: &str, resolver: &impl Resolver) -> Result<String, PlaceholderError> {
  let segments = parse(input)?;
  substitute_segments(&segments, resolver)
}

pub fn substitute_segments(segments: &[Segment], resolver: &impl Resolver) -> Result<String, PlaceholderError> {
  let mut result = String::new();

  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Placeholder(Placeholder::Env(name)) => result.push_str(resolver.resolve_env(name)?),
      Segment::Placeholder(Placeholder::Out) => result.push_str(resolver.resolve_out()?),
    }
  }

  Ok(result)
}

/// Environment variables referenced by `input`, in order of appearance.
pub fn env_references(input: &str) -> Result<Vec<String>, PlaceholderError> {
  Ok(
    parse(input)?
      .into_iter()
      .filter_map(|segment| match segment {
        Segment::Placeholder(Placeholder::Env(name)) => Some(name),
        _ => None,
      })
      .collect(),
  )
}
