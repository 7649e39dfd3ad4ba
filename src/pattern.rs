//! Path pattern compilation and matching.

use crate::error::PatternError;
use regex::Regex;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};

/// A compiled path pattern: an anchored regex plus the ordered list of parameter names it
/// exposes.
///
/// Compiled from one of two source forms:
/// - *Literal/parametric*: `/segment/:name/segment`, where any segment beginning with `:`
///   captures one path segment (no `/`).
/// - *Regex*: a source string whose first character is `^`, taken as a regular expression
///   anchored to the full path; named captures `(?P<name>...)` become parameters.
///
/// An empty source string matches any path.
#[derive(Clone)]
pub struct PathPattern {
  source: String,
  regex: Regex,
  param_names: Vec<String>,
}

impl PathPattern {
  /// Compile `source` into a matcher. Fails if the resulting regex does not compile or if
  /// the pattern declares the same named parameter more than once.
  pub fn compile(source: impl Into<String>) -> Result<Self, PatternError> {
    let source = source.into();

    if source.is_empty() {
      let regex = Regex::new("^.*$").map_err(|e| PatternError::InvalidRegex(e.to_string()))?;
      return Ok(PathPattern { source, regex, param_names: Vec::new() });
    }

    if let Some(stripped) = source.strip_prefix('^') {
      return Self::compile_regex_form(&source, stripped);
    }

    Self::compile_literal_form(&source)
  }

  fn compile_regex_form(source: &str, body: &str) -> Result<Self, PatternError> {
    let anchored = format!("^{body}$");
    let regex = Regex::new(&anchored).map_err(|e| PatternError::InvalidRegex(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut param_names = Vec::new();
    for name in regex.capture_names().flatten() {
      if !seen.insert(name.to_string()) {
        return Err(PatternError::DuplicateParameterName(name.to_string()));
      }
      param_names.push(name.to_string());
    }

    Ok(PathPattern { source: source.to_string(), regex, param_names })
  }

  fn compile_literal_form(source: &str) -> Result<Self, PatternError> {
    let mut param_names: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    let mut regex_src = String::from("^");

    let segments: Vec<&str> = source.split('/').collect();
    for (i, segment) in segments.iter().enumerate() {
      if i > 0 {
        regex_src.push('/');
      }
      if let Some(name) = segment.strip_prefix(':') {
        if !seen.insert(name.to_string()) {
          return Err(PatternError::DuplicateParameterName(name.to_string()));
        }
        param_names.push(name.to_string());
        regex_src.push_str(&format!("(?P<{name}>[^/]+)"));
      } else {
        regex_src.push_str(&regex::escape(segment));
      }
    }
    regex_src.push('$');

    let regex = Regex::new(&regex_src).map_err(|e| PatternError::InvalidRegex(e.to_string()))?;
    Ok(PathPattern { source: source.to_string(), regex, param_names })
  }

  /// The source string this pattern was compiled from. Part of a route's dedup identity.
  pub fn source(&self) -> &str {
    &self.source
  }

  /// The parameter names this pattern exposes, in declaration order.
  pub fn param_names(&self) -> &[String] {
    &self.param_names
  }

  /// Test `path` against this pattern. On success, returns the captured parameters keyed by
  /// name; the key set always equals `param_names()`.
  pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
    let captures = self.regex.captures(path)?;
    let mut params = HashMap::with_capacity(self.param_names.len());
    for name in &self.param_names {
      if let Some(m) = captures.name(name) {
        params.insert(name.clone(), m.as_str().to_string());
      }
    }
    Some(params)
  }
}

impl Debug for PathPattern {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PathPattern")
      .field("source", &self.source)
      .field("param_names", &self.param_names)
      .finish()
  }
}

impl PartialEq for PathPattern {
  fn eq(&self, other: &Self) -> bool {
    self.source == other.source
  }
}
impl Eq for PathPattern {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_pattern_matches_any_path() {
    let pattern = PathPattern::compile("").unwrap();
    assert!(pattern.matches("/anything/at/all").is_some());
  }

  #[test]
  fn literal_segment_matches_exactly() {
    let pattern = PathPattern::compile("/hello").unwrap();
    assert!(pattern.matches("/hello").is_some());
    assert!(pattern.matches("/hello/world").is_none());
    assert!(pattern.matches("/bye").is_none());
  }

  #[test]
  fn parametric_segment_captures_value() {
    let pattern = PathPattern::compile("/users/:id").unwrap();
    let params = pattern.matches("/users/42").expect("should match");
    assert_eq!(params.get("id"), Some(&"42".to_string()));
    assert!(pattern.matches("/users/42/extra").is_none());
  }

  #[test]
  fn regex_form_uses_named_captures() {
    let pattern = PathPattern::compile("^/files/(?P<path>.*)").unwrap();
    let params = pattern.matches("/files/a/b/c").expect("should match");
    assert_eq!(params.get("path"), Some(&"a/b/c".to_string()));
  }

  #[test]
  fn duplicate_parameter_names_are_rejected() {
    let err = PathPattern::compile("/a/:id/b/:id").unwrap_err();
    assert!(matches!(err, PatternError::DuplicateParameterName(name) if name == "id"));
  }

  #[test]
  fn param_names_match_capture_key_set() {
    let pattern = PathPattern::compile("/a/:x/:y").unwrap();
    let params = pattern.matches("/a/1/2").unwrap();
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["x", "y"]);
    assert_eq!(pattern.param_names(), &["x".to_string(), "y".to_string()]);
  }
}
