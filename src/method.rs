//! HTTP method enumeration used for the method axis of route matching.

use std::fmt::{Display, Formatter};

/// An HTTP verb, plus the `ALL` sentinel meaning "matches any verb".
///
/// `ALL` is not a real wire method; it only ever appears as a route's declared filter, never
/// as the method of an inbound request.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Patch,
  Delete,
  Head,
  Options,
  Trace,
  Connect,
  /// Matches any method. Only meaningful as a route filter.
  All,
}

impl HttpMethod {
  /// True iff `self` is `ALL` or equals `other`.
  pub fn matches(&self, other: HttpMethod) -> bool {
    matches!(self, HttpMethod::All) || *self == other
  }

  /// The canonical upper-case wire representation, or `"*"` for `ALL`.
  pub fn as_str(&self) -> &'static str {
    match self {
      HttpMethod::Get => "GET",
      HttpMethod::Post => "POST",
      HttpMethod::Put => "PUT",
      HttpMethod::Patch => "PATCH",
      HttpMethod::Delete => "DELETE",
      HttpMethod::Head => "HEAD",
      HttpMethod::Options => "OPTIONS",
      HttpMethod::Trace => "TRACE",
      HttpMethod::Connect => "CONNECT",
      HttpMethod::All => "*",
    }
  }
}

impl Display for HttpMethod {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
