//! Error types for the routing core.
#![allow(missing_docs)]

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Result alias used throughout the crate.
pub type RoutingResult<T> = Result<T, RoutingError>;

/// A path pattern failed to compile.
#[derive(Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PatternError {
  /// The pattern's regex form (or the regex synthesized from a literal/parametric form) is
  /// not a valid regular expression.
  InvalidRegex(String),
  /// The same named parameter appears more than once in one pattern.
  DuplicateParameterName(String),
}

impl Display for PatternError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      PatternError::InvalidRegex(msg) => write!(f, "invalid path pattern: {msg}"),
      PatternError::DuplicateParameterName(name) => {
        write!(f, "duplicate parameter name in path pattern: {name}")
      }
    }
  }
}
impl Error for PatternError {}

/// A resource, or a type handed to discovery, could not be turned into routes.
#[derive(Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum DiscoveryError {
  /// The resource could not be constructed (no usable `Default` impl / receiver), or does
  /// not otherwise satisfy the `Resource` contract.
  ConstructionFailed(String),
}

impl Display for DiscoveryError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      DiscoveryError::ConstructionFailed(msg) => write!(f, "failed to construct resource: {msg}"),
    }
  }
}
impl Error for DiscoveryError {}

/// No enabled route matched the request.
#[derive(Debug, Eq, PartialEq, Hash)]
pub struct NotFoundError {
  pub method: String,
  pub path: String,
}

impl Display for NotFoundError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "no route matched {} {}", self.method, self.path)
  }
}
impl Error for NotFoundError {}

/// The errors raised by the routing core.
#[derive(Debug)]
#[non_exhaustive]
pub enum RoutingError {
  Pattern(PatternError),
  Discovery(DiscoveryError),
  NotFound(NotFoundError),
  Handler(Box<dyn Error + Send + Sync>),
}

impl RoutingError {
  pub fn downcast_ref<T: Error + Send + 'static>(&self) -> Option<&T> {
    match self {
      RoutingError::Pattern(err) => (err as &dyn Error).downcast_ref::<T>(),
      RoutingError::Discovery(err) => (err as &dyn Error).downcast_ref::<T>(),
      RoutingError::NotFound(err) => (err as &dyn Error).downcast_ref::<T>(),
      RoutingError::Handler(err) => err.downcast_ref::<T>(),
    }
  }

  pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
    match self {
      RoutingError::Pattern(err) => Box::new(err),
      RoutingError::Discovery(err) => Box::new(err),
      RoutingError::NotFound(err) => Box::new(err),
      RoutingError::Handler(err) => err,
    }
  }
}

impl Display for RoutingError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RoutingError::Pattern(err) => Display::fmt(err, f),
      RoutingError::Discovery(err) => Display::fmt(err, f),
      RoutingError::NotFound(err) => Display::fmt(err, f),
      RoutingError::Handler(err) => Display::fmt(err, f),
    }
  }
}
// Deliberately not `impl Error for RoutingError`: the blanket `From<T: Error>` conversion
// below would then overlap with the standard library's reflexive `impl<T> From<T> for T`
// at `T = RoutingError`, which rustc rejects as conflicting impls (E0119). Display/Debug
// are enough for this crate's own needs; a hosting layer that wants a trait object can
// still match on the variants or call `into_inner()`.

impl<T> From<T> for RoutingError
where
  T: Error + Send + Sync + 'static,
{
  fn from(value: T) -> Self {
    let mut dyn_box = Box::new(value) as Box<dyn Error + Send + Sync>;
    dyn_box = match dyn_box.downcast::<PatternError>() {
      Ok(err) => return RoutingError::Pattern(*err),
      Err(err) => err,
    };
    dyn_box = match dyn_box.downcast::<DiscoveryError>() {
      Ok(err) => return RoutingError::Discovery(*err),
      Err(err) => err,
    };
    dyn_box = match dyn_box.downcast::<NotFoundError>() {
      Ok(err) => return RoutingError::NotFound(*err),
      Err(err) => err,
    };

    RoutingError::Handler(dyn_box)
  }
}
