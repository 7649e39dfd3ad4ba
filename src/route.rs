//! Routes and the handler trait they invoke.

use crate::context::HttpContext;
use crate::error::RoutingResult;
use crate::method::HttpMethod;
use crate::pattern::PathPattern;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A function able to handle a request.
///
/// Implemented by anything that blanket-matches `Fn(HttpContext) -> R` where `R` converts
/// into `RoutingResult<HttpContext>`, so ordinary closures and fn items that return either
/// `HttpContext` or `RoutingResult<HttpContext>` work directly as handlers.
///
/// ## Example
/// ```
/// use wayfinder::HttpContext;
///
/// fn handler(mut ctx: HttpContext) -> HttpContext {
///     ctx.set_responded(true);
///     ctx
/// }
/// ```
pub trait Handler: Send + Sync {
  /// Invoke this handler with the given context, returning the (possibly replaced) context.
  fn invoke(&self, ctx: HttpContext) -> RoutingResult<HttpContext>;
}

impl<F, R> Handler for F
where
  R: Into<RoutingResult<HttpContext>>,
  F: Fn(HttpContext) -> R + Send + Sync,
{
  fn invoke(&self, ctx: HttpContext) -> RoutingResult<HttpContext> {
    self(ctx).into()
  }
}

impl From<HttpContext> for RoutingResult<HttpContext> {
  fn from(value: HttpContext) -> Self {
    Ok(value)
  }
}

/// Identifies a route for deduplication purposes, independent of its position in a table.
///
/// Rust has no runtime reflection over types or methods, so identity for dedup is produced
/// one of two ways:
/// - `Functional` handlers (closures, fn items registered directly) are identified by the
///   address of the heap allocation backing their `Arc<dyn Handler>`. Moving the same `Arc`
///   (e.g. via `RoutingTable::import`) compares equal; two independently constructed
///   closures compare distinct even if byte-identical in source.
/// - `Discovered` (macro-emitted) handlers are identified by the pair `(type_name,
///   method_name)`, captured at compile time by the discovery attribute macros.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum HandlerIdentity {
  /// Identity by allocation address of the backing `Arc<dyn Handler>`.
  Functional(usize),
  /// Identity by declaring-type-name and method-name, as captured by `#[route]`.
  Discovered { type_name: &'static str, method_name: &'static str },
}

/// The tuple `(method, pattern.source, handler.identity)` used for deduplication. Two routes
/// are equal iff their identities are equal.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct RouteIdentity {
  method: HttpMethod,
  pattern_source: String,
  handler: HandlerIdentity,
}

/// An immutable triple (method filter, compiled pattern, handler) plus an enabled flag and a
/// human-readable name.
#[derive(Clone)]
pub struct Route {
  method: HttpMethod,
  pattern: PathPattern,
  handler: Arc<dyn Handler>,
  handler_identity: HandlerIdentity,
  name: String,
  enabled: bool,
}

impl Route {
  /// Build a new, enabled route from a functional handler. `name` defaults to the pattern's
  /// source if not overridden with `with_name`.
  pub fn new(method: HttpMethod, pattern: PathPattern, handler: Arc<dyn Handler>) -> Self {
    let handler_identity = HandlerIdentity::Functional(Arc::as_ptr(&handler) as *const () as usize);
    let name = pattern.source().to_string();
    Route { method, pattern, handler, handler_identity, name, enabled: true }
  }

  /// Build a route from a handler discovered via `#[resource]`/`#[route]`, carrying its
  /// compile-time-captured `(type_name, method_name)` identity instead of a pointer.
  pub fn from_discovered(
    method: HttpMethod,
    pattern: PathPattern,
    handler: Arc<dyn Handler>,
    type_name: &'static str,
    method_name: &'static str,
  ) -> Self {
    let handler_identity = HandlerIdentity::Discovered { type_name, method_name };
    let name = format!("{type_name}::{method_name}");
    Route { method, pattern, handler, handler_identity, name, enabled: true }
  }

  /// Override this route's human-readable label.
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  /// Override this route's enabled flag.
  pub fn with_enabled(mut self, enabled: bool) -> Self {
    self.enabled = enabled;
    self
  }

  /// The method filter this route was registered with. May be `ALL`.
  pub fn method(&self) -> HttpMethod {
    self.method
  }

  /// The compiled path pattern this route matches against.
  pub fn pattern(&self) -> &PathPattern {
    &self.pattern
  }

  /// The human-readable label for this route, used in logs.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Whether this route currently participates in dispatch.
  pub fn enabled(&self) -> bool {
    self.enabled
  }

  /// Enable or disable this route in place.
  pub fn set_enabled(&mut self, enabled: bool) {
    self.enabled = enabled;
  }

  /// The tuple identifying this route for deduplication.
  pub fn identity(&self) -> RouteIdentity {
    RouteIdentity {
      method: self.method,
      pattern_source: self.pattern.source().to_string(),
      handler: self.handler_identity,
    }
  }

  /// True iff this route's method filter and path pattern both match `ctx`'s request head.
  /// Does not consider `enabled`; callers that mean to dispatch should check it separately.
  pub fn matches(&self, ctx: &HttpContext) -> bool {
    self.method.matches(ctx.head().method()) && self.pattern.matches(ctx.head().path()).is_some()
  }

  /// Merge this route's captured path parameters into `ctx`, then invoke the handler.
  pub fn invoke(&self, mut ctx: HttpContext) -> RoutingResult<HttpContext> {
    if let Some(captured) = self.pattern.matches(ctx.head().path()) {
      ctx.merge_params(captured);
    }
    self.handler.invoke(ctx)
  }
}

impl Debug for Route {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Route")
      .field("method", &self.method)
      .field("pattern", &self.pattern)
      .field("name", &self.name)
      .field("enabled", &self.enabled)
      .finish_non_exhaustive()
  }
}
