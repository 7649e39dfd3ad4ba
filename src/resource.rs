//! Route discovery: turning user-provided resource types into `Route`s without runtime
//! reflection.
//!
//! Rust has no facility to enumerate "all types in an assembly" at runtime, so discovery is
//! modeled as an explicit, ordered, caller-supplied list of resource instances. The
//! `#[resource(base_path = "...", scope = "...")]`/`#[route(method = GET, path = "...")]`
//! attribute macros (see the `wayfinder-macros` crate, enabled by the `derive` feature)
//! expand an annotated `impl` block into a `Resource` implementation at compile time.

use crate::error::{DiscoveryError, RoutingResult};
use crate::exclusions::FrozenExclusions;
use crate::method::HttpMethod;
use crate::pattern::PathPattern;
use crate::route::{Handler, Route};
use crate::{trace_log, warn_log};
use std::any::TypeId;
use std::sync::Arc;

/// One route as declared by a `#[route]` attribute on a resource's `impl` block, already
/// bound to a constructed receiver.
pub struct RouteTemplate {
  /// The declared method filter. Defaults to `HttpMethod::All`.
  pub method: HttpMethod,
  /// The declared path info, e.g. `/:id` or `^/files/(?P<path>.*)`. Joined with the
  /// resource's `base_path` during discovery.
  pub path_info: String,
  /// The method name, captured at compile time via `stringify!`, used for dedup identity.
  pub method_name: &'static str,
  /// The bound handler: calling it invokes the annotated method on the resource's receiver.
  pub handler: Arc<dyn Handler>,
}

/// A user-provided type annotated as a container of route-annotated methods.
///
/// Ordinarily generated by the `#[resource]`/`#[route]` attribute macros; implement this
/// manually for receivers that need non-trivial construction.
pub trait Resource: Send + Sync {
  /// The resource's `TypeId`, used for exclusion by type.
  fn type_id(&self) -> TypeId;

  /// The fully qualified type name, used as the first half of a discovered route's dedup
  /// identity.
  fn type_name(&self) -> &'static str;

  /// The enclosing Rust module path, used for exclusion by namespace, unless overridden by
  /// the macro's `scope` attribute.
  fn namespace(&self) -> &'static str;

  /// The path prefix joined in front of every route this resource declares. Empty by
  /// default.
  fn base_path(&self) -> &str {
    ""
  }

  /// A free-form label compared against a router's scope filter. Empty means "no scope",
  /// matching any router.
  fn scope(&self) -> &str {
    ""
  }

  /// The routes this resource declares, in declaration order.
  fn routes(&self) -> Vec<RouteTemplate>;
}

fn normalize_base_path(base_path: &str) -> String {
  if base_path.is_empty() {
    return String::new();
  }
  let with_leading = if base_path.starts_with('/') { base_path.to_string() } else { format!("/{base_path}") };
  with_leading.strip_suffix('/').map(str::to_string).unwrap_or(with_leading)
}

fn assemble_pattern_source(base_path: &str, path_info: &str) -> String {
  if let Some(rest) = path_info.strip_prefix('^') {
    let rest = if rest.starts_with('/') { rest.to_string() } else { format!("/{rest}") };
    format!("^{base_path}{rest}")
  } else {
    let rest = if path_info.starts_with('/') { path_info.to_string() } else { format!("/{path_info}") };
    format!("{base_path}{rest}")
  }
}

/// Discover the routes declared by a single resource, honoring the router's scope filter
/// and exclusion set. Returns an empty list (not an error) when the resource's scope does
/// not match or it is excluded — matching §4.4's "return empty" behavior for a non-fatal
/// skip.
pub fn discover_type(
  resource: &dyn Resource,
  router_scope: &str,
  exclusions: &FrozenExclusions,
) -> RoutingResult<Vec<Route>> {
  let type_id = resource.type_id();
  let namespace = resource.namespace();

  if exclusions.is_excluded(type_id, namespace) {
    trace_log!("resource {} excluded from discovery", resource.type_name());
    return Ok(Vec::new());
  }

  if !router_scope.is_empty() && resource.scope() != router_scope {
    trace_log!(
      "resource {} scope {:?} does not match router scope {:?}, skipping",
      resource.type_name(),
      resource.scope(),
      router_scope
    );
    return Ok(Vec::new());
  }

  let base_path = normalize_base_path(resource.base_path());
  let mut routes = Vec::new();
  for template in resource.routes() {
    let pattern_source = assemble_pattern_source(&base_path, &template.path_info);
    let pattern = PathPattern::compile(pattern_source)?;
    routes.push(Route::from_discovered(
      template.method,
      pattern,
      template.handler,
      resource.type_name(),
      template.method_name,
    ));
  }
  Ok(routes)
}

/// Discover the routes declared by an ordered list of resources — the caller-assembled
/// stand-in for "an assembly" in a language without type enumeration.
///
/// Resources are processed in list order; within a resource, routes in declaration order,
/// preserving the observable dispatch order the matching reflection-based algorithm would
/// produce.
pub fn discover_assembly(
  resources: &[Box<dyn Resource>],
  router_scope: &str,
  exclusions: &FrozenExclusions,
) -> RoutingResult<Vec<Route>> {
  let mut all = Vec::new();
  for resource in resources {
    all.extend(discover_type(resource.as_ref(), router_scope, exclusions)?);
  }
  if all.is_empty() && !resources.is_empty() {
    warn_log!("discovered zero routes from {} resource(s); check scope and exclusions", resources.len());
  }
  Ok(all)
}

/// A construction failure for a resource whose receiver cannot be built (no usable
/// `Default` impl, or a manual `Resource` impl that determined it cannot proceed).
pub fn construction_failed(message: impl Into<String>) -> DiscoveryError {
  DiscoveryError::ConstructionFailed(message.into())
}
