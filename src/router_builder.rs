//! The mutable, registration-phase counterpart to `Dispatcher`.

use crate::dispatcher::Dispatcher;
use crate::error::RoutingResult;
use crate::exclusions::Exclusions;
use crate::method::HttpMethod;
use crate::pattern::PathPattern;
use crate::resource::{discover_assembly, discover_type, Resource};
use crate::route::{Handler, Route};
use crate::table::RoutingTable;
use std::any::TypeId;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Builds a `Dispatcher` through a fluent, consuming registration surface.
///
/// Mutation only ever happens here, during the registration phase; `build()` consumes
/// `self` and returns an immutable `Dispatcher`. There is no way to go back — once a
/// `Dispatcher` exists, the methods on this type simply do not exist on it, so the type
/// system enforces the single-threaded-registration / read-only-serving contract described
/// in §5 without any runtime lock.
pub struct RouterBuilder {
  table: RoutingTable,
  exclusions: Exclusions,
  scope: String,
  before: Option<Arc<dyn Handler>>,
  after: Option<Arc<dyn Handler>>,
  continue_after_response: bool,
}

impl Default for RouterBuilder {
  fn default() -> Self {
    RouterBuilder {
      table: RoutingTable::new(),
      exclusions: Exclusions::new(),
      scope: String::new(),
      before: None,
      after: None,
      continue_after_response: false,
    }
  }
}

impl RouterBuilder {
  /// An empty builder: no routes, no exclusions, no scope filter.
  pub fn new() -> Self {
    Self::default()
  }

  /// The standard builder entry point: hands a fresh builder scoped to `scope` to
  /// `configure`, returning whatever it returns.
  pub fn configure(
    scope: impl Into<String>,
    configure: impl FnOnce(RouterBuilder) -> RoutingResult<RouterBuilder>,
  ) -> RoutingResult<RouterBuilder> {
    configure(RouterBuilder::new().with_scope(scope))
  }

  /// Set the scope filter used by `resource`/`assembly` discovery. Empty means "accept any
  /// scope".
  pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
    self.scope = scope.into();
    self
  }

  /// Register a route directly from a method, path pattern source, and handler.
  pub fn route(
    mut self,
    method: HttpMethod,
    path: impl Into<String>,
    handler: impl Handler + 'static,
  ) -> RoutingResult<Self> {
    let pattern = PathPattern::compile(path)?;
    self.table.register(Route::new(method, pattern, Arc::new(handler)));
    Ok(self)
  }

  /// Register `GET path -> handler`.
  pub fn route_get(self, path: impl Into<String>, handler: impl Handler + 'static) -> RoutingResult<Self> {
    self.route(HttpMethod::Get, path, handler)
  }

  /// Register `POST path -> handler`.
  pub fn route_post(self, path: impl Into<String>, handler: impl Handler + 'static) -> RoutingResult<Self> {
    self.route(HttpMethod::Post, path, handler)
  }

  /// Register `PUT path -> handler`.
  pub fn route_put(self, path: impl Into<String>, handler: impl Handler + 'static) -> RoutingResult<Self> {
    self.route(HttpMethod::Put, path, handler)
  }

  /// Register `PATCH path -> handler`.
  pub fn route_patch(self, path: impl Into<String>, handler: impl Handler + 'static) -> RoutingResult<Self> {
    self.route(HttpMethod::Patch, path, handler)
  }

  /// Register `DELETE path -> handler`.
  pub fn route_delete(self, path: impl Into<String>, handler: impl Handler + 'static) -> RoutingResult<Self> {
    self.route(HttpMethod::Delete, path, handler)
  }

  /// Register `OPTIONS path -> handler`.
  pub fn route_options(self, path: impl Into<String>, handler: impl Handler + 'static) -> RoutingResult<Self> {
    self.route(HttpMethod::Options, path, handler)
  }

  /// Register `path -> handler` for any HTTP method.
  pub fn route_any(self, path: impl Into<String>, handler: impl Handler + 'static) -> RoutingResult<Self> {
    self.route(HttpMethod::All, path, handler)
  }

  /// Register an already-constructed `Route` directly, e.g. one produced by hand outside
  /// the fluent sugar above.
  pub fn register_route(mut self, route: Route) -> Self {
    self.table.register(route);
    self
  }

  /// Discover and register the routes declared by a single resource.
  pub fn resource(mut self, resource: &dyn Resource) -> RoutingResult<Self> {
    let frozen = self.exclusions.freeze();
    for route in discover_type(resource, &self.scope, &frozen)? {
      self.table.register(route);
    }
    Ok(self)
  }

  /// Discover and register the routes declared by an ordered list of resources — the
  /// caller-assembled stand-in for "an assembly".
  pub fn assembly(mut self, resources: &[Box<dyn Resource>]) -> RoutingResult<Self> {
    let frozen = self.exclusions.freeze();
    for route in discover_assembly(resources, &self.scope, &frozen)? {
      self.table.register(route);
    }
    Ok(self)
  }

  /// Exclude a resource type from discovery by its `TypeId`.
  pub fn exclude_type(mut self, type_id: TypeId) -> Self {
    self.exclusions.exclude_type(type_id);
    self
  }

  /// Exclude every resource whose namespace equals `namespace` from discovery.
  pub fn exclude_namespace(mut self, namespace: impl Into<String>) -> Self {
    self.exclusions.exclude_namespace(namespace);
    self
  }

  /// Import every route of `other`, preserving its order and deduplicating against routes
  /// already registered here.
  pub fn import(mut self, other: &RoutingTable) -> Self {
    self.table.import(other);
    self
  }

  /// Set the single `before` hook, run once per dispatched request ahead of any matched
  /// route.
  pub fn before(mut self, handler: impl Handler + 'static) -> Self {
    self.before = Some(Arc::new(handler));
    self
  }

  /// Set the single `after` hook, run once per dispatched request once the matched routes
  /// (if any ran) are done, even on failure.
  pub fn after(mut self, handler: impl Handler + 'static) -> Self {
    self.after = Some(Arc::new(handler));
    self
  }

  /// When true, matched routes after the first that sets `responded` still run (useful for
  /// logging/auditing routes). Defaults to false: the first response short-circuits.
  pub fn continue_after_response(mut self, continue_after_response: bool) -> Self {
    self.continue_after_response = continue_after_response;
    self
  }

  /// The number of routes registered so far.
  pub fn route_count(&self) -> usize {
    self.table.len()
  }

  /// Consume this builder, producing an immutable `Dispatcher`.
  pub fn build(self) -> Dispatcher {
    Dispatcher::new(self.table, self.before, self.after, self.continue_after_response)
  }

  /// Consume this builder, producing a `Dispatcher` wrapped in an `Arc` ready to be shared
  /// across request-handling threads.
  pub fn build_arc(self) -> Arc<Dispatcher> {
    Arc::new(self.build())
  }
}

impl Debug for RouterBuilder {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RouterBuilder")
      .field("routes", &self.table.len())
      .field("scope", &self.scope)
      .field("continue_after_response", &self.continue_after_response)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::context::{HttpContext, RequestHead};

  #[test]
  fn build_consumes_self_and_exposes_no_mutating_methods() {
    let dispatcher = RouterBuilder::new()
      .route_get("/hello", |mut ctx: HttpContext| {
        ctx.set_responded(true);
        ctx
      })
      .unwrap()
      .build();

    let ctx = HttpContext::new(RequestHead::new(HttpMethod::Get, "/hello"));
    let result = dispatcher.dispatch(ctx).unwrap();
    assert!(result.responded());
  }

  #[test]
  fn configure_entry_point_scopes_the_builder() {
    let builder = RouterBuilder::configure("admin", |b| b.route_get("/ping", |ctx: HttpContext| ctx)).unwrap();
    assert_eq!(builder.route_count(), 1);
  }

  #[test]
  fn import_dedups_against_already_registered_routes() {
    let mut upstream = RoutingTable::new();
    upstream.register(Route::new(HttpMethod::Get, PathPattern::compile("/p").unwrap(), Arc::new(|ctx: HttpContext| ctx)));

    let builder = RouterBuilder::new().import(&upstream).import(&upstream);
    assert_eq!(builder.route_count(), 1);
  }
}
