//! The ordered, deduplicated collection of routes a dispatcher walks.

use crate::context::HttpContext;
use crate::route::{Route, RouteIdentity};
use crate::trace_log;
use std::collections::HashSet;

/// An ordered sequence of routes with the invariant that no two entries share an identity.
/// Insertion order is preserved and is the dispatch order.
#[derive(Debug, Default, Clone)]
pub struct RoutingTable {
  routes: Vec<Route>,
  identities: HashSet<RouteIdentity>,
}

impl RoutingTable {
  /// An empty table.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append `route` iff its identity is not already present in this table; otherwise a
  /// silent no-op, logged at trace level. This makes `import` idempotent across diamond
  /// compositions.
  pub fn register(&mut self, route: Route) {
    let identity = route.identity();
    if !self.identities.insert(identity) {
      trace_log!("duplicate route {} ignored during registration", route.name());
      return;
    }
    self.routes.push(route);
  }

  /// Append each route of `other` via `register`, preserving `other`'s order.
  pub fn import(&mut self, other: &RoutingTable) {
    for route in &other.routes {
      self.register(route.clone());
    }
  }

  /// The sublist of routes where `route.enabled() && route.matches(ctx)`, in registration
  /// order. No precedence rules beyond order.
  pub fn route_for(&self, ctx: &HttpContext) -> Vec<&Route> {
    self.routes.iter().filter(|r| r.enabled() && r.matches(ctx)).collect()
  }

  /// All routes in this table, in registration order, regardless of enabled state.
  pub fn routes(&self) -> &[Route] {
    &self.routes
  }

  /// The number of routes currently registered.
  pub fn len(&self) -> usize {
    self.routes.len()
  }

  /// True iff no routes are registered.
  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::context::RequestHead;
  use crate::method::HttpMethod;
  use crate::pattern::PathPattern;
  use crate::route::Handler;
  use std::sync::Arc;

  fn noop_handler() -> Arc<dyn Handler> {
    Arc::new(|ctx: HttpContext| ctx)
  }

  fn ctx(method: HttpMethod, path: &str) -> HttpContext {
    HttpContext::new(RequestHead::new(method, path))
  }

  #[test]
  fn register_same_route_twice_leaves_table_unchanged() {
    let mut table = RoutingTable::new();
    let handler = noop_handler();
    let route = Route::new(HttpMethod::Get, PathPattern::compile("/p").unwrap(), handler);
    table.register(route.clone());
    table.register(route);
    assert_eq!(table.len(), 1);
  }

  #[test]
  fn import_is_idempotent_across_diamond_composition() {
    let mut a = RoutingTable::new();
    a.register(Route::new(HttpMethod::Get, PathPattern::compile("/p").unwrap(), noop_handler()));

    let mut b = RoutingTable::new();
    b.import(&a);
    b.import(&a);
    assert_eq!(b.len(), 1);
  }

  #[test]
  fn route_for_respects_enabled_flag() {
    let mut table = RoutingTable::new();
    let route = Route::new(HttpMethod::Get, PathPattern::compile("/p").unwrap(), noop_handler())
      .with_enabled(false);
    table.register(route);
    assert!(table.route_for(&ctx(HttpMethod::Get, "/p")).is_empty());
  }

  #[test]
  fn route_for_preserves_registration_order() {
    let mut table = RoutingTable::new();
    table.register(
      Route::new(HttpMethod::All, PathPattern::compile("/a").unwrap(), noop_handler())
        .with_name("first"),
    );
    table.register(
      Route::new(HttpMethod::All, PathPattern::compile("/a").unwrap(), noop_handler())
        .with_name("second"),
    );
    let matched = table.route_for(&ctx(HttpMethod::Get, "/a"));
    assert_eq!(matched.len(), 2);
    assert_eq!(matched[0].name(), "first");
    assert_eq!(matched[1].name(), "second");
  }
}
