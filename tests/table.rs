use std::sync::Arc;
use wayfinder::{Handler, HttpContext, HttpMethod, PathPattern, Route, RoutingTable};

fn route(path: &str) -> Route {
  let handler: Arc<dyn Handler> = Arc::new(|ctx: HttpContext| ctx);
  Route::new(HttpMethod::Get, PathPattern::compile(path).unwrap(), handler)
}

#[test]
fn registering_the_same_route_twice_leaves_the_table_unchanged() {
  let mut table = RoutingTable::new();
  let r = route("/p");
  table.register(r.clone());
  table.register(r);
  assert_eq!(table.len(), 1);
}

#[test]
fn importing_twice_is_idempotent() {
  let mut a = RoutingTable::new();
  a.register(route("/p"));

  let mut b = RoutingTable::new();
  b.import(&a);
  b.import(&a);
  assert_eq!(b.len(), 1);
}

#[test]
fn importing_two_different_tables_appends_in_order() {
  let mut a = RoutingTable::new();
  a.register(route("/a").with_name("a"));

  let mut b = RoutingTable::new();
  b.register(route("/b").with_name("b"));

  let mut combined = RoutingTable::new();
  combined.import(&a);
  combined.import(&b);

  let names: Vec<&str> = combined.routes().iter().map(|r| r.name()).collect();
  assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn disabled_routes_are_excluded_from_route_for() {
  use wayfinder::{RequestHead};

  let mut table = RoutingTable::new();
  table.register(route("/p").with_enabled(false));
  let ctx = HttpContext::new(RequestHead::new(HttpMethod::Get, "/p"));
  assert!(table.route_for(&ctx).is_empty());
}
