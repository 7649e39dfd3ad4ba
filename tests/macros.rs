#![cfg(feature = "derive")]

use wayfinder::{resource, route, HttpContext, HttpMethod, RequestHead, Resource, RouterBuilder};

#[derive(Clone, Default)]
struct UserResource;

#[resource(base_path = "/users", scope = "admin")]
impl UserResource {
  #[route(method = GET, path = "/:id")]
  fn get_one(&self, mut ctx: HttpContext) -> HttpContext {
    ctx.set_responded(true);
    ctx
  }

  #[route(method = POST, path = "")]
  fn create(&self, mut ctx: HttpContext) -> HttpContext {
    ctx.set_responded(true);
    ctx
  }
}

#[test]
fn resource_macro_generates_routes_with_joined_base_path() {
  let resource = UserResource;
  let routes = resource.routes();
  assert_eq!(routes.len(), 2);
  assert_eq!(routes[0].method_name, "get_one");
  assert_eq!(routes[1].method_name, "create");
}

#[test]
fn resource_macro_honors_scope_filter_during_discovery() {
  let dispatcher = RouterBuilder::new()
    .with_scope("admin")
    .resource(&UserResource)
    .unwrap()
    .build();

  let ctx = HttpContext::new(RequestHead::new(HttpMethod::Get, "/users/1"));
  assert!(dispatcher.dispatch(ctx).unwrap().responded());
}

#[test]
fn resource_macro_skips_discovery_under_a_mismatched_scope() {
  let dispatcher = RouterBuilder::new()
    .with_scope("billing")
    .resource(&UserResource)
    .unwrap()
    .build();

  let ctx = HttpContext::new(RequestHead::new(HttpMethod::Get, "/users/1"));
  assert!(dispatcher.dispatch(ctx).is_err());
}
