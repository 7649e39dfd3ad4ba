use std::sync::Arc;
use wayfinder::{Handler, HttpContext, HttpMethod, PathPattern, RequestHead, Route};

fn ctx(method: HttpMethod, path: &str) -> HttpContext {
  HttpContext::new(RequestHead::new(method, path))
}

#[test]
fn route_matches_requires_both_method_and_path() {
  let handler: Arc<dyn Handler> = Arc::new(|ctx: HttpContext| ctx);
  let route = Route::new(HttpMethod::Get, PathPattern::compile("/hello").unwrap(), handler);

  assert!(route.matches(&ctx(HttpMethod::Get, "/hello")));
  assert!(!route.matches(&ctx(HttpMethod::Post, "/hello")));
  assert!(!route.matches(&ctx(HttpMethod::Get, "/bye")));
}

#[test]
fn all_method_route_matches_every_verb() {
  let handler: Arc<dyn Handler> = Arc::new(|ctx: HttpContext| ctx);
  let route = Route::new(HttpMethod::All, PathPattern::compile("/hello").unwrap(), handler);

  assert!(route.matches(&ctx(HttpMethod::Get, "/hello")));
  assert!(route.matches(&ctx(HttpMethod::Post, "/hello")));
}

#[test]
fn invoke_merges_captured_params_before_calling_handler() {
  let handler: Arc<dyn Handler> = Arc::new(|mut ctx: HttpContext| {
    let id = ctx.params().get("id").cloned().unwrap_or_default();
    ctx.set_property(id);
    ctx
  });
  let route = Route::new(HttpMethod::Get, PathPattern::compile("/users/:id").unwrap(), handler);

  let result = route.invoke(ctx(HttpMethod::Get, "/users/7")).unwrap();
  assert_eq!(result.property::<String>().unwrap(), "7");
}

#[test]
fn two_routes_sharing_the_same_arc_have_equal_identity() {
  let handler: Arc<dyn Handler> = Arc::new(|ctx: HttpContext| ctx);
  let a = Route::new(HttpMethod::Get, PathPattern::compile("/a").unwrap(), handler.clone());
  let b = Route::new(HttpMethod::Get, PathPattern::compile("/a").unwrap(), handler);
  assert_eq!(a.identity(), b.identity());
}

#[test]
fn independently_constructed_closures_have_distinct_identity() {
  let a = Route::new(
    HttpMethod::Get,
    PathPattern::compile("/a").unwrap(),
    Arc::new(|ctx: HttpContext| ctx),
  );
  let b = Route::new(
    HttpMethod::Get,
    PathPattern::compile("/a").unwrap(),
    Arc::new(|ctx: HttpContext| ctx),
  );
  assert_ne!(a.identity(), b.identity());
}
