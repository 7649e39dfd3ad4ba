//! The router facade: the single `route(ctx)` entry point a hosting layer calls.

use crate::context::HttpContext;
use crate::dispatcher::Dispatcher;
use crate::error::RoutingResult;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A built, immutable router ready to serve requests. A thin, `Clone`-able handle around
/// `Arc<Dispatcher>` — the component the glossary calls the thing that "composes C3–C6
/// behind a fluent registration surface and exposes the single `Route(ctx)` entry point".
/// The fluent registration surface itself is `RouterBuilder`; this is what `build()`/
/// `build_arc()` hand back once that surface has been used.
#[derive(Clone)]
pub struct Router(Arc<Dispatcher>);

impl Router {
  /// The single entry point used by a hosting layer: match, dispatch, and return the
  /// resulting context (or the error that aborted it).
  pub fn route(&self, ctx: HttpContext) -> RoutingResult<HttpContext> {
    self.0.dispatch(ctx)
  }

  /// The dispatcher backing this router, for callers that want lower-level access (e.g. to
  /// inspect the routing table).
  pub fn dispatcher(&self) -> &Dispatcher {
    &self.0
  }
}

impl From<Dispatcher> for Router {
  fn from(dispatcher: Dispatcher) -> Self {
    Router(Arc::new(dispatcher))
  }
}

impl From<Arc<Dispatcher>> for Router {
  fn from(dispatcher: Arc<Dispatcher>) -> Self {
    Router(dispatcher)
  }
}

impl Debug for Router {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Debug::fmt(&self.0, f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::context::RequestHead;
  use crate::method::HttpMethod;
  use crate::router_builder::RouterBuilder;

  #[test]
  fn router_delegates_to_its_dispatcher() {
    let router: Router = RouterBuilder::new()
      .route_get("/hello", |mut ctx: HttpContext| {
        ctx.set_responded(true);
        ctx
      })
      .unwrap()
      .build()
      .into();

    let ctx = HttpContext::new(RequestHead::new(HttpMethod::Get, "/hello"));
    let result = router.route(ctx).unwrap();
    assert!(result.responded());
  }
}
