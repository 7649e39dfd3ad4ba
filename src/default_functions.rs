//! Default hooks a hosting layer can fall back on; not wired in automatically, since the
//! core has no opinion on how `NotFound`/`HandlerFailure` become bytes on the wire.

use crate::context::HttpContext;
use crate::error::RoutingError;
use crate::{error_log, info_log};

/// Logs a handler/hook failure at error level, leaving `Response` construction to the
/// listener layer.
pub fn log_handler_failure(ctx: &HttpContext, error: &RoutingError) {
  error_log!("request {} ({}) failed: {}", ctx.head().id(), ctx.head().path(), error);
}

/// Logs a `NotFound` outcome at info level.
pub fn log_not_found(ctx: &HttpContext) {
  info_log!("request {} not found: {} {}", ctx.head().id(), ctx.head().method(), ctx.head().path());
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::context::RequestHead;
  use crate::method::HttpMethod;

  #[test]
  fn log_helpers_do_not_panic_without_the_log_feature() {
    let ctx = HttpContext::new(RequestHead::new(HttpMethod::Get, "/missing"));
    log_not_found(&ctx);
    log_handler_failure(&ctx, &RoutingError::NotFound(crate::error::NotFoundError {
      method: "GET".to_string(),
      path: "/missing".to_string(),
    }));
  }
}
