//! The immutable, post-`build()` request lifecycle.

use crate::context::HttpContext;
use crate::error::{NotFoundError, RoutingError, RoutingResult};
use crate::route::{Handler, Route};
use crate::table::RoutingTable;
use crate::{debug_log, error_log};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

struct LoopFailure {
  recovered_ctx: HttpContext,
  error: RoutingError,
}

/// The immutable counterpart to `RouterBuilder`. Owns a frozen `RoutingTable` and the
/// before/after hooks; `Send + Sync` so it can be shared as `Arc<Dispatcher>` across
/// request-handling threads.
///
/// There is no runtime phase guard because the type system is the phase guard: a
/// `Dispatcher` has no mutating methods, so once one exists, no code path can register,
/// exclude, or import into the table it owns.
pub struct Dispatcher {
  table: RoutingTable,
  before: Option<Arc<dyn Handler>>,
  after: Option<Arc<dyn Handler>>,
  continue_after_response: bool,
}

impl Dispatcher {
  pub(crate) fn new(
    table: RoutingTable,
    before: Option<Arc<dyn Handler>>,
    after: Option<Arc<dyn Handler>>,
    continue_after_response: bool,
  ) -> Self {
    Dispatcher { table, before, after, continue_after_response }
  }

  /// The frozen routing table this dispatcher serves from.
  pub fn table(&self) -> &RoutingTable {
    &self.table
  }

  /// Run one request through the full lifecycle: match, `before`, matched routes in
  /// registration order (short-circuiting on the first response unless
  /// `continue_after_response` is set), `after`.
  ///
  /// `after` always runs once `before` has succeeded, even if a route handler fails — it
  /// observes a best-effort context reconstructed from the state just before the failing
  /// call, since a failed handler's own return value cannot be recovered by contract.
  /// Returns `NotFound` without running `before`/`after` at all when zero routes match.
  pub fn dispatch(&self, ctx: HttpContext) -> RoutingResult<HttpContext> {
    let matched: Vec<Route> = self.table.route_for(&ctx).into_iter().cloned().collect();
    if matched.is_empty() {
      return Err(RoutingError::NotFound(NotFoundError {
        method: ctx.head().method().to_string(),
        path: ctx.head().path().to_string(),
      }));
    }

    if ctx.responded() {
      return Ok(ctx);
    }

    debug_log!("request {} matched {} route(s)", ctx.head().id(), matched.len());

    let before_snapshot = ctx.recovery_snapshot();
    let ctx = match &self.before {
      Some(before) => match before.invoke(ctx) {
        Ok(ctx) => ctx,
        Err(error) => return self.recover_and_propagate(before_snapshot, error),
      },
      None => ctx,
    };

    match self.run_loop(ctx, &matched) {
      Ok(ctx) => self.run_after(ctx),
      Err(failure) => self.recover_and_propagate(failure.recovered_ctx, failure.error),
    }
  }

  fn run_loop(&self, mut ctx: HttpContext, matched: &[Route]) -> Result<HttpContext, LoopFailure> {
    let mut invoked = 0usize;
    for route in matched {
      let recovery_snapshot = ctx.recovery_snapshot();
      match route.invoke(ctx) {
        Ok(next) => {
          invoked += 1;
          ctx = next;
          if !self.continue_after_response && ctx.responded() {
            break;
          }
        }
        Err(error) => return Err(LoopFailure { recovered_ctx: recovery_snapshot, error }),
      }
    }
    debug_log!("request {} invoked {}/{} matched route(s)", ctx.head().id(), invoked, matched.len());
    Ok(ctx)
  }

  fn run_after(&self, ctx: HttpContext) -> RoutingResult<HttpContext> {
    match &self.after {
      Some(after) => after.invoke(ctx),
      None => Ok(ctx),
    }
  }

  fn recover_and_propagate(&self, recovered: HttpContext, error: RoutingError) -> RoutingResult<HttpContext> {
    if let Some(after) = &self.after {
      if let Err(after_err) = after.invoke(recovered) {
        error_log!("after hook failed while handling a prior failure: {after_err}");
      }
    }
    Err(error)
  }
}

impl Debug for Dispatcher {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Dispatcher")
      .field("routes", &self.table.len())
      .field("continue_after_response", &self.continue_after_response)
      .finish_non_exhaustive()
  }
}
