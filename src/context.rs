//! The slice of `HttpContext` the routing core actually touches.
//!
//! The listener, socket and byte-level request/response types are out of scope for this
//! crate; a hosting layer is expected to construct one `HttpContext` per request, hand it to
//! `Dispatcher::dispatch`, and translate the resulting state into bytes on the wire.

use crate::method::HttpMethod;
use crate::util::next_id;
use std::any::Any;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// The immutable part of an inbound request that the router matches against.
#[derive(Debug, Clone)]
pub struct RequestHead {
  method: HttpMethod,
  path: String,
  id: u64,
  name: String,
}

impl RequestHead {
  /// Build a new request head. `path` must begin with `/`; this is the caller's
  /// responsibility since URL-decoding happens upstream of this crate.
  pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
    let path = path.into();
    RequestHead { method, name: path.clone(), path, id: next_id() }
  }

  /// Override the opaque, process-local id normally assigned by `new`. Mostly useful in
  /// tests that want deterministic ids.
  pub fn with_id(mut self, id: u64) -> Self {
    self.id = id;
    self
  }

  /// Override the human-readable label used in logs. Defaults to the path.
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  /// The method this request arrived with.
  pub fn method(&self) -> HttpMethod {
    self.method
  }

  /// The request path, beginning with `/`.
  pub fn path(&self) -> &str {
    &self.path
  }

  /// Opaque, monotonic, process-local id. Only useful for correlating log lines.
  pub fn id(&self) -> u64 {
    self.id
  }

  /// Human-readable label for this request, for logs.
  pub fn name(&self) -> &str {
    &self.name
  }
}

/// The request-scoped state the routing core reads and writes while dispatching.
///
/// Carries no stream, no body, and performs no I/O: it is a pure data carrier between the
/// hosting layer and the handlers it invokes.
pub struct HttpContext {
  head: RequestHead,
  params: HashMap<String, String>,
  responded: bool,
  properties: Option<Box<dyn Any + Send>>,
}

impl HttpContext {
  /// Construct a fresh context for a request that has not been matched or dispatched yet.
  pub fn new(head: RequestHead) -> Self {
    HttpContext { head, params: HashMap::new(), responded: false, properties: None }
  }

  /// The request head this context was built from.
  pub fn head(&self) -> &RequestHead {
    &self.head
  }

  /// Path parameters captured by the route currently being invoked. Overwritten (per
  /// same-named key) before every handler invocation by the dispatch loop.
  pub fn params(&self) -> &HashMap<String, String> {
    &self.params
  }

  /// Mutable access to the captured path parameters, for handlers that need to add to them.
  pub fn params_mut(&mut self) -> &mut HashMap<String, String> {
    &mut self.params
  }

  /// Merge freshly captured parameters into this context, overwriting same-named keys.
  pub(crate) fn merge_params(&mut self, captured: HashMap<String, String>) {
    self.params.extend(captured);
  }

  /// Whether a handler has already committed a response for this request.
  pub fn responded(&self) -> bool {
    self.responded
  }

  /// Mark this context as having a committed response. Handlers call this once they have
  /// produced a response; the dispatch loop observes it to short-circuit.
  pub fn set_responded(&mut self, responded: bool) {
    self.responded = responded;
  }

  /// Stash host-application state alongside this request. The core never reads or
  /// interprets this value.
  pub fn set_property<T: Any + Send>(&mut self, value: T) {
    self.properties = Some(Box::new(value));
  }

  /// Retrieve previously stashed host-application state, if it is of type `T`.
  pub fn property<T: Any + Send>(&self) -> Option<&T> {
    self.properties.as_ref().and_then(|b| b.downcast_ref::<T>())
  }

  /// Mutable access to previously stashed host-application state, if it is of type `T`.
  pub fn property_mut<T: Any + Send>(&mut self) -> Option<&mut T> {
    self.properties.as_mut().and_then(|b| b.downcast_mut::<T>())
  }

  /// A best-effort reconstruction of this context's head and params, used by the
  /// dispatcher to hand something to the `after` hook when a handler consumes and then
  /// fails to return a context. The property bag cannot be recovered this way since it
  /// isn't `Clone`; a failing handler that replaced it loses that state.
  pub(crate) fn recovery_snapshot(&self) -> HttpContext {
    HttpContext {
      head: self.head.clone(),
      params: self.params.clone(),
      responded: self.responded,
      properties: None,
    }
  }
}

impl Debug for HttpContext {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HttpContext")
      .field("head", &self.head)
      .field("params", &self.params)
      .field("responded", &self.responded)
      .finish_non_exhaustive()
  }
}
