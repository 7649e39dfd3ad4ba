//! wayfinder is the request routing core for an embeddable HTTP server: method/path
//! matching, route discovery, and request dispatch. It owns none of the socket, TLS, or
//! byte-parsing layers a full server needs; it is the part in between a listener handing it
//! a request and a handler producing a response.
//!
//! ```
//! use wayfinder::{HttpContext, HttpMethod, RequestHead, RouterBuilder};
//!
//! let router = RouterBuilder::new()
//!     .route_get("/users/:id", |mut ctx: HttpContext| {
//!         let id = ctx.params().get("id").cloned().unwrap_or_default();
//!         ctx.set_property(format!("hello, user {id}"));
//!         ctx.set_responded(true);
//!         ctx
//!     })
//!     .unwrap()
//!     .build();
//!
//! let ctx = HttpContext::new(RequestHead::new(HttpMethod::Get, "/users/42"));
//! let ctx = router.dispatch(ctx).unwrap();
//! assert_eq!(ctx.property::<String>().unwrap(), "hello, user 42");
//! ```

#![warn(missing_docs)]

#[macro_use]
mod util;

pub mod context;
pub mod dispatcher;
pub mod error;
pub mod exclusions;
pub mod method;
pub mod pattern;
pub mod resource;
pub mod route;
pub mod router;
pub mod router_builder;
pub mod table;

pub mod default_functions;

pub use context::{HttpContext, RequestHead};
pub use dispatcher::Dispatcher;
pub use error::{DiscoveryError, NotFoundError, PatternError, RoutingError, RoutingResult};
pub use exclusions::{Exclusions, FrozenExclusions};
pub use method::HttpMethod;
pub use pattern::PathPattern;
pub use resource::{discover_assembly, discover_type, Resource, RouteTemplate};
pub use route::{Handler, HandlerIdentity, Route, RouteIdentity};
pub use router::Router;
pub use router_builder::RouterBuilder;
pub use table::RoutingTable;
pub use util::next_id;

#[cfg(feature = "derive")]
pub use wayfinder_macros::{resource, route};
