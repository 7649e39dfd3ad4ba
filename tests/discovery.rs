use std::any::TypeId;
use std::sync::Arc;
use wayfinder::{Exclusions, Handler, HttpContext, HttpMethod, Resource, RouteTemplate, RouterBuilder};

mod foo {
  use super::*;

  #[derive(Clone)]
  pub struct Widgets;

  impl Resource for Widgets {
    fn type_id(&self) -> TypeId {
      TypeId::of::<Widgets>()
    }
    fn type_name(&self) -> &'static str {
      "foo::Widgets"
    }
    fn namespace(&self) -> &'static str {
      "foo"
    }
    fn base_path(&self) -> &str {
      "widgets"
    }
    fn routes(&self) -> Vec<RouteTemplate> {
      vec![RouteTemplate {
        method: HttpMethod::Get,
        path_info: "/:id".to_string(),
        method_name: "get_one",
        handler: Arc::new(|mut ctx: HttpContext| {
          ctx.set_responded(true);
          ctx
        }) as Arc<dyn Handler>,
      }]
    }
  }
}

mod bar {
  use super::*;

  #[derive(Clone)]
  pub struct Gadgets;

  impl Resource for Gadgets {
    fn type_id(&self) -> TypeId {
      TypeId::of::<Gadgets>()
    }
    fn type_name(&self) -> &'static str {
      "bar::Gadgets"
    }
    fn namespace(&self) -> &'static str {
      "bar"
    }
    fn base_path(&self) -> &str {
      "gadgets"
    }
    fn routes(&self) -> Vec<RouteTemplate> {
      vec![RouteTemplate {
        method: HttpMethod::Get,
        path_info: "/:id".to_string(),
        method_name: "get_one",
        handler: Arc::new(|mut ctx: HttpContext| {
          ctx.set_responded(true);
          ctx
        }) as Arc<dyn Handler>,
      }]
    }
  }
}

#[test]
fn excluding_a_namespace_drops_only_that_resources_routes() {
  let resources: Vec<Box<dyn Resource>> = vec![Box::new(foo::Widgets), Box::new(bar::Gadgets)];

  let builder = RouterBuilder::new().exclude_namespace("foo").assembly(&resources).unwrap();
  let dispatcher = builder.build();

  use wayfinder::{HttpMethod as M, RequestHead};
  assert!(matches!(
    dispatcher.dispatch(HttpContext::new(RequestHead::new(M::Get, "/widgets/1"))),
    Err(wayfinder::RoutingError::NotFound(_))
  ));
  assert!(dispatcher.dispatch(HttpContext::new(RequestHead::new(M::Get, "/gadgets/1"))).unwrap().responded());
}

#[test]
fn exclusions_is_usable_standalone() {
  let mut exclusions = Exclusions::new();
  exclusions.exclude_type(TypeId::of::<foo::Widgets>());
  assert!(exclusions.is_excluded(TypeId::of::<foo::Widgets>(), "anything"));
  assert!(!exclusions.is_excluded(TypeId::of::<bar::Gadgets>(), "anything"));
}

#[test]
fn base_path_is_joined_in_front_of_every_declared_route() {
  let resources: Vec<Box<dyn Resource>> = vec![Box::new(foo::Widgets)];
  let builder = RouterBuilder::new().assembly(&resources).unwrap();
  assert_eq!(builder.route_count(), 1);
}
