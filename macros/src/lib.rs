//! Implementation of the `#[resource]`/`#[route]` discovery attributes for `wayfinder`.
//!
//! Rust has no runtime reflection over types or annotations, so these macros do at compile
//! time what the distilled routing spec expects a reflection pass to do at runtime: scan an
//! `impl` block for `#[route(...)]`-annotated methods and emit a `wayfinder::Resource`
//! implementation that lists them, already bound to a constructed receiver.

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Expr, ExprLit, ImplItem, ItemImpl, Lit, Meta, Token};

fn pascal_case_method(ident: &str) -> String {
  let mut chars = ident.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    None => String::new(),
  }
}

fn parse_route_attr(attr: &syn::Attribute) -> (proc_macro2::TokenStream, String) {
  let mut method_tokens = quote!(::wayfinder::HttpMethod::All);
  let mut path_info = String::new();

  if let Meta::List(list) = &attr.meta {
    let nested = Punctuated::<Meta, Token![,]>::parse_terminated
      .parse2(list.tokens.clone())
      .unwrap_or_default();

    for meta in nested {
      let Meta::NameValue(nv) = meta else { continue };

      if nv.path.is_ident("method") {
        if let Expr::Path(p) = &nv.value {
          if let Some(ident) = p.path.get_ident() {
            let variant = syn::Ident::new(&pascal_case_method(&ident.to_string()), ident.span());
            method_tokens = quote!(::wayfinder::HttpMethod::#variant);
          }
        }
      } else if nv.path.is_ident("path") {
        if let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = &nv.value {
          path_info = s.value();
        }
      }
    }
  }

  (method_tokens, path_info)
}

fn parse_resource_attr(attr: TokenStream) -> (String, String) {
  let mut base_path = String::new();
  let mut scope = String::new();

  let parser = Punctuated::<Meta, Token![,]>::parse_terminated;
  let Ok(args) = parser.parse(attr) else {
    return (base_path, scope);
  };

  for meta in args {
    let Meta::NameValue(nv) = meta else { continue };
    if nv.path.is_ident("base_path") {
      if let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = &nv.value {
        base_path = s.value();
      }
    } else if nv.path.is_ident("scope") {
      if let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = &nv.value {
        scope = s.value();
      }
    }
  }

  (base_path, scope)
}

/// Marks an `impl` block as a discoverable resource. `base_path` (default `""`) is joined
/// in front of every route the block declares; `scope` (default `""`) is compared against a
/// router's scope filter during discovery.
///
/// The annotated type must implement `Clone`: each discovered route needs an owned receiver
/// it can invoke independently of the `&self` borrow `Resource::routes` is called through.
#[proc_macro_attribute]
pub fn resource(attr: TokenStream, item: TokenStream) -> TokenStream {
  let (base_path, scope) = parse_resource_attr(attr);
  let mut item_impl = parse_macro_input!(item as ItemImpl);
  let self_ty = item_impl.self_ty.clone();

  let mut route_entries = Vec::new();

  for impl_item in &mut item_impl.items {
    let ImplItem::Fn(method) = impl_item else { continue };

    let mut route_attrs = Vec::new();
    let mut kept_attrs = Vec::new();
    for attr in method.attrs.drain(..) {
      if attr.path().is_ident("route") {
        route_attrs.push(attr);
      } else {
        kept_attrs.push(attr);
      }
    }
    method.attrs = kept_attrs;

    let method_name = method.sig.ident.clone();
    let method_name_str = method_name.to_string();

    for attr in &route_attrs {
      let (method_tokens, path_info) = parse_route_attr(attr);
      route_entries.push(quote! {
        ::wayfinder::RouteTemplate {
          method: #method_tokens,
          path_info: #path_info.to_string(),
          method_name: #method_name_str,
          handler: {
            let receiver = ::std::clone::Clone::clone(self);
            ::std::sync::Arc::new(move |ctx: ::wayfinder::HttpContext| receiver.#method_name(ctx))
              as ::std::sync::Arc<dyn ::wayfinder::Handler>
          },
        }
      });
    }
  }

  let expanded = quote! {
    #item_impl

    impl ::wayfinder::Resource for #self_ty {
      fn type_id(&self) -> ::std::any::TypeId {
        ::std::any::TypeId::of::<#self_ty>()
      }

      fn type_name(&self) -> &'static str {
        ::std::any::type_name::<#self_ty>()
      }

      fn namespace(&self) -> &'static str {
        ::std::module_path!()
      }

      fn base_path(&self) -> &str {
        #base_path
      }

      fn scope(&self) -> &str {
        #scope
      }

      fn routes(&self) -> ::std::vec::Vec<::wayfinder::RouteTemplate> {
        ::std::vec![#(#route_entries),*]
      }
    }
  };

  expanded.into()
}

/// Marks a method of a `#[resource]`-annotated `impl` block as a route. `method` (an
/// identifier such as `GET`, defaulting to matching any method) and `path` (a string,
/// defaulting to empty) describe the route; `#[resource]` consumes this attribute while
/// expanding, so it never needs to be resolved on its own.
#[proc_macro_attribute]
pub fn route(_attr: TokenStream, item: TokenStream) -> TokenStream {
  item
}
