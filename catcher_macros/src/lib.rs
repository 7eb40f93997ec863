extern crate proc_macro;

mod routesgen;

use proc_macro::TokenStream;
use routesgen::define_routes_impl;

/// Generates a command router module from a route table file.
///
/// ```rust
/// define_routes! {
///     mod routes;
///     message_size = 64;
///     path = "src/routes.cfg"
/// }
///
/// catcher.add_function(routes::notify);
/// ```
#[proc_macro]
pub fn define_routes(input: TokenStream) -> TokenStream {
    define_routes_impl(input)
}
