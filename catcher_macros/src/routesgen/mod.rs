//! # Command Router Macro
//!
//! This procedural macro generates a `no_std`-compatible command router module
//! from a route table file. The generated `notify` function has the listener
//! signature `fn(&str, &str)`, so the router can be registered on a
//! `CommandCatcher` like any other function listener.
//!
//! ## Macro Input Format
//!
//! ```rust
//! mod <module_name>;
//! message_size = <expression>;
//! path = "<file_path>";
//! ```
//!
//! - `mod <module_name>`: Name of the generated module.
//! - `message_size`: Capacity of the `heapless::String` used for error messages.
//! - `path`: Route table, relative to the invoking crate's manifest directory.
//!
//! ## Route Table Format
//!
//! ```text
//! # comment
//! SET  : handlers::set
//! GET  : handlers::get
//! ```
//!
//! Each handler is called as `handler(parameter: &str)`.
//!
//! ## Generated API
//! - `NUM_ROUTES: usize`
//! - `dispatch(command: &str, parameter: &str) -> Result<(), heapless::String<N>>`
//! - `notify(command: &str, parameter: &str)`
//! - `is_supported_command(command: &str) -> bool`
//! - `get_commands() -> &'static str`

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Expr, Ident, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Struct to parse macro input in the format:
/// `mod <name>; message_size = <expr>; path = "<file_path>"`
struct RouteMacroInput {
    _mod_token: Token![mod],
    mod_name: Ident,
    _semi1: Token![;],
    _message_size_token: Ident,
    _eq_token: Token![=],
    message_size: Expr,
    _semi2: Token![;],
    _path_token: Ident,
    _eq_token2: Token![=],
    path: LitStr,
}

impl Parse for RouteMacroInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let parsed = RouteMacroInput {
            _mod_token: input.parse()?,
            mod_name: input.parse()?,
            _semi1: input.parse()?,
            _message_size_token: input.parse()?,
            _eq_token: input.parse()?,
            message_size: input.parse()?,
            _semi2: input.parse()?,
            _path_token: input.parse()?,
            _eq_token2: input.parse()?,
            path: input.parse()?,
        };
        let _: Option<Token![;]> = input.parse()?;
        Ok(parsed)
    }
}

/// One `COMMAND : handler` line of the route table.
#[derive(Debug, PartialEq)]
pub(crate) struct Route {
    pub command: String,
    pub handler: String,
    pub line: usize,
}

/// Splits a route line at the first lone `:`. Colons of a `::` path
/// separator never split.
fn split_route(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    let at = (0..bytes.len()).find(|&i| {
        bytes[i] == b':'
            && (i == 0 || bytes[i - 1] != b':')
            && bytes.get(i + 1) != Some(&b':')
    })?;
    Some((&line[..at], &line[at + 1..]))
}

/// Parses the route table.
///
/// Blank lines and `#` comments are skipped. Returns a message naming the
/// offending line for malformed entries and duplicate commands.
pub(crate) fn parse_route_table(raw: &str) -> Result<Vec<Route>, String> {
    let mut routes: Vec<Route> = Vec::new();

    for (idx, line) in raw.lines().enumerate() {
        let line_no = idx + 1;
        let line = match line.split_once('#') {
            Some((before, _)) => before.trim(),
            None => line.trim(),
        };
        if line.is_empty() {
            continue;
        }

        let Some((command, handler)) = split_route(line) else {
            return Err(format!("line {line_no}: expected `COMMAND : handler`, got `{line}`"));
        };
        let command = command.trim();
        let handler = handler.trim().trim_end_matches(',').trim();

        if command.is_empty() || command.chars().any(char::is_whitespace) {
            return Err(format!("line {line_no}: invalid command name `{command}`"));
        }
        if handler.is_empty() {
            return Err(format!("line {line_no}: missing handler for `{command}`"));
        }
        if let Some(prev) = routes.iter().find(|r| r.command == command) {
            return Err(format!(
                "line {line_no}: command `{command}` already routed on line {}",
                prev.line
            ));
        }

        routes.push(Route {
            command: command.to_string(),
            handler: handler.to_string(),
            line: line_no,
        });
    }

    Ok(routes)
}

pub fn define_routes_impl(input: TokenStream) -> TokenStream {
    let RouteMacroInput {
        mod_name,
        message_size,
        path,
        ..
    } = parse_macro_input!(input as RouteMacroInput);

    // Resolve path relative to the crate invoking the macro
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    let full_path = std::path::Path::new(&manifest_dir).join(path.value());

    let raw = match std::fs::read_to_string(&full_path) {
        Ok(raw) => raw,
        Err(e) => {
            let msg = format!("failed to read route table {:?}: {}", full_path, e);
            return syn::Error::new(path.span(), msg).to_compile_error().into();
        }
    };

    let routes = match parse_route_table(&raw) {
        Ok(routes) => routes,
        Err(msg) => return syn::Error::new(path.span(), msg).to_compile_error().into(),
    };

    let mut match_arms: Vec<TokenStream2> = vec![];
    let mut commands: Vec<String> = vec![];
    for route in &routes {
        let handler = match syn::parse_str::<syn::Path>(&route.handler) {
            Ok(handler) => handler,
            Err(_) => {
                let msg = format!("line {}: invalid handler path `{}`", route.line, route.handler);
                return syn::Error::new(path.span(), msg).to_compile_error().into();
            }
        };
        let command = &route.command;
        commands.push(command.clone());
        match_arms.push(quote! {
            #command => {
                #handler(parameter);
                Ok(())
            },
        });
    }

    let num_routes = routes.len();
    let command_list = commands.join(" | ");

    let supported: TokenStream2 = if commands.is_empty() {
        quote! { { let _ = command; false } }
    } else {
        quote! { matches!(command, #( #commands )|*) }
    };

    let dispatch_fn: TokenStream2 = quote! {
        #[allow(unused_variables)]
        pub fn dispatch(command: &str, parameter: &str) -> Result<(), heapless::String<{ #message_size }>> {
            match command {
                #( #match_arms )*
                _ => {
                    let mut msg = heapless::String::<{ #message_size }>::new();
                    use core::fmt::Write;
                    let _ = write!(msg, "Unknown command: {}", command);
                    Err(msg)
                },
            }
        }
    };

    let expanded = quote! {
        pub mod #mod_name {
            #[allow(unused_imports)]
            use super::*;

            pub const NUM_ROUTES: usize = #num_routes;

            #dispatch_fn

            /// Listener entry point; unknown commands are ignored.
            pub fn notify(command: &str, parameter: &str) {
                let _ = dispatch(command, parameter);
            }

            pub fn is_supported_command(command: &str) -> bool {
                #supported
            }

            pub fn get_commands() -> &'static str {
                #command_list
            }
        }
    };

    TokenStream::from(expanded)
}

// ================= TESTS ==========================
