// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Procedural macros for declaring unit tests.
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{
    Error, Expr, ExprLit, ItemFn, Lit, LitStr, MetaNameValue, Result, Token,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
};

/// Marks a function as a unit test.
///
/// # Example
///
/// ```ignore
/// use unittest::{Context, def_test, expect};
///
/// #[def_test]
/// fn test_addition(ctx: &mut Context<'_>) {
///     expect!(ctx, "sum", 2 + 2 == 4);
/// }
/// ```
///
/// The function takes exactly one argument, the `&mut Context` of the
/// running test, and returns nothing. A static `TestDescriptor` is placed in
/// `unittest::TESTS`; `unittest::init()` registers it.
///
/// # Attributes
/// - `#[def_test]` - module is the last segment of the enclosing module path
/// - `#[def_test(module = "Math")]` - explicit module name
/// - `#[def_test(name = "shared")]` - explicit test name instead of the
///   function name
#[proc_macro_attribute]
pub fn def_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as TestArgs);
    let input = parse_macro_input!(item as ItemFn);
    generate_function_test(args, input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

#[derive(Default)]
struct TestArgs {
    module: Option<LitStr>,
    name: Option<LitStr>,
}

impl Parse for TestArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = TestArgs::default();
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;
        for pair in pairs {
            let value = match &pair.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.clone(),
                other => return Err(Error::new_spanned(other, "expect a string literal")),
            };
            let slot = if pair.path.is_ident("module") {
                &mut args.module
            } else if pair.path.is_ident("name") {
                &mut args.name
            } else {
                return Err(Error::new_spanned(
                    &pair.path,
                    "unknown attribute, expect `module` or `name`",
                ));
            };
            if slot.replace(value).is_some() {
                return Err(Error::new_spanned(&pair.path, "duplicate attribute"));
            }
        }
        Ok(args)
    }
}

/// Generate test code for a single function
fn generate_function_test(args: TestArgs, input: ItemFn) -> Result<proc_macro2::TokenStream> {
    let sig = &input.sig;
    if sig.inputs.len() != 1 {
        return Err(Error::new_spanned(
            &sig.inputs,
            "expect exactly one argument: `ctx: &mut unittest::Context<'_>`",
        ));
    }
    if let syn::ReturnType::Type(..) = sig.output {
        return Err(Error::new_spanned(
            &sig.output,
            "expect no return value for the test function",
        ));
    }
    if sig.asyncness.is_some() || !sig.generics.params.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "expect a plain, non-generic, synchronous test function",
        ));
    }

    let fn_name = &sig.ident;
    // `r#match` is registered as `match`
    let fn_name_str = fn_name.unraw().to_string();

    // Generate a unique identifier for the test descriptor
    let descriptor_name = format_ident!("__UNITTEST_DESCRIPTOR_{}", fn_name_str.to_uppercase());

    let module = match &args.module {
        Some(lit) => quote!(#lit),
        None => quote!(::unittest::__module_name(module_path!())),
    };
    let name = match &args.name {
        Some(lit) => quote!(#lit),
        None => quote!(#fn_name_str),
    };

    Ok(quote! {
        #input

        #[::unittest::linkme::distributed_slice(::unittest::TESTS)]
        #[linkme(crate = ::unittest::linkme)]
        #[allow(non_upper_case_globals)]
        static #descriptor_name: ::unittest::TestDescriptor =
            ::unittest::TestDescriptor::new(#module, #name, #fn_name);
    })
}
