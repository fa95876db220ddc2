//! `#[step]` - labelled steps from plain functions.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Ident, ItemFn, LitStr, ReturnType, Token, parse::Parse, parse_macro_input};

/// Arguments for the `#[step]` macro.
pub(crate) struct StepArgs {
    pub name: Option<String>,
    pub label: Option<String>,
}

impl Parse for StepArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut label = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                "label" => {
                    let lit: LitStr = input.parse()?;
                    label = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(StepArgs { name, label })
    }
}

/// Implementation of the `#[step]` macro.
pub fn step_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as StepArgs);
    let input = parse_macro_input!(item as ItemFn);

    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let fn_block = &input.block;
    let fn_output = &input.sig.output;
    let asyncness = &input.sig.asyncness;

    if !input.sig.inputs.is_empty() {
        return syn::Error::new_spanned(
            &input.sig.inputs,
            "Step function must not take arguments",
        )
        .to_compile_error()
        .into();
    }

    if !input.sig.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.sig.generics,
            "Step function must not be generic",
        )
        .to_compile_error()
        .into();
    }

    let struct_name = match args.name {
        Some(ref custom_name) => Ident::new(custom_name, fn_name.span()),
        None => fn_name.clone(),
    };
    let label = args.label.unwrap_or_else(|| struct_name.to_string());

    let docs = input
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"));

    let run_body: proc_macro2::TokenStream = match (fn_output, asyncness.is_some()) {
        (ReturnType::Default, true) => quote! { Self::__body().await; },
        (ReturnType::Default, false) => quote! { Self::__body(); },
        (ReturnType::Type(..), true) => quote! { Self::__body().await?; },
        (ReturnType::Type(..), false) => quote! { Self::__body()?; },
    };

    let step_impl = if asyncness.is_some() {
        quote! {
            impl ::rensa::Step for #struct_name {
                async fn enter(&self) -> ::core::result::Result<::rensa::Flow, ::rensa::Fault> {
                    ::rensa::LogSink::emit(&*self.sink, Self::LABEL);
                    #run_body
                    ::core::result::Result::Ok(::rensa::Flow::Next)
                }
            }
        }
    } else {
        quote! {
            impl ::rensa::blocking::SyncStep for #struct_name {
                fn enter(&self) -> ::core::result::Result<::rensa::Flow, ::rensa::Fault> {
                    ::rensa::LogSink::emit(&*self.sink, Self::LABEL);
                    #run_body
                    ::core::result::Result::Ok(::rensa::Flow::Next)
                }
            }
        }
    };

    let expanded = quote! {
        #[allow(non_camel_case_types)]
        #[derive(Clone)]
        #(#docs)*
        #[doc = concat!("Auto-generated step from `#[rensa::step]` on `", stringify!(#fn_name), "`")]
        #fn_vis struct #struct_name {
            sink: ::rensa::SharedSink,
        }

        impl #struct_name {
            /// The label written on every entry.
            #fn_vis const LABEL: &'static str = #label;

            /// Create the step, writing to `sink`.
            #fn_vis fn new(sink: ::rensa::SharedSink) -> Self {
                Self { sink }
            }

            #asyncness fn __body() #fn_output #fn_block
        }

        #step_impl
    };

    TokenStream::from(expanded)
}
