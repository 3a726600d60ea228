use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Index, parse_macro_input};

// SILENT DEBUG MACRO
// ================================================================================================

/// Derives a Debug implementation that elides fields marked `#[secret]`.
///
/// Fields without the marker are formatted through their own `Debug` implementation, so public
/// material (e.g. the public half of a key pair) stays visible in logs, while every `#[secret]`
/// field is rendered as `<elided>`.
///
/// # Example
///
/// ```ignore
/// #[derive(SilentDebug)]
/// pub struct PrivateKey {
///     public_key: PublicKey,
///     #[secret]
///     scalar: Vec<u8>,
/// }
///
/// // PrivateKey { public_key: PublicKey { .. }, scalar: <elided> }
/// ```
#[proc_macro_derive(SilentDebug, attributes(secret))]
pub fn silent_debug(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let body = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => {
                let entries = fields.named.iter().map(|field| {
                    let ident = field.ident.as_ref().expect("named fields have identifiers");
                    let label = ident.to_string();
                    let value = field_value(field, quote! { self.#ident });
                    quote! { .field(#label, #value) }
                });
                quote! { f.debug_struct(stringify!(#name)) #(#entries)* .finish() }
            },
            Fields::Unnamed(fields) => {
                let entries = fields.unnamed.iter().enumerate().map(|(i, field)| {
                    let index = Index::from(i);
                    let value = field_value(field, quote! { self.#index });
                    quote! { .field(#value) }
                });
                quote! { f.debug_tuple(stringify!(#name)) #(#entries)* .finish() }
            },
            Fields::Unit => quote! { f.write_str(stringify!(#name)) },
        },
        _ => {
            return syn::Error::new_spanned(&ast, "SilentDebug can only be derived for structs")
                .to_compile_error()
                .into();
        },
    };

    let expanded = quote! {
        impl #impl_generics ::core::fmt::Debug for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}

// HELPERS
// ================================================================================================

fn is_secret(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident("secret"))
}

fn field_value(field: &Field, access: TokenStream2) -> TokenStream2 {
    if is_secret(field) {
        quote! { &::core::format_args!("<elided>") }
    } else {
        quote! { &#access }
    }
}
