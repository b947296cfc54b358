use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

use crate::utils;

/// Generates a chainable `with_<field>` setter for every named field.
/// `Option<T>` fields take a `T` and store `Some(value)`.
pub fn derive_with_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return syn::Error::new_spanned(&name, "`With` can only be derived for structs")
            .to_compile_error()
            .into();
    };
    let Fields::Named(named) = &data.fields else {
        return syn::Error::new_spanned(&name, "`With` requires named fields")
            .to_compile_error()
            .into();
    };

    let setters = named.named.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        if ident.to_string().starts_with('_') {
            return None;
        }
        let method = format_ident!("with_{}", ident);
        let setter = match utils::inner_of_option(&field.ty) {
            Some(inner) => quote! {
                pub fn #method(mut self, #ident: impl Into<#inner>) -> Self {
                    self.#ident = Some(#ident.into());
                    self
                }
            },
            None => {
                let ty = &field.ty;
                quote! {
                    pub fn #method(mut self, #ident: #ty) -> Self {
                        self.#ident = #ident;
                        self
                    }
                }
            }
        };
        Some(setter)
    });

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #(#setters)*
        }
    };

    TokenStream::from(expanded)
}
