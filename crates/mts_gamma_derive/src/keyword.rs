use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Variant, parse_macro_input};

use crate::utils;

/// Enum-level `#[keyword(...)]` settings.
#[derive(Default)]
struct KeywordEnum {
    /// Human name used in parse errors; defaults to the kebab-cased enum name.
    setting: Option<String>,
    /// Environment variable the value is read from, if any.
    env: Option<String>,
}

struct KeywordVariant {
    ident: Ident,
    canonical: String,
    aliases: Vec<String>,
}

/// Unit-variant enums that read from and render as a lowercase keyword.
///
/// Generates `FromStr` (trimmed, ASCII case-insensitive, aliases accepted),
/// `as_str`, `Display` and, when `env = "..."` is given, an `ENV` constant.
pub fn derive_keyword_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(ident, "Keyword can only be derived for enums"));
    };

    let settings = enum_settings(&input.attrs)?;
    let variants = data
        .variants
        .iter()
        .map(keyword_variant)
        .collect::<syn::Result<Vec<_>>>()?;

    let setting = settings
        .setting
        .unwrap_or_else(|| utils::to_kebab_case(&ident.to_string()).replace('-', " "));
    let expected = variants
        .iter()
        .map(|v| v.canonical.as_str())
        .collect::<Vec<_>>()
        .join("|");
    let subject = match &settings.env {
        Some(env) => quote! { format!("{}={}", #env, raw.trim()) },
        None => quote! { raw.trim().to_string() },
    };
    let env_const = settings.env.as_ref().map(|env| {
        quote! {
            /// Environment variable this setting is read from.
            pub const ENV: &'static str = #env;
        }
    });

    let parse_arms = variants.iter().map(|v| {
        let variant = &v.ident;
        let names = std::iter::once(&v.canonical).chain(&v.aliases);
        quote! { #(#names)|* => Ok(Self::#variant), }
    });
    let name_arms = variants.iter().map(|v| {
        let variant = &v.ident;
        let canonical = &v.canonical;
        quote! { Self::#variant => #canonical, }
    });

    Ok(quote! {
        impl #ident {
            #env_const

            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }

        impl std::str::FromStr for #ident {
            type Err = crate::Error;

            fn from_str(raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_config(format!(
                        "{} is not a known {} (expected {})",
                        #subject,
                        #setting,
                        #expected
                    ))),
                }
            }
        }

        impl std::fmt::Display for #ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    })
}

fn enum_settings(attrs: &[Attribute]) -> syn::Result<KeywordEnum> {
    let mut settings = KeywordEnum::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("keyword")) {
        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("setting") {
                &mut settings.setting
            } else if meta.path.is_ident("env") {
                &mut settings.env
            } else {
                return Err(meta.error("expected `setting = \"...\"` or `env = \"...\"`"));
            };
            let lit: LitStr = meta.value()?.parse()?;
            *slot = Some(lit.value());
            Ok(())
        })?;
    }
    Ok(settings)
}

fn keyword_variant(variant: &Variant) -> syn::Result<KeywordVariant> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new_spanned(
            variant,
            "Keyword only supports unit variants",
        ));
    }

    let mut canonical = utils::to_kebab_case(&variant.ident.to_string());
    let mut aliases = Vec::new();
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("keyword")) {
        attr.parse_nested_meta(|meta| {
            let lit: LitStr = meta.value()?.parse()?;
            if meta.path.is_ident("name") {
                canonical = lit.value();
            } else if meta.path.is_ident("alias") {
                aliases.push(lit.value());
            } else {
                return Err(meta.error("expected `name = \"...\"` or `alias = \"...\"`"));
            }
            Ok(())
        })?;
    }

    Ok(KeywordVariant {
        ident: variant.ident.clone(),
        canonical,
        aliases,
    })
}
