use syn::{
    AngleBracketedGenericArguments, Field, GenericArgument, LitStr, PathArguments, Type, TypePath,
};

/// How a `KvDisplay` field renders its value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KvFormat {
    Display,
    /// `Option<PathBuf>`-like fields: the path, or `-` when unset.
    OptionalPath,
}

/// Reads `#[kv(fmt = "opt_path")]` from a field; fields without it use
/// their `Display` impl.
pub fn parse_kv_format(field: &Field) -> syn::Result<KvFormat> {
    let mut format = KvFormat::Display;
    for attr in &field.attrs {
        if !attr.path().is_ident("kv") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("fmt") {
                return Err(meta.error("unsupported kv attribute; expected fmt = \"...\""));
            }
            let lit: LitStr = meta.value()?.parse()?;
            if lit.value() != "opt_path" {
                return Err(syn::Error::new(
                    lit.span(),
                    format!("unsupported kv fmt mode: {}", lit.value()),
                ));
            }
            format = KvFormat::OptionalPath;
            Ok(())
        })?;
    }
    Ok(format)
}

pub fn inner_of_option(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { path, .. }) = ty else {
        return None;
    };
    let is_option = match path.segments.len() {
        1 => path.segments[0].ident == "Option",
        3 => {
            (path.segments[0].ident == "std" || path.segments[0].ident == "core")
                && path.segments[1].ident == "option"
                && path.segments[2].ident == "Option"
        }
        _ => false,
    };
    if !is_option {
        return None;
    }

    if let Some(seg) = path.segments.last()
        && let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) =
            &seg.arguments
        && let Some(GenericArgument::Type(t)) = args.first()
    {
        return Some(t);
    }
    None
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
