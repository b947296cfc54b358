mod keyword;
mod kv_display;
mod timer;
mod utils;
mod with;

use proc_macro::TokenStream;

/// Logs the wall-clock time spent in the annotated function at debug level.
/// The label defaults to the function name.
#[proc_macro_attribute]
pub fn timer(attr: TokenStream, item: TokenStream) -> TokenStream {
    timer::timer_inner(attr, item)
}

#[proc_macro_derive(Keyword, attributes(keyword))]
pub fn derive_keyword(item: TokenStream) -> TokenStream {
    keyword::derive_keyword_inner(item)
}

#[proc_macro_derive(KvDisplay, attributes(kv))]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    kv_display::derive_kv_display_inner(item)
}

#[proc_macro_derive(With)]
pub fn derive_with(item: TokenStream) -> TokenStream {
    with::derive_with_inner(item)
}
