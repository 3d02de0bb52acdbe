use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{LitStr, Token, parse_macro_input};
use taal_core::i18n::loader::load_locale_file;

struct Args {
    namespace: LitStr,
    dir: LitStr,
}

impl Parse for Args {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let namespace = input.parse()?;
        input.parse::<Token![,]>()?;
        let dir = input.parse()?;
        let _ = input.parse::<Option<Token![,]>>()?;
        Ok(Args { namespace, dir })
    }
}

/// Embed a directory of locale files as a `taal_core::TranslationTable`.
///
/// ```ignore
/// let table = translations!("Greeting", "src/modules/greeting/locales");
/// ```
///
/// The directory is resolved against `CARGO_MANIFEST_DIR`. Each `<lang>.json`
/// or `<lang>.toml` file must be a flat map of strings; anything else is a
/// compile error. Edits to the files trigger a rebuild.
#[proc_macro]
pub fn translations(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as Args);
    expand(args)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(args: Args) -> syn::Result<proc_macro2::TokenStream> {
    let namespace = args.namespace.value();
    let dir = args.dir.value();
    let span = args.dir.span();

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| syn::Error::new(Span::call_site(), "CARGO_MANIFEST_DIR is not set"))?;
    let dir_path = std::path::Path::new(&manifest_dir).join(&dir);
    if !dir_path.is_dir() {
        return Err(syn::Error::new(
            span,
            format!("locale directory not found: {}", dir_path.display()),
        ));
    }

    let pattern = format!("{}/*", dir_path.display());
    let entries = glob::glob(&pattern).map_err(|e| syn::Error::new(span, e.to_string()))?;

    let mut tracked_files = Vec::new();
    let mut inserts = Vec::new();

    for entry in entries {
        let path = entry.map_err(|e| syn::Error::new(span, e.to_string()))?;
        if path.is_dir() {
            continue;
        }

        let Some((language, messages)) =
            load_locale_file(&path).map_err(|e| syn::Error::new(span, e.to_string()))?
        else {
            continue;
        };

        let abs_path = path
            .canonicalize()
            .map_err(|e| syn::Error::new(span, format!("{}: {}", path.display(), e)))?;
        let abs_path_str = abs_path.to_string_lossy().into_owned();
        tracked_files.push(quote! { const _: &[u8] = include_bytes!(#abs_path_str); });

        let language = language.as_str();
        for (key, value) in &messages {
            inserts.push(quote! {
                table.insert(#language, #namespace, #key, #value);
            });
        }
    }

    Ok(quote! {
        {
            #(#tracked_files)*
            let mut table = ::taal_core::TranslationTable::new();
            #(#inserts)*
            table
        }
    })
}
