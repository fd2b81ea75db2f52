use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Attribute, DeriveInput, LitStr, Token};

struct IndexSpec {
    fields: Vec<String>,
    unique: bool,
    order: i32,
    name: Option<String>,
    partial: Option<String>,
}

pub fn expand_index_model_provider(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match expand(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let mut models = vec![];
    for attr in ast.attrs.iter().filter(|a| a.path().is_ident("mongo_index")) {
        let spec = parse_index(attr)?;
        models.push(build_model(&spec));
    }

    Ok(quote! {
        impl ::common::index_trait::MongoIndexModelProvider for #name {
            fn index_models() -> Vec<::common::mongodb::IndexModel> {
                vec![
                    #(#models),*
                ]
            }
        }
    })
}

fn parse_index(attr: &Attribute) -> syn::Result<IndexSpec> {
    let mut spec = IndexSpec { fields: vec![], unique: false, order: 1, name: None, partial: None };

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("fields") {
            let content;
            syn::parenthesized!(content in meta.input);
            let lits = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            spec.fields = lits.iter().map(LitStr::value).collect();
            Ok(())
        } else if meta.path.is_ident("unique") {
            spec.unique = true;
            Ok(())
        } else if meta.path.is_ident("name") {
            spec.name = Some(meta.value()?.parse::<LitStr>()?.value());
            Ok(())
        } else if meta.path.is_ident("partial") {
            spec.partial = Some(meta.value()?.parse::<LitStr>()?.value());
            Ok(())
        } else if meta.path.is_ident("order") {
            let order = meta.value()?.parse::<LitStr>()?.value();
            spec.order = if order.eq_ignore_ascii_case("desc") { -1 } else { 1 };
            Ok(())
        } else {
            Err(meta.error("unsupported mongo_index option"))
        }
    })?;

    if spec.fields.is_empty() {
        return Err(syn::Error::new_spanned(attr, "mongo_index requires fields(\"...\")"));
    }
    Ok(spec)
}

fn build_model(spec: &IndexSpec) -> TokenStream {
    let order = spec.order;
    let field_names = &spec.fields;
    // Index names are how existing indexes are recognised at startup.
    let index_name = spec.name.clone().unwrap_or_else(|| format!("idx_{}", spec.fields.join("_")));

    let unique = if spec.unique {
        quote! { .unique(true) }
    } else {
        quote! {}
    };
    let partial = match &spec.partial {
        Some(field) => quote! {
            .partial_filter_expression(::common::mongodb::bson::doc! { #field: { "$exists": true } })
        },
        None => quote! {},
    };

    quote! {
        {
            let mut keys = ::common::mongodb::bson::Document::new();
            #( keys.insert(#field_names, #order); )*
            let options = ::common::mongodb::options::IndexOptions::builder()
                .name(Some(#index_name.to_string()))
                #unique
                #partial
                .build();
            ::common::mongodb::IndexModel::builder().keys(keys).options(options).build()
        }
    }
}
