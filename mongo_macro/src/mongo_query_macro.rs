use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, LitStr};

enum Op {
    Eq,
    Gt,
    Lt,
    Like,
}

pub fn derive_query_filter(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let struct_name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(input, "QueryFilter only supports structs"));
    };

    let mut handlers = vec![];
    for field in &data.fields {
        let Some(ident) = field.ident.clone() else { continue };
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("query")) {
            let mut op = None;
            let mut column = ident.to_string();
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("eq") {
                    op = Some(Op::Eq);
                } else if meta.path.is_ident("gt") {
                    op = Some(Op::Gt);
                } else if meta.path.is_ident("lt") {
                    op = Some(Op::Lt);
                } else if meta.path.is_ident("like") {
                    op = Some(Op::Like);
                } else if meta.path.is_ident("field") {
                    column = meta.value()?.parse::<LitStr>()?.value();
                } else {
                    return Err(meta.error("unsupported query option"));
                }
                Ok(())
            })?;

            let handler = match op {
                Some(Op::Eq) => quote! {
                    if let Some(val) = &self.#ident {
                        doc.insert(#column, to_bson(val)?);
                    }
                },
                Some(Op::Gt) => quote! {
                    if let Some(val) = &self.#ident {
                        doc.insert(#column, doc! { "$gt": to_bson(val)? });
                    }
                },
                Some(Op::Lt) => quote! {
                    if let Some(val) = &self.#ident {
                        doc.insert(#column, doc! { "$lt": to_bson(val)? });
                    }
                },
                Some(Op::Like) => quote! {
                    if let Some(val) = &self.#ident {
                        doc.insert(#column, doc! {
                            "$regex": ::common::util::common_utils::regex_escape(val),
                            "$options": "i"
                        });
                    }
                },
                None => return Err(syn::Error::new_spanned(attr, "query needs one of eq, gt, lt, like")),
            };
            handlers.push(handler);
        }
    }

    Ok(quote! {
        impl #struct_name {
            pub fn to_query_doc(&self) -> ::std::result::Result<::common::mongodb::bson::Document, ::common::mongodb::bson::ser::Error> {
                use ::common::mongodb::bson::{doc, to_bson};
                let mut doc = doc! {};
                #(#handlers)*
                Ok(doc)
            }
        }
    })
}
