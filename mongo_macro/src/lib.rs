extern crate proc_macro;

mod mongo_index_macro;
mod mongo_query_macro;

use proc_macro::TokenStream;

/// Declares the MongoDB indexes of an entity.
///
/// ```ignore
/// #[derive(MongoIndexModelProvider)]
/// #[mongo_index(fields("email"), unique)]
/// #[mongo_index(fields("program_id", "user_id"), unique, name = "uk_program_user", partial = "user_id")]
/// pub struct Entity { .. }
/// ```
///
/// `partial = "field"` limits the index to documents where `field` exists, so
/// optional keys only collide when both documents carry them.
#[proc_macro_derive(MongoIndexModelProvider, attributes(mongo_index))]
pub fn mongo_index_model_provider(input: TokenStream) -> TokenStream {
    mongo_index_macro::expand_index_model_provider(input)
}

/// Generates `to_query_doc()` for a query DTO whose `Option` fields carry
/// `#[query(eq | gt | lt | like, field = "...")]`. Absent fields add nothing.
#[proc_macro_derive(QueryFilter, attributes(query))]
pub fn derive_query_filter(input: TokenStream) -> TokenStream {
    mongo_query_macro::derive_query_filter(input)
}
