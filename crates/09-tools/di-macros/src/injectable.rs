//! Injectable 派生宏实现

use crate::utils::{is_skipped, named_fields, slot_name};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable_impl(input: &DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let fields = named_fields(input)?;

    let mut names = Vec::new();
    let mut idents = Vec::new();
    let mut types = Vec::new();

    for field in &fields.named {
        if is_skipped(field)? {
            continue;
        }
        let (Some(ident), Some(name)) = (field.ident.as_ref(), slot_name(field)) else {
            continue;
        };
        names.push(name);
        idents.push(ident);
        types.push(&field.ty);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::di_abstractions::Destination for #struct_name #ty_generics #where_clause {
            fn shape(&self) -> ::di_abstractions::DestinationShape {
                ::di_abstractions::DestinationShape::new()
                    #(.with_field(#names, ::di_abstractions::TypeKey::of::<#types>()))*
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                field: &::di_abstractions::FieldSlot,
                value: ::di_abstractions::Value,
            ) -> ::di_abstractions::DependencyResult<()> {
                match field.name.as_str() {
                    #(#names => ::di_abstractions::assign_cloned(&mut self.#idents, field, &value),)*
                    _ => ::core::result::Result::Err(::di_abstractions::DependencyError::UnknownField {
                        field: ::std::string::ToString::to_string(&field.name),
                    }),
                }
            }
        }
    })
}
