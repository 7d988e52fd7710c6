//! 宏工具函数

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, FieldsNamed, Result};

/// 提取具名字段，其他形态的类型返回编译错误
pub fn named_fields(input: &DeriveInput) -> Result<&FieldsNamed> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            Fields::Unnamed(_) => Err(syn::Error::new_spanned(
                &input.ident,
                "Injectable cannot be derived for tuple structs; use named fields",
            )),
            Fields::Unit => Err(syn::Error::new_spanned(
                &input.ident,
                "Injectable cannot be derived for unit structs",
            )),
        },
        Data::Enum(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Injectable can only be derived for structs, not enums",
        )),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Injectable can only be derived for structs, not unions",
        )),
    }
}

/// 字段是否标记了 `#[inject(skip)]`
pub fn is_skipped(field: &Field) -> Result<bool> {
    let mut skip = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("inject") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported inject attribute; expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

/// 字段在注入形态中的名称，去掉原始标识符前缀
pub fn slot_name(field: &Field) -> Option<String> {
    field.ident.as_ref().map(|ident| ident.unraw().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_named_fields_rejects_tuple_struct() {
        let input: DeriveInput = parse_quote! {
            struct Pair(u8, u16);
        };
        let err = named_fields(&input).unwrap_err();
        assert!(err.to_string().contains("tuple structs"));
    }

    #[test]
    fn test_named_fields_rejects_enum() {
        let input: DeriveInput = parse_quote! {
            enum Mode { A, B }
        };
        assert!(named_fields(&input).is_err());
    }

    #[test]
    fn test_is_skipped() {
        let field: Field = parse_quote! {
            #[inject(skip)]
            started: bool
        };
        assert!(is_skipped(&field).unwrap());

        let field: Field = parse_quote! {
            #[inject(lazy)]
            started: bool
        };
        assert!(is_skipped(&field).is_err());
    }

    #[test]
    fn test_slot_name_strips_raw_prefix() {
        let field: Field = parse_quote! {
            r#type: String
        };
        assert_eq!(slot_name(&field).as_deref(), Some("type"));
    }
}
