//! # DI Macros
//!
//! 这个 crate 提供了为结构体生成注入目标实现的派生宏。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use di_macros::Injectable;
//!
//! #[derive(Default, Injectable)]
//! pub struct App {
//!     service: Service,
//!     #[inject(skip)]
//!     started: bool,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 注入目标派生宏
///
/// 为具名字段结构体实现 `di_abstractions::Destination`。每个字段按声明顺序成为一个注入槽，
/// 字段类型即需要解析的类型键，值以克隆方式写入，因此字段类型需要实现 `Clone`。
///
/// # 属性
///
/// - `#[inject(skip)]` - 跳过该字段，不参与注入
///
/// 生成的代码引用 `::di_abstractions`，使用方需要直接依赖该 crate。
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
