//! # 依赖注入具体实现
//!
//! 提供注册表构建器、依赖图校验器、解析器、注入器以及容器门面。
//!
//! ```
//! use di_impl::DiContainerBuilder;
//!
//! #[derive(Clone)]
//! struct Config {
//!     host: String,
//! }
//!
//! fn config() -> Config {
//!     Config { host: "localhost".into() }
//! }
//!
//! fn url(config: Config) -> String {
//!     format!("postgresql://{}", config.host)
//! }
//!
//! let mut container = DiContainerBuilder::new()
//!     .provide(config)
//!     .provide(url)
//!     .build()
//!     .unwrap();
//! assert_eq!(container.resolve::<String>().unwrap(), "postgresql://localhost");
//! ```

pub mod builder;
pub mod container;
pub mod injector;
pub mod must;
pub mod resolver;
pub mod validator;

pub use builder::RegistryBuilder;
pub use container::{DiContainer, DiContainerBuilder};
pub use injector::Injector;
pub use resolver::Resolver;
pub use validator::GraphValidator;
