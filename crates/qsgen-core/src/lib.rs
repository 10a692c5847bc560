//! qsgen-core - Type-safe query-set generation for ORM models
//!
//! This crate turns Rust structs marked with a `/// gen:qs` doc line into
//! chainable query builders over a GORM-style ORM facade:
//! - [`parser`] reads Rust source into [`ParsedStruct`]s and a [`TypeInfo`]
//! - [`annotation`] decides which structs are selected
//! - [`field`] classifies fields into [`FieldCategory`]s
//! - [`methods`] synthesizes the per-field and struct-level [`Method`]s
//! - [`generator`] assembles sorted [`QuerySetConfig`]s and renders them
//!
//! For `User` the generated module contains `UserQuerySet` (filters, ordering,
//! retrieval, deletion), `UserUpdater` (column assignments) and `UserDBSchema`
//! (column-name constants). The module is meant to be included as a child of
//! the module declaring the structs, and imports `Db` and `DbResult` from
//! [`GenerateOptions::orm_path`].
//!
//! # Examples
//!
//! ```
//! use qsgen_core::{GenerateOptions, generate_from_source};
//!
//! let source = r#"
//!     /// gen:qs
//!     pub struct User {
//!         pub name: String,
//!         pub age: i32,
//!     }
//! "#;
//!
//! let output = generate_from_source(source, &GenerateOptions::default()).unwrap();
//!
//! let code = output.expect("User is selected");
//! assert!(code.contains("pub fn age_gte(self, value: i32) -> Self"));
//! assert!(code.contains("pub const AGE: &'static str = \"age\";"));
//! ```

pub mod annotation;
mod error;
pub mod field;
pub mod generator;
pub mod methods;
pub mod naming;
mod options;
pub mod parser;
pub mod render;
pub mod types;

pub use error::{QsError, QsResult};
pub use field::{FieldCategory, FieldInfo};
pub use generator::{
    QuerySetConfig, generate_from_source, generate_query_set_configs,
    generate_query_sets_for_structs,
};
pub use methods::Method;
pub use options::GenerateOptions;
pub use parser::{ParsedField, ParsedPackage, ParsedStruct};
pub use types::{TypeInfo, TypeRef};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        GenerateOptions, ParsedPackage, QsError, QsResult, QuerySetConfig,
        generate_from_source, generate_query_sets_for_structs,
    };
}
