//! Generation pipeline.
//!
//! ```text
//! HashMap<String, ParsedStruct> + TypeInfo
//!     ↓  annotation::needs_query_set
//!  selected structs
//!     ↓  field::gen_struct_field_infos
//!     ↓  methods::MethodsBuilder
//!  Vec<QuerySetConfig>  (sorted)
//!     ↓  render::render
//!  generated source
//! ```
//!
//! Output is a pure function of the input: the struct map is unordered, so
//! both the configs and each config's methods are sorted before rendering.

use crate::annotation::needs_query_set;
use crate::error::QsResult;
use crate::field::{FieldInfo, gen_struct_field_infos};
use crate::methods::{Method, MethodsBuilder};
use crate::naming::{query_set_name, schema_name, updater_name};
use crate::options::GenerateOptions;
use crate::parser::{ParsedPackage, ParsedStruct};
use crate::render::render;
use crate::types::TypeInfo;
use serde::Serialize;
use std::collections::HashMap;

/// Everything the templates need about one annotated struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySetConfig {
    /// The annotated struct, e.g. `User`.
    pub struct_name: String,

    /// Query-set type name, e.g. `UserQuerySet`.
    pub name: String,

    /// Updater type name, e.g. `UserUpdater`.
    pub updater_name: String,

    /// Column-constant type name, e.g. `UserDBSchema`.
    pub schema_name: String,

    /// Sorted by receiver declaration, then method name.
    pub methods: Vec<Method>,

    /// Usable fields in declaration order.
    pub fields: Vec<FieldInfo>,
}

impl QuerySetConfig {
    fn new(s: &ParsedStruct, fields: Vec<FieldInfo>, mut methods: Vec<Method>) -> Self {
        methods.sort_by(|a, b| {
            a.receiver_declaration()
                .cmp(b.receiver_declaration())
                .then_with(|| a.method_name().cmp(b.method_name()))
        });

        Self {
            struct_name: s.type_name.clone(),
            name: query_set_name(&s.type_name),
            updater_name: updater_name(&s.type_name),
            schema_name: schema_name(&s.type_name),
            methods,
            fields,
        }
    }
}

/// Build a sorted config for every struct carrying the `gen:qs` marker.
pub fn generate_query_set_configs(
    types: &TypeInfo,
    structs: &HashMap<String, ParsedStruct>,
) -> Vec<QuerySetConfig> {
    let mut configs: Vec<QuerySetConfig> = structs
        .values()
        .filter(|s| {
            let selected = needs_query_set(s.doc.as_deref());
            if !selected {
                tracing::debug!(struct_name = %s.type_name, "struct not selected for generation");
            }
            selected
        })
        .map(|s| {
            let fields = gen_struct_field_infos(s, types);
            let methods = MethodsBuilder::new(s, &fields).build();
            QuerySetConfig::new(s, fields, methods)
        })
        .collect();

    configs.sort_by(|a, b| a.struct_name.cmp(&b.struct_name));
    configs
}

/// Generate query-set source for the given structs.
///
/// Returns `Ok(None)` when no struct is selected.
pub fn generate_query_sets_for_structs(
    types: &TypeInfo,
    structs: &HashMap<String, ParsedStruct>,
    options: &GenerateOptions,
) -> QsResult<Option<String>> {
    options.validate()?;

    let configs = generate_query_set_configs(types, structs);
    if configs.is_empty() {
        tracing::info!(structs = structs.len(), "no structs selected, nothing to generate");
        return Ok(None);
    }

    let output = render(&configs, options)?;

    tracing::info!(
        query_sets = configs.len(),
        methods = configs.iter().map(|c| c.methods.len()).sum::<usize>(),
        bytes = output.len(),
        "generated query sets"
    );

    Ok(Some(output))
}

/// Parse Rust source and generate query sets for its annotated structs.
///
/// # Examples
///
/// ```
/// use qsgen_core::{GenerateOptions, generate_from_source};
///
/// let source = r#"
///     /// gen:qs
///     pub struct User {
///         pub name: String,
///     }
/// "#;
///
/// let output = generate_from_source(source, &GenerateOptions::default())
///     .unwrap()
///     .unwrap();
///
/// assert!(output.contains("pub struct UserQuerySet"));
/// assert!(output.contains("pub fn name_eq(self, value: String) -> Self"));
/// ```
pub fn generate_from_source(source: &str, options: &GenerateOptions) -> QsResult<Option<String>> {
    let package = ParsedPackage::parse_source(source)?;

    generate_query_sets_for_structs(&package.types, &package.structs, options)
}
