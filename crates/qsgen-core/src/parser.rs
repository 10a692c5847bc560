//! Front end: Rust source to parsed structs and type information.
//!
//! The generator core never looks at syntax trees. This module walks a
//! [`syn::File`] once and produces the two inputs the core works from:
//!
//! - a map from struct name to [`ParsedStruct`] (every struct with named
//!   fields, selected or not)
//! - a [`TypeInfo`] registry of every local type the classifier may need to
//!   resolve: aliases, tuple newtypes, enums and structs
//!
//! Items inside inline `mod { .. }` blocks are registered under their bare
//! names.
//!
//! # Field attributes
//!
//! - `qs(skip)`: never expose the field
//! - `qs(embed)`: inline the fields of the referenced struct
//! - `qs(column = "...")`: database column name override
//!
//! Model files that must compile write them as
//! `#[cfg_attr(qsgen, qs(...))]`; the bare `#[qs(...)]` form is read too.
//!
//! # Examples
//!
//! ```
//! use qsgen_core::parser::ParsedPackage;
//!
//! let package = ParsedPackage::parse_source(r#"
//!     /// gen:qs
//!     pub struct User {
//!         pub name: String,
//!     }
//! "#).unwrap();
//!
//! let user = &package.structs["User"];
//! assert_eq!(user.doc.as_deref(), Some(&["/// gen:qs".to_string()][..]));
//! assert_eq!(user.fields[0].name, "name");
//! ```

use crate::annotation::needs_query_set;
use crate::error::QsResult;
use crate::types::{TypeInfo, TypeRef};
use std::collections::HashMap;
use std::path::Path;
use syn::parse::ParseStream;
use syn::punctuated::Punctuated;
use syn::{Attribute, Fields, Item, LitStr, Meta, MetaList, Token};

/// A struct declaration as seen by the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStruct {
    /// The struct name.
    pub type_name: String,

    /// Doc-comment lines, each with its `///` marker. `None` when the struct
    /// has no documentation at all.
    pub doc: Option<Vec<String>>,

    /// Fields in declaration order.
    pub fields: Vec<ParsedField>,
}

/// A named struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedField {
    /// Field name as written, including any `r#` prefix.
    pub name: String,

    /// Declared type.
    pub ty: TypeRef,

    /// Whether the field is visible outside its module (`pub`, `pub(crate)`, ..).
    pub is_public: bool,

    /// `#[qs(...)]` attributes.
    pub attrs: FieldAttrs,
}

/// Parsed `#[qs(...)]` field attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAttrs {
    pub skip: bool,
    pub embed: bool,
    pub column: Option<String>,
}

/// Everything the generator needs from one source file.
#[derive(Debug, Clone, Default)]
pub struct ParsedPackage {
    /// Named-field structs by name.
    pub structs: HashMap<String, ParsedStruct>,

    /// Type information for the same file.
    pub types: TypeInfo,
}

impl ParsedStruct {
    pub fn new(type_name: impl Into<String>, doc: Option<Vec<String>>, fields: Vec<ParsedField>) -> Self {
        Self {
            type_name: type_name.into(),
            doc,
            fields,
        }
    }
}

impl ParsedField {
    /// A public field with no attributes.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_public: true,
            attrs: FieldAttrs::default(),
        }
    }

    /// Same field, private.
    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Same field, with the given attributes.
    pub fn with_attrs(mut self, attrs: FieldAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    fn from_syn_field(f: &syn::Field) -> syn::Result<Option<ParsedField>> {
        let Some(ident) = f.ident.as_ref() else {
            return Ok(None);
        };

        Ok(Some(ParsedField {
            name: ident.to_string(),
            ty: TypeRef::from_syn(&f.ty),
            is_public: !matches!(f.vis, syn::Visibility::Inherited),
            attrs: parse_field_attrs(&f.attrs)?,
        }))
    }
}

impl ParsedPackage {
    /// Parse a Rust source file.
    pub fn parse_file(path: &Path) -> QsResult<ParsedPackage> {
        let content = std::fs::read_to_string(path)?;

        Self::parse_source(&content)
    }

    /// Parse Rust source code.
    pub fn parse_source(source: &str) -> QsResult<ParsedPackage> {
        let file = syn::parse_file(source)?;

        let mut package = ParsedPackage::default();
        package.collect_items(&file.items)?;

        tracing::debug!(
            structs = package.structs.len(),
            "parsed source into struct declarations"
        );

        Ok(package)
    }

    fn collect_items(&mut self, items: &[Item]) -> syn::Result<()> {
        for item in items {
            match item {
                Item::Struct(s) => self.collect_struct(s)?,
                Item::Type(alias) => {
                    self.types
                        .add_alias(alias.ident.to_string(), TypeRef::from_syn(&alias.ty));
                }
                Item::Enum(e) => {
                    let unit_only = e.variants.iter().all(|v| matches!(v.fields, Fields::Unit));
                    self.types.add_enum(e.ident.to_string(), unit_only);
                }
                Item::Mod(m) => {
                    if let Some((_, content)) = &m.content {
                        self.collect_items(content)?;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn collect_struct(&mut self, s: &syn::ItemStruct) -> syn::Result<()> {
        let name = s.ident.to_string();

        let fields = match &s.fields {
            Fields::Named(named) => {
                let mut fields = Vec::with_capacity(named.named.len());
                for f in &named.named {
                    if let Some(field) = ParsedField::from_syn_field(f)? {
                        fields.push(field);
                    }
                }
                fields
            }
            Fields::Unnamed(unnamed) => {
                if unnamed.unnamed.len() == 1 {
                    if let Some(inner) = unnamed.unnamed.first() {
                        self.types.add_newtype(name, TypeRef::from_syn(&inner.ty));
                    }
                }
                return Ok(());
            }
            Fields::Unit => Vec::new(),
        };

        let doc = extract_doc_lines(&s.attrs);
        let annotated = needs_query_set(doc.as_deref());
        self.types.add_struct(name.clone(), annotated, fields.clone());

        let parsed = ParsedStruct::new(name.clone(), doc, fields);
        if self.structs.insert(name.clone(), parsed).is_some() {
            tracing::warn!(name = %name, "struct declared more than once, keeping the last declaration");
        }

        Ok(())
    }
}

/// Rebuild the doc-comment lines of an item, one `///` line per source line.
fn extract_doc_lines(attrs: &[Attribute]) -> Option<Vec<String>> {
    let mut lines = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta {
            if let syn::Expr::Lit(expr_lit) = &meta.value {
                if let syn::Lit::Str(lit_str) = &expr_lit.lit {
                    for line in lit_str.value().lines() {
                        lines.push(format!("///{line}"));
                    }
                }
            }
        }
    }

    if lines.is_empty() { None } else { Some(lines) }
}

/// Collect `qs(...)` field attributes.
///
/// Besides the bare `#[qs(...)]` form, any `#[cfg_attr(<predicate>, qs(...))]`
/// is unwrapped regardless of its predicate. With a predicate that is never
/// set (`qsgen`), rustc strips the attribute and the model file compiles
/// without a `qs` attribute macro in scope.
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("qs") {
            parse_qs_list(attr.meta.require_list()?, &mut parsed)?;
        } else if attr.path().is_ident("cfg_attr") {
            let Ok(metas) = attr.parse_args_with(cfg_attr_metas) else {
                tracing::debug!("ignoring cfg_attr with non-meta arguments");
                continue;
            };
            for meta in metas.iter().filter(|m| m.path().is_ident("qs")) {
                parse_qs_list(meta.require_list()?, &mut parsed)?;
            }
        }
    }

    Ok(parsed)
}

/// The attributes of `cfg_attr(<predicate>, attr, ..)`, predicate dropped.
fn cfg_attr_metas(input: ParseStream) -> syn::Result<Punctuated<Meta, Token![,]>> {
    input.parse::<Meta>()?;
    input.parse::<Token![,]>()?;
    Punctuated::parse_terminated(input)
}

fn parse_qs_list(list: &MetaList, parsed: &mut FieldAttrs) -> syn::Result<()> {
    list.parse_nested_meta(|meta| {
        if meta.path.is_ident("skip") {
            parsed.skip = true;
            Ok(())
        } else if meta.path.is_ident("embed") {
            parsed.embed = true;
            Ok(())
        } else if meta.path.is_ident("column") {
            let lit: LitStr = meta.value()?.parse()?;
            let column = lit.value();
            if column.is_empty() || column.chars().any(char::is_control) {
                return Err(syn::Error::new(
                    lit.span(),
                    "column name must be non-empty and free of control characters",
                ));
            }
            parsed.column = Some(column);
            Ok(())
        } else {
            Err(meta.error("unsupported qs attribute, expected `skip`, `embed` or `column`"))
        }
    })
}
