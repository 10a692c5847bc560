//! Field classification.
//!
//! Turns each [`ParsedField`] of a struct into a [`FieldInfo`]: the column it
//! maps to, the Rust types the generated methods accept, and a
//! [`FieldCategory`] that decides which methods exist. Resolution goes
//! through the file's [`TypeInfo`], so `type Email = String;`, tuple newtypes
//! and unit enums are classified by what they are, not by how they are
//! spelled.
//!
//! Fields that cannot be classified are dropped without error.
//!
//! # Type Mappings
//!
//! | Declared type | Category |
//! |---------------|----------|
//! | `String`, `Cow<str>` | [`FieldCategory::String`] |
//! | `i32`, `u64`, `f64`, `Decimal`, .. | [`FieldCategory::Numeric`] |
//! | `bool` | [`FieldCategory::Bool`] |
//! | `char`, `Uuid`, unit enums | [`FieldCategory::Scalar`] |
//! | `DateTime<Tz>`, `NaiveDate`, `SystemTime`, .. | [`FieldCategory::Time`] |
//! | `Option<T>` | [`FieldCategory::Nullable`] |
//! | `Vec<T>` | [`FieldCategory::Slice`] |
//! | annotated struct | [`FieldCategory::Association`] |

use crate::methods::str_literal;
use crate::naming::{strip_raw_prefix, to_screaming_snake_case, to_snake_case};
use crate::parser::{ParsedField, ParsedStruct};
use crate::types::{LocalType, TypeInfo, TypeRef};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Alias chains longer than this are treated as unresolvable.
const MAX_RESOLVE_DEPTH: usize = 16;

const NUMERIC_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32",
    "f64", "Decimal", "BigDecimal",
];

const TIME_TYPES: &[&str] = &[
    "DateTime",
    "NaiveDateTime",
    "NaiveDate",
    "NaiveTime",
    "OffsetDateTime",
    "PrimitiveDateTime",
    "SystemTime",
    "Date",
    "Time",
    "Timestamp",
];

const SCALAR_TYPES: &[&str] = &["char", "Uuid", "Ulid"];

/// Semantic bucket of a field's type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    /// Comparable values without an ordering worth filtering on.
    Scalar,
    String,
    Numeric,
    Bool,
    Time,
    /// `Option<T>`.
    Nullable(Box<FieldCategory>),
    /// `Vec<T>`.
    Slice(Box<FieldCategory>),
    /// Reference to another annotated struct.
    Association { target: String },
}

impl FieldCategory {
    /// Wrap in [`FieldCategory::Nullable`], collapsing `Option<Option<T>>`.
    fn nullable(inner: FieldCategory) -> Self {
        match inner {
            FieldCategory::Nullable(_) => inner,
            other => FieldCategory::Nullable(Box::new(other)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, FieldCategory::Nullable(_))
    }

    pub fn is_slice(&self) -> bool {
        match self {
            FieldCategory::Slice(_) => true,
            FieldCategory::Nullable(inner) => inner.is_slice(),
            _ => false,
        }
    }

    /// The associated struct, through any `Option`/`Vec` wrapping.
    pub fn association_target(&self) -> Option<&str> {
        match self {
            FieldCategory::Association { target } => Some(target.as_str()),
            FieldCategory::Nullable(inner) | FieldCategory::Slice(inner) => {
                inner.association_target()
            }
            _ => None,
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldCategory::Scalar => write!(f, "scalar"),
            FieldCategory::String => write!(f, "string"),
            FieldCategory::Numeric => write!(f, "numeric"),
            FieldCategory::Bool => write!(f, "bool"),
            FieldCategory::Time => write!(f, "time"),
            FieldCategory::Nullable(inner) => write!(f, "nullable<{inner}>"),
            FieldCategory::Slice(inner) => write!(f, "slice<{inner}>"),
            FieldCategory::Association { target } => write!(f, "association<{target}>"),
        }
    }
}

/// Semantic descriptor of one usable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name without any `r#` prefix.
    pub name: String,

    /// Database column; `None` for associations, which have no column.
    pub column: Option<String>,

    /// The declared type, spelled as in the source.
    pub rust_type: String,

    /// The type filter arguments take: the declared type with `Option`
    /// (and smart-pointer) wrapping removed.
    pub value_type: String,

    pub category: FieldCategory,

    /// Struct this field was inlined from with `qs(embed)`.
    pub embedded_from: Option<String>,
}

impl FieldInfo {
    /// snake_case stem used to build method names.
    pub fn method_stem(&self) -> String {
        to_snake_case(&self.name)
    }

    /// Name of the column constant in the generated schema type.
    pub fn const_name(&self) -> String {
        to_screaming_snake_case(&self.name)
    }
}

impl Serialize for FieldInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FieldInfo", 11)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("column", &self.column)?;
        s.serialize_field("column_literal", &self.column.as_deref().map(str_literal))?;
        s.serialize_field("const_name", &self.const_name())?;
        s.serialize_field("rust_type", &self.rust_type)?;
        s.serialize_field("value_type", &self.value_type)?;
        s.serialize_field("category", &self.category.to_string())?;
        s.serialize_field("nullable", &self.category.is_nullable())?;
        s.serialize_field("slice", &self.category.is_slice())?;
        s.serialize_field("association", &self.category.association_target())?;
        s.serialize_field("embedded_from", &self.embedded_from)?;
        s.end()
    }
}

/// Outcome of resolving one declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub category: FieldCategory,
    pub value_type: TypeRef,
}

/// Classifies fields against one file's type information.
pub struct InfoGenerator<'a> {
    types: &'a TypeInfo,
}

impl<'a> InfoGenerator<'a> {
    pub fn new(types: &'a TypeInfo) -> Self {
        Self { types }
    }

    /// Describe one field.
    ///
    /// Returns `None` when the field is skipped. An embedded field yields the
    /// descriptors of the embedded struct's fields.
    pub fn gen_field_info(&self, field: &ParsedField) -> Option<Vec<FieldInfo>> {
        let mut embedding = HashSet::new();
        self.gen_field_info_inner(field, None, &mut embedding)
    }

    fn gen_field_info_inner(
        &self,
        field: &ParsedField,
        embedded_from: Option<&str>,
        embedding: &mut HashSet<String>,
    ) -> Option<Vec<FieldInfo>> {
        if field.attrs.skip {
            tracing::debug!(field = %field.name, "skipping field marked qs(skip)");
            return None;
        }
        if !field.is_public {
            tracing::debug!(field = %field.name, "skipping private field");
            return None;
        }
        if field.attrs.embed {
            return self.gen_embedded(field, embedding);
        }

        let Some(classified) = self.classify(&field.ty) else {
            tracing::debug!(
                field = %field.name,
                ty = %field.ty,
                "skipping field of unsupported type"
            );
            return None;
        };

        let name = strip_raw_prefix(&field.name).to_string();
        let column = match classified.category.association_target() {
            Some(_) => None,
            None => Some(
                field
                    .attrs
                    .column
                    .clone()
                    .unwrap_or_else(|| to_snake_case(&name)),
            ),
        };

        Some(vec![FieldInfo {
            name,
            column,
            rust_type: field.ty.to_string(),
            value_type: classified.value_type.to_string(),
            category: classified.category,
            embedded_from: embedded_from.map(str::to_string),
        }])
    }

    fn gen_embedded(
        &self,
        field: &ParsedField,
        embedding: &mut HashSet<String>,
    ) -> Option<Vec<FieldInfo>> {
        let target = field.ty.local_name()?;
        let Some(LocalType::Struct(shape)) = self.types.lookup(target) else {
            tracing::debug!(field = %field.name, ty = %field.ty, "embedded type is not a local struct");
            return None;
        };
        if !embedding.insert(target.to_string()) {
            tracing::debug!(field = %field.name, ty = %target, "skipping recursive embedding");
            return None;
        }

        let infos = shape
            .fields
            .iter()
            .filter_map(|f| self.gen_field_info_inner(f, Some(target), embedding))
            .flatten()
            .collect();

        embedding.remove(target);
        Some(infos)
    }

    /// Resolve a declared type to its category.
    pub fn classify(&self, ty: &TypeRef) -> Option<Classified> {
        self.classify_at(ty, 0)
    }

    fn classify_at(&self, ty: &TypeRef, depth: usize) -> Option<Classified> {
        if depth > MAX_RESOLVE_DEPTH {
            return None;
        }

        if let Some(name) = ty.local_name() {
            if let Some(local) = self.types.lookup(name) {
                return self.classify_local(ty, name, local, depth);
            }
        }

        let ident = ty.last_ident()?;
        let same = |category| {
            Some(Classified {
                category,
                value_type: ty.clone(),
            })
        };

        match ident {
            "Option" => {
                let inner = self.classify_at(ty.first_arg()?, depth + 1)?;
                Some(Classified {
                    category: FieldCategory::nullable(inner.category),
                    value_type: inner.value_type,
                })
            }
            "Vec" => {
                let inner = self.classify_at(ty.first_arg()?, depth + 1)?;
                same(FieldCategory::Slice(Box::new(inner.category)))
            }
            "Box" | "Rc" | "Arc" => self.classify_at(ty.first_arg()?, depth + 1),
            "Cow" => match ty.first_arg()?.last_ident()? {
                "str" | "String" => same(FieldCategory::String),
                _ => None,
            },
            "String" => same(FieldCategory::String),
            "str" => Some(Classified {
                category: FieldCategory::String,
                value_type: TypeRef::path("String"),
            }),
            "bool" => same(FieldCategory::Bool),
            _ if NUMERIC_TYPES.contains(&ident) => same(FieldCategory::Numeric),
            _ if TIME_TYPES.contains(&ident) => same(FieldCategory::Time),
            _ if SCALAR_TYPES.contains(&ident) => same(FieldCategory::Scalar),
            _ => None,
        }
    }

    fn classify_local(
        &self,
        ty: &TypeRef,
        name: &str,
        local: LocalType<'_>,
        depth: usize,
    ) -> Option<Classified> {
        match local {
            LocalType::Alias(target) => {
                let resolved = self.classify_at(target, depth + 1)?;
                // Keep the alias name unless resolution peeled a wrapper off.
                let value_type = if resolved.value_type == *target {
                    ty.clone()
                } else {
                    resolved.value_type
                };
                Some(Classified {
                    category: resolved.category,
                    value_type,
                })
            }
            LocalType::Newtype(inner) => {
                let resolved = self.classify_at(inner, depth + 1)?;
                match resolved.category {
                    FieldCategory::Nullable(_)
                    | FieldCategory::Slice(_)
                    | FieldCategory::Association { .. } => None,
                    category => Some(Classified {
                        category,
                        value_type: ty.clone(),
                    }),
                }
            }
            LocalType::UnitEnum => Some(Classified {
                category: FieldCategory::Scalar,
                value_type: ty.clone(),
            }),
            LocalType::DataEnum => None,
            LocalType::Struct(shape) if shape.annotated => Some(Classified {
                category: FieldCategory::Association {
                    target: name.to_string(),
                },
                value_type: ty.clone(),
            }),
            LocalType::Struct(_) => None,
        }
    }
}

/// Describe every usable field of a struct, in declaration order.
///
/// Fields whose snake_case stems collide (`fooBar` and `foo_bar`, or a name
/// brought in again by embedding) would produce the same method names and
/// schema constant; the first occurrence wins.
pub fn gen_struct_field_infos(s: &ParsedStruct, types: &TypeInfo) -> Vec<FieldInfo> {
    let generator = InfoGenerator::new(types);
    let mut seen = HashSet::new();
    let mut infos = Vec::new();

    for info in s
        .fields
        .iter()
        .filter_map(|f| generator.gen_field_info(f))
        .flatten()
    {
        if seen.insert(info.method_stem()) {
            infos.push(info);
        } else {
            tracing::warn!(
                struct_name = %s.type_name,
                field = %info.name,
                stem = %info.method_stem(),
                "field name collides with an earlier field, keeping the first"
            );
        }
    }

    infos
}
