//! Owned type model shared by the front end and the field classifier.
//!
//! [`TypeRef`] is a syntax-level view of a declared field type, detached from
//! [`syn`] so the classifier can be exercised without parsing anything.
//! [`TypeInfo`] is the whole-file registry the classifier consults to resolve
//! local names: type aliases, tuple newtypes, enums and other structs.
//!
//! # Examples
//!
//! ```
//! use qsgen_core::TypeRef;
//!
//! let ty = TypeRef::parse("Option<chrono::DateTime<Utc>>").unwrap();
//!
//! assert_eq!(ty.last_ident(), Some("Option"));
//! assert_eq!(ty.to_string(), "Option<chrono::DateTime<Utc>>");
//! ```

use crate::parser::ParsedField;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Simplified, owned representation of a Rust type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A path type such as `String` or `chrono::DateTime<Utc>`.
    ///
    /// Generic type arguments belong to the last segment; lifetimes and
    /// const arguments are dropped.
    Path {
        segments: Vec<String>,
        args: Vec<TypeRef>,
    },

    /// A reference, `&T` or `&mut T`.
    Reference(Box<TypeRef>),

    /// A tuple, including the unit type.
    Tuple(Vec<TypeRef>),

    /// A slice or fixed-size array.
    Array(Box<TypeRef>),

    /// Anything else, kept as its token spelling.
    Other(String),
}

impl TypeRef {
    /// Build a non-generic path type from its `::`-separated spelling.
    pub fn path(path: &str) -> Self {
        TypeRef::Path {
            segments: path.split("::").map(|s| s.trim().to_string()).collect(),
            args: Vec::new(),
        }
    }

    /// Build a generic path type, e.g. `generic("Option", vec![..])`.
    pub fn generic(path: &str, args: Vec<TypeRef>) -> Self {
        match TypeRef::path(path) {
            TypeRef::Path { segments, .. } => TypeRef::Path { segments, args },
            other => other,
        }
    }

    /// Parse a type from Rust source text.
    pub fn parse(source: &str) -> syn::Result<Self> {
        let ty: syn::Type = syn::parse_str(source)?;
        Ok(Self::from_syn(&ty))
    }

    /// Convert a [`syn::Type`].
    pub fn from_syn(ty: &syn::Type) -> Self {
        match ty {
            syn::Type::Path(type_path) if type_path.qself.is_none() => {
                let path = &type_path.path;
                let segments = path
                    .segments
                    .iter()
                    .map(|s| s.ident.to_string())
                    .collect();
                let args = path
                    .segments
                    .last()
                    .map(|s| generic_type_args(&s.arguments))
                    .unwrap_or_default();
                TypeRef::Path { segments, args }
            }
            syn::Type::Reference(r) => TypeRef::Reference(Box::new(Self::from_syn(&r.elem))),
            syn::Type::Tuple(t) => TypeRef::Tuple(t.elems.iter().map(Self::from_syn).collect()),
            syn::Type::Array(a) => TypeRef::Array(Box::new(Self::from_syn(&a.elem))),
            syn::Type::Slice(s) => TypeRef::Array(Box::new(Self::from_syn(&s.elem))),
            syn::Type::Paren(p) => Self::from_syn(&p.elem),
            syn::Type::Group(g) => Self::from_syn(&g.elem),
            other => TypeRef::Other(quote::quote!(#other).to_string()),
        }
    }

    /// The identifier of the last path segment, if this is a path type.
    pub fn last_ident(&self) -> Option<&str> {
        match self {
            TypeRef::Path { segments, .. } => segments.last().map(String::as_str),
            _ => None,
        }
    }

    /// The first generic type argument of a path type.
    pub fn first_arg(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Path { args, .. } => args.first(),
            _ => None,
        }
    }

    /// Name under which this type may be declared in the same file.
    ///
    /// Only bare identifiers and `crate::`/`self::`/`super::` paths qualify;
    /// `chrono::DateTime` never names a local item.
    pub fn local_name(&self) -> Option<&str> {
        match self {
            TypeRef::Path { segments, args } if args.is_empty() => match segments.as_slice() {
                [name] => Some(name.as_str()),
                [first, .., last] if matches!(first.as_str(), "crate" | "self" | "super") => {
                    Some(last.as_str())
                }
                _ => None,
            },
            _ => None,
        }
    }
}

fn generic_type_args(arguments: &syn::PathArguments) -> Vec<TypeRef> {
    match arguments {
        syn::PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                syn::GenericArgument::Type(ty) => Some(TypeRef::from_syn(ty)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Path { segments, args } => {
                write!(f, "{}", segments.join("::"))?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeRef::Reference(inner) => write!(f, "&{inner}"),
            TypeRef::Tuple(elems) => {
                write!(f, "(")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                if elems.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            TypeRef::Array(inner) => write!(f, "[{inner}]"),
            TypeRef::Other(tokens) => write!(f, "{tokens}"),
        }
    }
}

/// A named struct known to the type registry.
#[derive(Debug, Clone, PartialEq)]
pub struct StructShape {
    /// Whether the struct carries the `gen:qs` marker.
    pub annotated: bool,

    /// Fields in declaration order.
    pub fields: Vec<ParsedField>,
}

/// What a local type name refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalType<'a> {
    /// `type Name = Target;`
    Alias(&'a TypeRef),
    /// `struct Name(Inner);`
    Newtype(&'a TypeRef),
    /// An enum whose variants carry no data.
    UnitEnum,
    /// An enum with at least one data-carrying variant.
    DataEnum,
    /// A struct with named fields (or a unit struct).
    Struct(&'a StructShape),
}

/// Whole-file type information used to classify fields.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    aliases: HashMap<String, TypeRef>,
    newtypes: HashMap<String, TypeRef>,
    unit_enums: HashSet<String>,
    data_enums: HashSet<String>,
    structs: HashMap<String, StructShape>,
}

impl TypeInfo {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `type name = target;`.
    pub fn add_alias(&mut self, name: impl Into<String>, target: TypeRef) {
        self.aliases.insert(name.into(), target);
    }

    /// Register a single-field tuple struct.
    pub fn add_newtype(&mut self, name: impl Into<String>, inner: TypeRef) {
        self.newtypes.insert(name.into(), inner);
    }

    /// Register an enum.
    pub fn add_enum(&mut self, name: impl Into<String>, unit_only: bool) {
        let name = name.into();
        if unit_only {
            self.unit_enums.insert(name);
        } else {
            self.data_enums.insert(name);
        }
    }

    /// Register a struct with named fields.
    pub fn add_struct(&mut self, name: impl Into<String>, annotated: bool, fields: Vec<ParsedField>) {
        self.structs
            .insert(name.into(), StructShape { annotated, fields });
    }

    /// Resolve a local type name.
    pub fn lookup(&self, name: &str) -> Option<LocalType<'_>> {
        if let Some(target) = self.aliases.get(name) {
            return Some(LocalType::Alias(target));
        }
        if let Some(inner) = self.newtypes.get(name) {
            return Some(LocalType::Newtype(inner));
        }
        if let Some(shape) = self.structs.get(name) {
            return Some(LocalType::Struct(shape));
        }
        if self.unit_enums.contains(name) {
            return Some(LocalType::UnitEnum);
        }
        if self.data_enums.contains(name) {
            return Some(LocalType::DataEnum);
        }
        None
    }

    /// Whether `name` is a struct carrying the generation marker.
    pub fn is_annotated_struct(&self, name: &str) -> bool {
        self.structs.get(name).is_some_and(|s| s.annotated)
    }
}
