//! Method synthesis.
//!
//! Every annotated struct `Foo` gets two generated types: `FooQuerySet`, which
//! accumulates filters and runs queries, and `FooUpdater`, which accumulates
//! column assignments. [`MethodsBuilder`] decides which methods each type
//! carries and spells out their signatures and bodies against the ORM facade.
//!
//! Which per-field methods exist is decided by a single table,
//! [`families`], keyed on the field's [`FieldCategory`].
//!
//! # Examples
//!
//! ```
//! use qsgen_core::field::gen_struct_field_infos;
//! use qsgen_core::methods::MethodsBuilder;
//! use qsgen_core::parser::ParsedPackage;
//!
//! let package = ParsedPackage::parse_source(r#"
//!     /// gen:qs
//!     pub struct User {
//!         pub name: String,
//!     }
//! "#).unwrap();
//! let user = &package.structs["User"];
//! let fields = gen_struct_field_infos(user, &package.types);
//!
//! let methods = MethodsBuilder::new(user, &fields).build();
//!
//! assert!(methods.iter().any(|m| m.method_name() == "name_eq"));
//! assert!(methods.iter().any(|m| m.method_name() == "set_name"));
//! ```

use crate::field::{FieldCategory, FieldInfo};
use crate::naming::{query_set_name, updater_name};
use crate::parser::ParsedStruct;
use serde::Serialize;
use std::collections::HashSet;

/// Which generated type a method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    QuerySet,
    Updater,
}

/// One per-field operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,
    In,
    NotIn,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    StartsWith,
    Contains,
    IsNull,
    IsNotNull,
    OrderAsc,
    OrderDesc,
    Preload,
    Set,
}

const COMPARABLE: &[Op] = &[Op::Eq, Op::Ne, Op::OrderAsc, Op::OrderDesc, Op::Set];
const MEMBERSHIP: &[Op] = &[Op::In, Op::NotIn];
const ORDERED: &[Op] = &[Op::Gt, Op::Gte, Op::Lt, Op::Lte];
const TEXT: &[Op] = &[Op::Like, Op::NotLike, Op::StartsWith, Op::Contains];
const NULLABLE: &[Op] = &[Op::IsNull, Op::IsNotNull];
const PRELOAD: &[Op] = &[Op::Preload];
const ASSIGN: &[Op] = &[Op::Set];

/// The operations a field of the given category supports.
pub fn families(category: &FieldCategory) -> Vec<Op> {
    let groups: Vec<&[Op]> = match category {
        FieldCategory::Scalar => vec![COMPARABLE, MEMBERSHIP],
        FieldCategory::String => vec![COMPARABLE, MEMBERSHIP, TEXT],
        FieldCategory::Numeric => vec![COMPARABLE, MEMBERSHIP, ORDERED],
        FieldCategory::Bool => vec![COMPARABLE],
        FieldCategory::Time => vec![COMPARABLE, ORDERED],
        FieldCategory::Nullable(inner) => {
            let mut ops = families(inner);
            if inner.association_target().is_none() {
                ops.extend_from_slice(NULLABLE);
            }
            return ops;
        }
        FieldCategory::Slice(inner) if inner.association_target().is_some() => vec![PRELOAD],
        FieldCategory::Slice(_) => vec![ASSIGN],
        FieldCategory::Association { .. } => vec![PRELOAD],
    };

    groups.concat()
}

impl Op {
    fn receiver(self) -> Receiver {
        match self {
            Op::Set => Receiver::Updater,
            _ => Receiver::QuerySet,
        }
    }

    /// Generated method name for a field with the given snake_case stem.
    pub fn method_name(self, stem: &str) -> String {
        match self {
            Op::OrderAsc => format!("order_asc_by_{stem}"),
            Op::OrderDesc => format!("order_desc_by_{stem}"),
            Op::Preload => format!("preload_{stem}"),
            Op::Set => format!("set_{stem}"),
            _ => format!("{stem}_{}", self.suffix()),
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::In => "in",
            Op::NotIn => "not_in",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Like => "like",
            Op::NotLike => "not_like",
            Op::StartsWith => "starts_with",
            Op::Contains => "contains",
            Op::IsNull => "is_null",
            Op::IsNotNull => "is_not_null",
            Op::OrderAsc => "order_asc",
            Op::OrderDesc => "order_desc",
            Op::Preload => "preload",
            Op::Set => "set",
        }
    }

    fn comparison(self) -> Option<&'static str> {
        match self {
            Op::Eq => Some("="),
            Op::Ne => Some("!="),
            Op::Gt => Some(">"),
            Op::Gte => Some(">="),
            Op::Lt => Some("<"),
            Op::Lte => Some("<="),
            _ => None,
        }
    }
}

/// A single generated function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    /// The owning generated type, e.g. `UserQuerySet`.
    pub receiver: String,
    pub name: String,
    /// One-line doc comment, without the `///` marker.
    pub doc: String,
    /// Parameters after `self`, comma separated. Empty when there are none.
    pub args: String,
    pub returns: String,
    pub body: String,
}

impl Method {
    fn new(
        receiver: &str,
        name: impl Into<String>,
        doc: impl Into<String>,
        args: impl Into<String>,
        returns: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            receiver: receiver.to_string(),
            name: name.into(),
            doc: doc.into(),
            args: args.into(),
            returns: returns.into(),
            body: body.into(),
        }
    }

    /// The type the method is declared on.
    pub fn receiver_declaration(&self) -> &str {
        &self.receiver
    }

    pub fn method_name(&self) -> &str {
        &self.name
    }
}

/// Builds the method list of one struct.
pub struct MethodsBuilder<'a> {
    s: &'a ParsedStruct,
    fields: &'a [FieldInfo],
    query_set: String,
    updater: String,
    methods: Vec<Method>,
    seen: HashSet<(String, String)>,
}

impl<'a> MethodsBuilder<'a> {
    pub fn new(s: &'a ParsedStruct, fields: &'a [FieldInfo]) -> Self {
        Self {
            s,
            fields,
            query_set: query_set_name(&s.type_name),
            updater: updater_name(&s.type_name),
            methods: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Synthesize every method, struct-level ones first, then per field in
    /// declaration order. Output order is not significant; callers sort.
    pub fn build(mut self) -> Vec<Method> {
        self.build_struct_methods();

        let fields = self.fields;
        for field in fields {
            for op in families(&field.category) {
                if let Some(method) = self.field_method(field, op) {
                    self.push(method);
                }
            }
        }

        tracing::debug!(
            struct_name = %self.s.type_name,
            methods = self.methods.len(),
            "synthesized methods"
        );

        self.methods
    }

    fn push(&mut self, method: Method) {
        let key = (method.receiver.clone(), method.name.clone());
        if self.seen.insert(key) {
            self.methods.push(method);
        } else {
            tracing::warn!(
                struct_name = %self.s.type_name,
                receiver = %method.receiver,
                method = %method.name,
                "generated method name collides with an earlier one, skipping"
            );
        }
    }

    fn build_struct_methods(&mut self) {
        let model = self.s.type_name.clone();
        let qs = self.query_set.clone();
        let updater = self.updater.clone();

        let query_set_methods = [
            Method::new(
                &qs,
                "all",
                format!("Load every `{model}` matching the accumulated filters."),
                "",
                format!("DbResult<Vec<{model}>>"),
                format!("self.db.find::<{model}>()"),
            ),
            Method::new(
                &qs,
                "one",
                format!("Load the first `{model}` matching the accumulated filters."),
                "",
                format!("DbResult<{model}>"),
                format!("self.db.first::<{model}>()"),
            ),
            Method::new(
                &qs,
                "count",
                "Count the matching rows.",
                "",
                "DbResult<u64>",
                "self.db.count()",
            ),
            Method::new(
                &qs,
                "exists",
                "Whether at least one row matches.",
                "",
                "DbResult<bool>",
                "Ok(self.db.limit(1).count()? > 0)",
            ),
            Method::new(
                &qs,
                "create",
                format!("Insert `obj` as a new `{model}` row."),
                format!("obj: &{model}"),
                "DbResult<()>",
                "self.db.create(obj)",
            ),
            Method::new(
                &qs,
                "delete",
                "Delete the matching rows.",
                "",
                "DbResult<()>",
                format!("self.db.delete::<{model}>().map(|_| ())"),
            ),
            Method::new(
                &qs,
                "delete_num",
                "Delete the matching rows and return how many were removed.",
                "",
                "DbResult<u64>",
                format!("self.db.delete::<{model}>()"),
            ),
            Method::new(
                &qs,
                "get_updater",
                "Start an update of the matching rows.",
                "",
                updater.clone(),
                format!("{updater}::w(self.db)"),
            ),
            Method::new(
                &qs,
                "limit",
                "Return at most `limit` rows.",
                "limit: u64",
                "Self",
                "Self::w(self.db.limit(limit))",
            ),
            Method::new(
                &qs,
                "offset",
                "Skip the first `offset` rows.",
                "offset: u64",
                "Self",
                "Self::w(self.db.offset(offset))",
            ),
            Method::new(
                &qs,
                "order_by",
                "Order by a raw SQL clause.",
                "clause: &str",
                "Self",
                "Self::w(self.db.order(clause))",
            ),
        ];

        let updater_methods = [
            Method::new(
                &updater,
                "update",
                "Apply the accumulated assignments.",
                "",
                "DbResult<()>",
                "self.db.update_columns().map(|_| ())",
            ),
            Method::new(
                &updater,
                "update_num",
                "Apply the accumulated assignments and return how many rows changed.",
                "",
                "DbResult<u64>",
                "self.db.update_columns()",
            ),
        ];

        for method in query_set_methods.into_iter().chain(updater_methods) {
            self.push(method);
        }
    }

    fn field_method(&self, field: &FieldInfo, op: Op) -> Option<Method> {
        let receiver = match op.receiver() {
            Receiver::QuerySet => &self.query_set,
            Receiver::Updater => &self.updater,
        };
        let name = op.method_name(&field.method_stem());
        let value = &field.value_type;

        if op == Op::Preload {
            return Some(Method::new(
                receiver,
                name,
                format!("Eagerly load the `{}` association.", field.name),
                "",
                "Self",
                format!("Self::w(self.db.preload(\"{}\"))", field.name),
            ));
        }

        // Everything but preload works on a column.
        let column = field.column.as_deref()?;

        let (doc, args, body) = if let Some(cmp) = op.comparison() {
            (
                format!("Keep rows where `{column}` {cmp} `value`."),
                format!("value: {value}"),
                format!(
                    "Self::w(self.db.where_clause({}, value))",
                    str_literal(&format!("{column} {cmp} ?"))
                ),
            )
        } else {
            match op {
                Op::In | Op::NotIn => {
                    let sql = if op == Op::In { "IN" } else { "NOT IN" };
                    (
                        format!("Keep rows where `{column}` is {} `values`.", op_phrase(op)),
                        format!("values: Vec<{value}>"),
                        format!(
                            "Self::w(self.db.where_clause({}, values))",
                            str_literal(&format!("{column} {sql} (?)"))
                        ),
                    )
                }
                Op::Like | Op::NotLike => {
                    let sql = if op == Op::Like { "LIKE" } else { "NOT LIKE" };
                    (
                        format!("Keep rows where `{column}` {} `pattern`.", op_phrase(op)),
                        "pattern: &str".to_string(),
                        format!(
                            "Self::w(self.db.where_clause({}, pattern))",
                            str_literal(&format!("{column} {sql} ?"))
                        ),
                    )
                }
                Op::StartsWith => (
                    format!("Keep rows where `{column}` starts with `prefix`."),
                    "prefix: &str".to_string(),
                    format!(
                        "Self::w(self.db.where_clause({}, format!(\"{{prefix}}%\")))",
                        str_literal(&format!("{column} LIKE ?"))
                    ),
                ),
                Op::Contains => (
                    format!("Keep rows where `{column}` contains `needle`."),
                    "needle: &str".to_string(),
                    format!(
                        "Self::w(self.db.where_clause({}, format!(\"%{{needle}}%\")))",
                        str_literal(&format!("{column} LIKE ?"))
                    ),
                ),
                Op::IsNull | Op::IsNotNull => {
                    let sql = if op == Op::IsNull { "IS NULL" } else { "IS NOT NULL" };
                    (
                        format!("Keep rows where `{column}` {}.", sql.to_lowercase()),
                        String::new(),
                        format!(
                            "Self::w(self.db.where_raw({}))",
                            str_literal(&format!("{column} {sql}"))
                        ),
                    )
                }
                Op::OrderAsc | Op::OrderDesc => {
                    let dir = if op == Op::OrderAsc { "ASC" } else { "DESC" };
                    (
                        format!(
                            "Order by `{column}`, {}.",
                            if op == Op::OrderAsc { "ascending" } else { "descending" }
                        ),
                        String::new(),
                        format!(
                            "Self::w(self.db.order({}))",
                            str_literal(&format!("{column} {dir}"))
                        ),
                    )
                }
                Op::Set => (
                    format!("Assign `{column}`."),
                    format!("value: {}", field.rust_type),
                    format!("Self::w(self.db.set_column({}, value))", str_literal(column)),
                ),
                _ => return None,
            }
        };

        Some(Method::new(receiver, name, doc, args, "Self", body))
    }
}

/// Spell `s` as a Rust string literal, quotes included.
pub(crate) fn str_literal(s: &str) -> String {
    format!("{s:?}")
}

fn op_phrase(op: Op) -> &'static str {
    match op {
        Op::In => "one of",
        Op::NotIn => "none of",
        Op::Like => "matches",
        Op::NotLike => "does not match",
        _ => "",
    }
}

#[cfg(test)]
#[path = "methods/methods_tests.rs"]
mod methods_tests;
