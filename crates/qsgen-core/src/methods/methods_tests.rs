#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn field(name: &str, rust_type: &str, value_type: &str, category: FieldCategory) -> FieldInfo {
    let association = category.association_target().is_some();
    FieldInfo {
        name: name.to_string(),
        column: (!association).then(|| crate::naming::to_snake_case(name)),
        rust_type: rust_type.to_string(),
        value_type: value_type.to_string(),
        category,
        embedded_from: None,
    }
}

fn user() -> ParsedStruct {
    ParsedStruct::new("User", None, Vec::new())
}

fn names(methods: &[Method], receiver: &str) -> Vec<String> {
    let mut names: Vec<String> = methods
        .iter()
        .filter(|m| m.receiver_declaration() == receiver)
        .map(|m| m.method_name().to_string())
        .collect();
    names.sort();
    names
}

fn find<'m>(methods: &'m [Method], name: &str) -> &'m Method {
    methods
        .iter()
        .find(|m| m.method_name() == name)
        .unwrap_or_else(|| panic!("method {name} not generated"))
}

const STRUCT_LEVEL: &[&str] = &[
    "all",
    "count",
    "create",
    "delete",
    "delete_num",
    "exists",
    "get_updater",
    "limit",
    "offset",
    "one",
    "order_by",
];

// ============================================================================
// Family table
// ============================================================================

#[test_case(FieldCategory::Bool, &[Op::Eq, Op::Ne, Op::OrderAsc, Op::OrderDesc, Op::Set] ; "bool")]
#[test_case(FieldCategory::Scalar, &[Op::Eq, Op::Ne, Op::OrderAsc, Op::OrderDesc, Op::Set, Op::In, Op::NotIn] ; "scalar")]
#[test_case(FieldCategory::Slice(Box::new(FieldCategory::String)), &[Op::Set] ; "slice")]
#[test_case(FieldCategory::Association { target: "Profile".into() }, &[Op::Preload] ; "association")]
#[test_case(FieldCategory::Slice(Box::new(FieldCategory::Association { target: "Profile".into() })), &[Op::Preload] ; "slice of associations")]
#[test_case(FieldCategory::Nullable(Box::new(FieldCategory::Association { target: "Profile".into() })), &[Op::Preload] ; "optional association")]
fn families___category___exact_operations(category: FieldCategory, expected: &[Op]) {
    assert_eq!(families(&category), expected.to_vec());
}

#[test]
fn families___string___adds_text_operations() {
    let ops = families(&FieldCategory::String);

    for op in [Op::Like, Op::NotLike, Op::StartsWith, Op::Contains, Op::In] {
        assert!(ops.contains(&op), "missing {op:?}");
    }
    assert!(!ops.contains(&Op::Gt));
}

#[test]
fn families___numeric_and_time___add_ordering() {
    for category in [FieldCategory::Numeric, FieldCategory::Time] {
        let ops = families(&category);
        for op in [Op::Gt, Op::Gte, Op::Lt, Op::Lte] {
            assert!(ops.contains(&op), "{category} missing {op:?}");
        }
        assert!(!ops.contains(&Op::Like));
    }
    assert!(!families(&FieldCategory::Time).contains(&Op::In));
}

#[test]
fn families___nullable___adds_null_checks_to_inner() {
    let ops = families(&FieldCategory::Nullable(Box::new(FieldCategory::Numeric)));

    assert!(ops.contains(&Op::IsNull));
    assert!(ops.contains(&Op::IsNotNull));
    assert!(ops.contains(&Op::Gte));
    assert_eq!(ops.iter().filter(|op| **op == Op::Set).count(), 1);
}

#[test_case(Op::Eq, "name_eq")]
#[test_case(Op::NotIn, "name_not_in")]
#[test_case(Op::StartsWith, "name_starts_with")]
#[test_case(Op::IsNotNull, "name_is_not_null")]
#[test_case(Op::OrderAsc, "order_asc_by_name")]
#[test_case(Op::OrderDesc, "order_desc_by_name")]
#[test_case(Op::Preload, "preload_name")]
#[test_case(Op::Set, "set_name")]
fn Op_method_name___follows_naming_scheme(op: Op, expected: &str) {
    assert_eq!(op.method_name("name"), expected);
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn build___no_fields___struct_level_methods_only() {
    let s = user();

    let methods = MethodsBuilder::new(&s, &[]).build();

    assert_eq!(names(&methods, "UserQuerySet"), STRUCT_LEVEL.to_vec());
    assert_eq!(names(&methods, "UserUpdater"), vec!["update", "update_num"]);
}

#[test]
fn build___user_example___both_receivers() {
    let s = user();
    let fields = vec![
        field("name", "String", "String", FieldCategory::String),
        field("age", "i32", "i32", FieldCategory::Numeric),
    ];

    let methods = MethodsBuilder::new(&s, &fields).build();

    let query_set = names(&methods, "UserQuerySet");
    for expected in ["name_eq", "name_like", "age_gte", "order_desc_by_age", "get_updater"] {
        assert!(query_set.iter().any(|n| n == expected), "missing {expected}");
    }
    assert_eq!(
        names(&methods, "UserUpdater"),
        vec!["set_age", "set_name", "update", "update_num"]
    );
    assert!(methods.iter().all(|m| m.receiver_declaration() == "UserQuerySet"
        || m.receiver_declaration() == "UserUpdater"));
}

#[test]
fn build___filter_bodies___use_column_and_value_type() {
    let s = user();
    let fields = vec![field("displayName", "String", "String", FieldCategory::String)];

    let methods = MethodsBuilder::new(&s, &fields).build();

    let eq = find(&methods, "display_name_eq");
    assert_eq!(eq.receiver, "UserQuerySet");
    assert_eq!(eq.args, "value: String");
    assert_eq!(eq.returns, "Self");
    assert_eq!(
        eq.body,
        "Self::w(self.db.where_clause(\"display_name = ?\", value))"
    );

    let not_in = find(&methods, "display_name_not_in");
    assert_eq!(not_in.args, "values: Vec<String>");
    assert_eq!(
        not_in.body,
        "Self::w(self.db.where_clause(\"display_name NOT IN (?)\", values))"
    );

    let contains = find(&methods, "display_name_contains");
    assert_eq!(contains.args, "needle: &str");
    assert_eq!(
        contains.body,
        "Self::w(self.db.where_clause(\"display_name LIKE ?\", format!(\"%{needle}%\")))"
    );

    let starts_with = find(&methods, "display_name_starts_with");
    assert_eq!(
        starts_with.body,
        "Self::w(self.db.where_clause(\"display_name LIKE ?\", format!(\"{prefix}%\")))"
    );

    let order = find(&methods, "order_asc_by_display_name");
    assert_eq!(order.args, "");
    assert_eq!(order.body, "Self::w(self.db.order(\"display_name ASC\"))");
}

#[test]
fn build___column_with_quote_and_backslash___escaped_in_literals() {
    let s = user();
    let mut w = field("w", "i32", "i32", FieldCategory::Numeric);
    w.column = Some(r#"we"ird\x"#.to_string());

    let methods = MethodsBuilder::new(&s, &[w]).build();

    assert_eq!(
        find(&methods, "w_eq").body,
        r#"Self::w(self.db.where_clause("we\"ird\\x = ?", value))"#
    );
    assert_eq!(
        find(&methods, "order_desc_by_w").body,
        r#"Self::w(self.db.order("we\"ird\\x DESC"))"#
    );
    assert_eq!(
        find(&methods, "set_w").body,
        r#"Self::w(self.db.set_column("we\"ird\\x", value))"#
    );
}

#[test]
fn build___nullable_field___setter_takes_option_filters_take_inner() {
    let s = user();
    let fields = vec![field(
        "email",
        "Option<String>",
        "String",
        FieldCategory::Nullable(Box::new(FieldCategory::String)),
    )];

    let methods = MethodsBuilder::new(&s, &fields).build();

    assert_eq!(find(&methods, "email_eq").args, "value: String");
    assert_eq!(
        find(&methods, "email_is_null").body,
        "Self::w(self.db.where_raw(\"email IS NULL\"))"
    );
    let setter = find(&methods, "set_email");
    assert_eq!(setter.receiver, "UserUpdater");
    assert_eq!(setter.args, "value: Option<String>");
    assert_eq!(
        setter.body,
        "Self::w(self.db.set_column(\"email\", value))"
    );
}

#[test]
fn build___association___preload_only() {
    let s = user();
    let fields = vec![field(
        "profile",
        "Option<Profile>",
        "Profile",
        FieldCategory::Nullable(Box::new(FieldCategory::Association {
            target: "Profile".into(),
        })),
    )];

    let methods = MethodsBuilder::new(&s, &fields).build();

    let preload = find(&methods, "preload_profile");
    assert_eq!(preload.body, "Self::w(self.db.preload(\"profile\"))");
    assert!(!methods.iter().any(|m| m.name.starts_with("profile_")));
    assert!(!methods.iter().any(|m| m.name == "set_profile"));
}

#[test]
fn build___colliding_names___first_in_declaration_order_wins() {
    let s = user();
    let fields = vec![
        field("a", "i32", "i32", FieldCategory::Numeric),
        field("a_not", "i64", "i64", FieldCategory::Numeric),
    ];

    let methods = MethodsBuilder::new(&s, &fields).build();

    let colliding: Vec<_> = methods.iter().filter(|m| m.name == "a_not_in").collect();
    assert_eq!(colliding.len(), 1);
    assert_eq!(colliding[0].args, "values: Vec<i32>");
}

#[test]
fn build___names_unique_per_receiver() {
    let s = user();
    let fields = vec![
        field("count", "i64", "i64", FieldCategory::Numeric),
        field("limit", "i64", "i64", FieldCategory::Numeric),
        field("tags", "Vec<String>", "Vec<String>", FieldCategory::Slice(Box::new(FieldCategory::String))),
    ];

    let methods = MethodsBuilder::new(&s, &fields).build();

    let mut keys: Vec<_> = methods
        .iter()
        .map(|m| (m.receiver.clone(), m.name.clone()))
        .collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);
    assert_eq!(find(&methods, "set_tags").args, "value: Vec<String>");
}

#[test]
fn build___struct_level_bodies___target_model_type() {
    let s = user();

    let methods = MethodsBuilder::new(&s, &[]).build();

    assert_eq!(find(&methods, "all").returns, "DbResult<Vec<User>>");
    assert_eq!(find(&methods, "all").body, "self.db.find::<User>()");
    assert_eq!(find(&methods, "create").args, "obj: &User");
    assert_eq!(find(&methods, "get_updater").returns, "UserUpdater");
    assert_eq!(find(&methods, "get_updater").body, "UserUpdater::w(self.db)");
    assert_eq!(find(&methods, "exists").body, "Ok(self.db.limit(1).count()? > 0)");
}

#[test]
fn Method___serialize___exposes_all_parts() {
    let s = user();
    let methods = MethodsBuilder::new(&s, &[]).build();

    let value = serde_json::to_value(find(&methods, "limit")).unwrap();

    assert_eq!(value["receiver"], "UserQuerySet");
    assert_eq!(value["name"], "limit");
    assert_eq!(value["args"], "limit: u64");
    assert_eq!(value["returns"], "Self");
    assert!(value["doc"].as_str().is_some_and(|d| !d.is_empty()));
}
