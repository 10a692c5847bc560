//! Naming convention utilities for generated identifiers.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `displayName` | [`to_snake_case`] | `display_name` |
//! | `display_name` | [`to_screaming_snake_case`] | `DISPLAY_NAME` |
//! | `r#type` | [`strip_raw_prefix`] | `type` |
//! | `User` | [`query_set_name`] | `UserQuerySet` |
//! | `User` | [`updater_name`] | `UserUpdater` |
//! | `User` | [`schema_name`] | `UserDBSchema` |

/// Remove the `r#` prefix of a raw identifier.
///
/// # Examples
///
/// ```
/// use qsgen_core::naming::strip_raw_prefix;
///
/// assert_eq!(strip_raw_prefix("r#type"), "type");
/// assert_eq!(strip_raw_prefix("name"), "name");
/// ```
pub fn strip_raw_prefix(s: &str) -> &str {
    s.strip_prefix("r#").unwrap_or(s)
}

/// Convert an identifier to snake_case.
///
/// Already snake-cased input is returned unchanged. Runs of capitals are
/// treated as one word (`HTTPCode` becomes `http_code`).
///
/// # Examples
///
/// ```
/// use qsgen_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("displayName"), "display_name");
/// assert_eq!(to_snake_case("UserId"), "user_id");
/// assert_eq!(to_snake_case("created_at"), "created_at");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = strip_raw_prefix(s).chars().collect();
    let mut result = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) => p.is_uppercase() && next.is_some_and(char::is_lowercase),
            };
            if starts_word {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert an identifier to SCREAMING_SNAKE_CASE.
///
/// # Examples
///
/// ```
/// use qsgen_core::naming::to_screaming_snake_case;
///
/// assert_eq!(to_screaming_snake_case("created_at"), "CREATED_AT");
/// assert_eq!(to_screaming_snake_case("userId"), "USER_ID");
/// ```
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Name of the generated query-set type for a struct.
pub fn query_set_name(struct_name: &str) -> String {
    format!("{struct_name}QuerySet")
}

/// Name of the generated updater type for a struct.
pub fn updater_name(struct_name: &str) -> String {
    format!("{struct_name}Updater")
}

/// Name of the generated column-constant type for a struct.
pub fn schema_name(struct_name: &str) -> String {
    format!("{struct_name}DBSchema")
}
