//! Template rendering.
//!
//! The built-in template is compiled once per process. A custom template is
//! compiled per call and rendered after the built-in one into the same
//! output, against the same data:
//!
//! | Variable | Type |
//! |----------|------|
//! | `configs` | list of [`QuerySetConfig`] |
//! | `orm_path` | string |
//! | `header` | bool |
//!
//! Undefined variables are errors, so a template typo fails the run instead of
//! producing silently incomplete code.

use crate::error::{QsError, QsResult};
use crate::generator::QuerySetConfig;
use crate::naming::{to_screaming_snake_case, to_snake_case};
use crate::options::GenerateOptions;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use once_cell::sync::Lazy;
use serde::Serialize;

mod templates {
    pub const QUERY_SET: &str = include_str!("../templates/queryset.rs.j2");
}

const BUILTIN_TEMPLATE: &str = "queryset.rs.j2";
const CUSTOM_TEMPLATE: &str = "custom";

static BUILTIN: Lazy<Environment<'static>> = Lazy::new(builtin_environment);

#[derive(Serialize)]
struct RenderContext<'a> {
    configs: &'a [QuerySetConfig],
    orm_path: &'a str,
    header: bool,
}

fn configure(env: &mut Environment<'_>) {
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("snake_case", |value: String| to_snake_case(&value));
    env.add_filter("screaming_snake_case", |value: String| {
        to_screaming_snake_case(&value)
    });
}

#[allow(clippy::expect_used)]
fn builtin_environment() -> Environment<'static> {
    let mut env = Environment::new();
    configure(&mut env);
    // Safe: the template is compiled into the binary and covered by tests
    env.add_template(BUILTIN_TEMPLATE, templates::QUERY_SET)
        .expect("built-in template must compile");
    env
}

/// Render the configs with the built-in template, followed by the custom
/// template from `options` if one is set.
pub fn render(configs: &[QuerySetConfig], options: &GenerateOptions) -> QsResult<String> {
    let ctx = RenderContext {
        configs,
        orm_path: options.orm_path(),
        header: options.header,
    };

    let mut output = BUILTIN
        .get_template(BUILTIN_TEMPLATE)
        .and_then(|t| t.render(&ctx))
        .map_err(|e| QsError::render(BUILTIN_TEMPLATE, e))?;

    if let Some(source) = options.custom_template() {
        let mut env = Environment::new();
        configure(&mut env);
        env.add_template(CUSTOM_TEMPLATE, source)
            .map_err(|e| QsError::render(CUSTOM_TEMPLATE, e))?;
        let custom = env
            .get_template(CUSTOM_TEMPLATE)
            .and_then(|t| t.render(&ctx))
            .map_err(|e| QsError::render(CUSTOM_TEMPLATE, e))?;

        tracing::debug!(bytes = custom.len(), "rendered custom template");
        output.push_str(&custom);
    }

    Ok(output)
}
