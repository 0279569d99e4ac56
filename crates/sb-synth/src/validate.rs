//! Structural checks run before any method is synthesized.

use std::collections::HashSet;

use sb_core::ty::{is_identifier, is_keyword};
use sb_core::{bail, ActivityDescriptor, ClassName, Error, GeneratorConfig, Result, RuntimeApi, Ty};

use crate::enumerate::MAX_OPTIONAL_PARAMS;

/// Names taken from configuration end up verbatim in the generated source.
pub fn validate_config(config: &GeneratorConfig) -> Result<()> {
    let usable = |name: &str| is_identifier(name) && !is_keyword(name);
    if !config.package.is_empty() && !config.package.split('.').all(usable) {
        bail!("package `{}` is not a valid package name", config.package);
    }
    if !usable(&config.class_name) {
        bail!("class name `{}` is not a valid identifier", config.class_name);
    }
    if !usable(&config.context_field) {
        bail!("context field `{}` is not a valid identifier", config.context_field);
    }
    if !config.method_prefix.is_empty() && !is_identifier(&config.method_prefix) {
        bail!("method prefix `{}` cannot start a method name", config.method_prefix);
    }
    Ok(())
}

pub fn validate_run(activities: &[ActivityDescriptor], runtime: &RuntimeApi) -> Result<()> {
    let mut seen = HashSet::new();
    for activity in activities {
        if !seen.insert(&activity.name) {
            return Err(Error::invalid_descriptor(
                activity.qualified_name(),
                "activity is declared more than once",
            ));
        }
        validate_activity(activity, runtime)?;
    }
    Ok(())
}

pub fn validate_activity(activity: &ActivityDescriptor, runtime: &RuntimeApi) -> Result<()> {
    let fail = |message: String| Err(Error::invalid_descriptor(activity.qualified_name(), message));

    match activity.primary_url() {
        None => return fail("at least one url is required".to_string()),
        Some(url) if url.trim().is_empty() => return fail("the first url is empty".to_string()),
        Some(_) => {}
    }

    if let Some(result) = &activity.result {
        if !matches!(result, Ty::Class(_) | Ty::Parameterized(_)) {
            return fail(format!("result type `{result}` cannot be instantiated"));
        }
        if let Some(part) = result.first_unresolved() {
            return fail(format!(
                "result type `{result}` cannot be instantiated: `{part}` is not a concrete type"
            ));
        }
        if let Some(part) = result.primitive_argument() {
            return fail(format!(
                "result type `{result}` uses primitive `{part}` as a type argument"
            ));
        }
    }

    let mut keys = HashSet::new();
    for param in &activity.params {
        if !is_identifier(&param.key) || is_keyword(&param.key) {
            return fail(format!("`{}` is not a usable parameter name", param.key));
        }
        if !keys.insert(param.key.as_str()) {
            return fail(format!("parameter `{}` is declared more than once", param.key));
        }
        if let Some(class) = hidden_runtime_class(&param.key, runtime) {
            return fail(format!(
                "parameter `{}` would obscure `{class}` in the generated body",
                param.key
            ));
        }
        if let Some(part) = param.ty.primitive_argument() {
            return Err(Error::UnsupportedType {
                activity: activity.qualified_name(),
                param: param.key.clone(),
                ty: param.ty.to_string(),
                reason: format!("primitive `{part}` cannot be a type argument"),
            });
        }
        for tag in param.tags() {
            let valid = tag
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '$');
            if !valid {
                return fail(format!(
                    "tag `{tag}` on parameter `{}` cannot be part of a method name",
                    param.key
                ));
            }
        }
    }

    let optional = activity.params.iter().filter(|param| param.ignore).count();
    if optional > MAX_OPTIONAL_PARAMS {
        return fail(format!(
            "{optional} optional parameters exceed the {MAX_OPTIONAL_PARAMS} that can be enumerated"
        ));
    }
    Ok(())
}

/// Runtime classes named as call receivers. A variable sharing their simple name, or the
/// first segment of their package, takes precedence over them in Java expressions.
fn hidden_runtime_class<'r>(key: &str, runtime: &'r RuntimeApi) -> Option<&'r ClassName> {
    [
        &runtime.type_token_class,
        &runtime.converter_class,
        &runtime.navigator_class,
    ]
    .into_iter()
    .find(|class| {
        class.simple_names().first().map(String::as_str) == Some(key)
            || class.package().split('.').next() == Some(key)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::{ClassName, ParamDescriptor};

    fn activity() -> ActivityDescriptor {
        ActivityDescriptor::new(ClassName::new("com.example", "MainActivity"), "app://main")
    }

    fn string() -> Ty {
        Ty::parse("java.lang.String").unwrap()
    }

    fn message(result: Result<()>) -> String {
        match result {
            Err(Error::InvalidDescriptor { message, .. }) => message,
            other => panic!("expected an invalid descriptor, got {other:?}"),
        }
    }

    #[test]
    fn accepts_a_plain_activity() {
        let activity = activity()
            .with_param(ParamDescriptor::new("id", string()))
            .with_result(Ty::parse("com.example.MainResult").unwrap());
        validate_activity(&activity, &RuntimeApi::default()).unwrap();
    }

    #[test]
    fn rejects_missing_urls() {
        let mut activity = activity();
        activity.urls.clear();
        assert!(message(validate_activity(&activity, &RuntimeApi::default())).contains("url"));
        activity.urls.push("  ".into());
        assert!(message(validate_activity(&activity, &RuntimeApi::default())).contains("empty"));
    }

    #[test]
    fn rejects_bad_and_duplicate_keys() {
        let keyword = activity().with_param(ParamDescriptor::new("class", string()));
        assert!(message(validate_activity(&keyword, &RuntimeApi::default())).contains("class"));

        let duplicate = activity()
            .with_param(ParamDescriptor::new("id", string()))
            .with_param(ParamDescriptor::new("id", string()));
        assert!(message(validate_activity(&duplicate, &RuntimeApi::default())).contains("more than once"));
    }

    #[test]
    fn rejects_tags_that_cannot_suffix_a_method() {
        let activity = activity().with_param(ParamDescriptor::new("id", string()).with_tags(["by-id"]));
        assert!(message(validate_activity(&activity, &RuntimeApi::default())).contains("by-id"));
    }

    #[test]
    fn rejects_primitive_results() {
        let activity = activity().with_result(Ty::parse("int").unwrap());
        assert!(message(validate_activity(&activity, &RuntimeApi::default())).contains("int"));
    }

    #[test]
    fn rejects_non_concrete_results() {
        for result in ["com.example.Box<?>", "com.example.Box<T>", "com.example.Box<java.util.List<? extends T>>"] {
            let activity = activity().with_result(Ty::parse(result).unwrap());
            let text = message(validate_activity(&activity, &RuntimeApi::default()));
            assert!(text.contains("not a concrete type"), "{result}: {text}");
        }
        let primitive = activity().with_result(Ty::parse("com.example.Box<int>").unwrap());
        assert!(message(validate_activity(&primitive, &RuntimeApi::default())).contains("primitive `int`"));
    }

    #[test]
    fn rejects_primitive_type_arguments_naming_the_param() {
        let activity = activity_with_param("ids", "java.util.List<int>");
        match validate_activity(&activity, &RuntimeApi::default()) {
            Err(Error::UnsupportedType { activity, param, reason, .. }) => {
                assert_eq!(activity, "com.example.MainActivity");
                assert_eq!(param, "ids");
                assert!(reason.contains("int"), "{reason}");
            }
            other => panic!("expected an unsupported type, got {other:?}"),
        }
        let arrays = activity_with_param("ids", "java.util.List<int[]>");
        validate_activity(&arrays, &RuntimeApi::default()).unwrap();
    }

    fn activity_with_param(key: &str, ty: &str) -> ActivityDescriptor {
        activity().with_param(ParamDescriptor::new(key, Ty::parse(ty).unwrap()))
    }

    #[test]
    fn rejects_keys_that_obscure_runtime_receivers() {
        let runtime = RuntimeApi::default();
        for key in ["Porter", "TypeToken", "RouterDriver", "springboard", "com"] {
            let activity = activity_with_param(key, "int");
            assert!(
                message(validate_activity(&activity, &runtime)).contains("obscure"),
                "{key}"
            );
        }
        // Types only appear in declarations, where a variable cannot hide them.
        validate_activity(&activity_with_param("Warden", "int"), &runtime).unwrap();
    }

    #[test]
    fn rejects_unusable_config_names() {
        validate_config(&GeneratorConfig::default()).unwrap();
        let bad_class = GeneratorConfig {
            class_name: "My Routes".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(validate_config(&bad_class).unwrap_err().to_string().contains("My Routes"));
        let bad_package = GeneratorConfig {
            package: "com..nav".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(validate_config(&bad_package).is_err());
        let no_package = GeneratorConfig {
            package: String::new(),
            method_prefix: String::new(),
            ..GeneratorConfig::default()
        };
        validate_config(&no_package).unwrap();
    }

    #[test]
    fn rejects_duplicate_activities() {
        let err = validate_run(&[activity(), activity()], &RuntimeApi::default()).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
