// End-to-end synthesis over descriptor lists: method counts, names, signatures, and the
// duplicate-signature policies.

use pretty_assertions::assert_eq;
use sb_core::ir::{Expr, MethodSpec, Stmt};
use sb_core::{
    ActivityDescriptor, ClassName, DuplicatePolicy, Error, GeneratorConfig, ParamDescriptor, Ty,
};
use sb_synth::Generator;

fn ty(s: &str) -> Ty {
    Ty::parse(s).unwrap()
}

fn activity(name: &str) -> ActivityDescriptor {
    ActivityDescriptor::new(
        ClassName::new("com.example.ui", name),
        format!("app://{}", name.to_lowercase()),
    )
}

fn signature(method: &MethodSpec) -> Vec<String> {
    method
        .params
        .iter()
        .map(|param| format!("{} {}", param.ty, param.name))
        .collect()
}

fn generate(activities: &[ActivityDescriptor]) -> Vec<MethodSpec> {
    Generator::new(GeneratorConfig::default())
        .generate(activities)
        .unwrap()
        .unit
        .class
        .methods
}

#[test]
fn activity_without_params_or_result_yields_one_plain_method() {
    let methods = generate(&[activity("MainActivity")]);
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name, "gotoMainActivity");
    assert!(methods[0].params.is_empty());
    assert_eq!(
        methods[0].returns,
        Some(Ty::Class(ClassName::new("springboard.runtime", "Warden")))
    );
}

#[test]
fn mandatory_params_with_result_yield_one_parameterized_method() {
    let detail = activity("DetailActivity")
        .with_result(ty("com.example.ui.DetailResult"))
        .with_param(ParamDescriptor::new("id", ty("long")))
        .with_param(ParamDescriptor::new("title", ty("java.lang.String")));
    let methods = generate(&[detail]);
    assert_eq!(methods.len(), 1);
    assert_eq!(
        signature(&methods[0]),
        vec!["long id", "java.lang.String title"]
    );
    assert_eq!(
        methods[0].returns.as_ref().map(ToString::to_string),
        Some("springboard.runtime.Warden<com.example.ui.DetailResult>".to_string())
    );
}

#[test]
fn optional_params_yield_every_subset_under_one_name() {
    let search = activity("SearchActivity")
        .with_param(ParamDescriptor::new("query", ty("java.lang.String")))
        .with_param(ParamDescriptor::new("page", ty("int")).ignorable())
        .with_param(ParamDescriptor::new("sort", ty("java.lang.String")).ignorable());
    let methods = generate(&[search]);
    assert_eq!(methods.len(), 4);
    assert!(methods.iter().all(|m| m.name == "gotoSearchActivity"));
    let signatures: Vec<_> = methods.iter().map(signature).collect();
    assert_eq!(
        signatures,
        vec![
            vec!["java.lang.String query"],
            vec!["java.lang.String query", "int page"],
            vec!["java.lang.String query", "java.lang.String sort"],
            vec!["java.lang.String query", "int page", "java.lang.String sort"],
        ]
    );
}

#[test]
fn tagged_params_split_into_suffixed_methods() {
    let profile = activity("ProfileActivity")
        .with_param(ParamDescriptor::new("a", ty("int")))
        .with_param(ParamDescriptor::new("b", ty("long")).with_tags(["x"]))
        .with_param(ParamDescriptor::new("c", ty("java.lang.String")).with_tags(["y"]));
    let methods = generate(&[profile]);
    let layout: Vec<_> = methods
        .iter()
        .map(|m| (m.name.as_str(), signature(m)))
        .collect();
    assert_eq!(
        layout,
        vec![
            ("gotoProfileActivityX", vec!["int a".to_string(), "long b".to_string()]),
            (
                "gotoProfileActivityY",
                vec!["int a".to_string(), "java.lang.String c".to_string()]
            ),
        ]
    );
}

#[test]
fn methods_follow_activity_then_group_then_subset_order() {
    let first = activity("FirstActivity")
        .with_param(ParamDescriptor::new("o", ty("int")).ignorable().with_tags(["b"]))
        .with_param(ParamDescriptor::new("p", ty("int")).with_tags(["a"]));
    let second = activity("SecondActivity");
    let generation = Generator::new(GeneratorConfig::default())
        .generate(&[first, second])
        .unwrap();
    let names: Vec<_> = generation
        .unit
        .class
        .methods
        .iter()
        .map(|m| (m.name.clone(), m.params.len()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("gotoFirstActivityB".to_string(), 0),
            ("gotoFirstActivityB".to_string(), 1),
            ("gotoFirstActivityA".to_string(), 1),
            ("gotoSecondActivity".to_string(), 0),
        ]
    );
    assert_eq!(generation.report.method_count(), 4);
    assert_eq!(generation.report.activities[0].groups[0].optional, 1);
}

fn colliding() -> ActivityDescriptor {
    // Either optional parameter on its own yields `gotoEditActivity(String)`.
    activity("EditActivity")
        .with_param(ParamDescriptor::new("name", ty("java.lang.String")).ignorable())
        .with_param(ParamDescriptor::new("alias", ty("java.lang.String")).ignorable())
}

#[test]
fn duplicate_signatures_are_emitted_and_reported_by_default() {
    let generation = Generator::new(GeneratorConfig::default())
        .generate(&[colliding()])
        .unwrap();
    assert_eq!(generation.unit.class.methods.len(), 4);
    assert_eq!(generation.report.duplicates.len(), 1);
    let duplicate = &generation.report.duplicates[0];
    assert_eq!(duplicate.method, "gotoEditActivity");
    assert_eq!(duplicate.signature, "java.lang.String");
    assert_eq!((duplicate.first, duplicate.repeat), (1, 2));
}

#[test]
fn allow_policy_emits_every_method_and_still_reports() {
    let config = GeneratorConfig {
        duplicates: DuplicatePolicy::Allow,
        ..GeneratorConfig::default()
    };
    let generation = Generator::new(config).generate(&[colliding()]).unwrap();
    assert_eq!(generation.unit.class.methods.len(), 4);
    assert_eq!(generation.report.duplicates.len(), 1);
    assert_eq!(generation.report.duplicates[0].method, "gotoEditActivity");
}

#[test]
fn deny_policy_rejects_duplicate_signatures() {
    let config = GeneratorConfig {
        duplicates: DuplicatePolicy::Deny,
        ..GeneratorConfig::default()
    };
    let err = Generator::new(config).generate(&[colliding()]).unwrap_err();
    assert!(matches!(err, Error::DuplicateSignature { .. }), "{err}");
}

#[test]
fn unsupported_param_type_fails_the_whole_run() {
    let fine = activity("FineActivity");
    let broken = activity("BrokenActivity")
        .with_param(ParamDescriptor::new("item", ty("java.util.List<? extends T>")));
    let err = Generator::new(GeneratorConfig::default())
        .generate(&[fine, broken])
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("BrokenActivity"), "{message}");
    assert!(message.contains("item"), "{message}");
}

#[test]
fn primitive_type_argument_fails_naming_the_param() {
    let broken = activity("ListActivity")
        .with_param(ParamDescriptor::new("ids", ty("java.util.List<int>")));
    let err = Generator::new(GeneratorConfig::default())
        .generate(&[broken])
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { .. }), "{err}");
    let message = err.to_string();
    assert!(message.contains("ListActivity"), "{message}");
    assert!(message.contains("ids"), "{message}");
}

#[test]
fn only_first_url_is_used() {
    let mut main = activity("MainActivity");
    main.urls = vec!["app://a".to_string(), "app://b".to_string()];
    let methods = generate(&[main]);
    assert_eq!(methods.len(), 1);
    let body = &methods[0].body;
    assert!(body.contains(&Stmt::Expr(
        Expr::local("builder").call("setAddress", vec![Expr::string("app://a")])
    )));
    assert!(!format!("{body:?}").contains("app://b"));
}

#[test]
fn configured_prefix_and_class_flow_into_the_unit() {
    let config = GeneratorConfig {
        package: "com.example.nav".to_string(),
        class_name: "Routes".to_string(),
        method_prefix: "open".to_string(),
        ..GeneratorConfig::default()
    };
    let generation = Generator::new(config)
        .generate(&[activity("MainActivity")])
        .unwrap();
    assert_eq!(
        generation.unit.class.name.canonical_name(),
        "com.example.nav.Routes"
    );
    assert_eq!(generation.unit.class.methods[0].name, "openMainActivity");
}
