//! Generator configuration.
//!
//! Every name the generated unit uses for itself or for the runtime it calls into is a
//! value here, so a different runtime library only needs a different config file.

use serde::{Deserialize, Serialize};

use crate::ty::ClassName;

/// What to do when two generated methods end up with colliding signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    Allow,
    #[default]
    Warn,
    Deny,
}

/// Class and member names of the collaborator APIs the generated code calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeApi {
    /// Ambient context held by the generated class.
    pub context_class: ClassName,
    /// Address builder exposing `setAddress`, `addParam`, `build`.
    pub url_builder_class: ClassName,
    pub set_address_method: String,
    pub add_param_method: String,
    pub build_method: String,
    /// Runtime type token factory exposing `get` / `getParameterized` / `getArray`.
    pub type_token_class: ClassName,
    /// Reflected type the tokens resolve to.
    pub reflect_type_class: ClassName,
    pub converter_class: ClassName,
    pub converter_method: String,
    pub navigator_class: ClassName,
    pub navigator_method: String,
    /// Pending-result handle.
    pub handle_class: ClassName,
    pub handle_listener_field: String,
}

impl Default for RuntimeApi {
    fn default() -> Self {
        let runtime = "springboard.runtime";
        Self {
            context_class: ClassName::new("android.content", "Context"),
            url_builder_class: ClassName::new(runtime, "Url").nested("Builder"),
            set_address_method: "setAddress".to_string(),
            add_param_method: "addParam".to_string(),
            build_method: "build".to_string(),
            type_token_class: ClassName::new("com.google.gson.reflect", "TypeToken"),
            reflect_type_class: ClassName::new("java.lang.reflect", "Type"),
            converter_class: ClassName::new(runtime, "Porter"),
            converter_method: "fromObject".to_string(),
            navigator_class: ClassName::new(runtime, "RouterDriver"),
            navigator_method: "startActivityFromAPI".to_string(),
            handle_class: ClassName::new(runtime, "Warden"),
            handle_listener_field: "innerListener".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub package: String,
    pub class_name: String,
    pub method_prefix: String,
    pub context_field: String,
    pub header_comment: Option<String>,
    pub runtime: RuntimeApi,
    pub duplicates: DuplicatePolicy,
    /// Number of optional parameters on one template group above which a warning is
    /// logged; the variants are still generated.
    pub fanout_warning: u32,
    pub indent: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: "springboard.generated".to_string(),
            class_name: "Springboard".to_string(),
            method_prefix: "goto".to_string(),
            context_field: "context".to_string(),
            header_comment: Some("Generated by springboard. Do not modify!".to_string()),
            runtime: RuntimeApi::default(),
            duplicates: DuplicatePolicy::default(),
            fanout_warning: 8,
            indent: 4,
        }
    }
}

impl GeneratorConfig {
    pub fn unit_class(&self) -> ClassName {
        ClassName::new(self.package.clone(), self.class_name.clone())
    }
}
