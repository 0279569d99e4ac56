//! Descriptor model: the immutable, already-discovered metadata of navigable targets.

use crate::common_struct;
use crate::ty::{ClassName, Ty};

common_struct! {
    /// A source-level marker replayed verbatim on the generated parameter.
    pub struct Annotation {
        pub class: ClassName,
        /// Raw member list, rendered between the parentheses when present.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub arguments: Option<String>,
    }
}

impl Annotation {
    pub fn marker(class: ClassName) -> Self {
        Self {
            class,
            arguments: None,
        }
    }
}

common_struct! {
    pub struct ParamDescriptor {
        pub key: String,
        #[serde(rename = "type")]
        pub ty: Ty,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub annotations: Vec<Annotation>,
        /// `null`, absent, `[]`, and `[""]` all mean untagged.
        #[serde(
            default,
            alias = "methods",
            deserialize_with = "null_as_empty",
            skip_serializing_if = "Vec::is_empty"
        )]
        pub method_tags: Vec<String>,
        #[serde(default)]
        pub ignore: bool,
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tags: Option<Vec<String>> = serde::Deserialize::deserialize(deserializer)?;
    Ok(tags.unwrap_or_default())
}

impl ParamDescriptor {
    pub fn new(key: impl Into<String>, ty: Ty) -> Self {
        Self {
            key: key.into(),
            ty,
            annotations: Vec::new(),
            method_tags: Vec::new(),
            ignore: false,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.method_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignorable(mut self) -> Self {
        self.ignore = true;
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Tags with the empty-string sentinel dropped and repeats collapsed, in
    /// declaration order. An empty result means the parameter is untagged.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::with_capacity(self.method_tags.len());
        for tag in &self.method_tags {
            if !tag.is_empty() && !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }

    pub fn is_untagged(&self) -> bool {
        self.tags().is_empty()
    }
}

common_struct! {
    pub struct ActivityDescriptor {
        pub name: ClassName,
        pub urls: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub result: Option<Ty>,
        #[serde(default)]
        pub params: Vec<ParamDescriptor>,
    }
}

impl ActivityDescriptor {
    pub fn new(name: ClassName, url: impl Into<String>) -> Self {
        Self {
            name,
            urls: vec![url.into()],
            result: None,
            params: Vec::new(),
        }
    }

    pub fn with_result(mut self, result: Ty) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_param(mut self, param: ParamDescriptor) -> Self {
        self.params.push(param);
        self
    }

    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }

    pub fn qualified_name(&self) -> String {
        self.name.canonical_name()
    }

    pub fn primary_url(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }
}

common_struct! {
    /// Serialized descriptor source, one per manifest file.
    pub struct Manifest {
        #[serde(default)]
        pub activities: Vec<ActivityDescriptor>,
    }
}
