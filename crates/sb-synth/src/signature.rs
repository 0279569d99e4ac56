//! Detection of generated methods whose overloads would collide.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use itertools::Itertools;
use sb_core::ir::MethodSpec;
use sb_core::Ty;

/// A method that repeats the name and erased parameter types of an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSignature {
    /// Activity owning the repeated method.
    pub activity: String,
    pub method: String,
    /// Erased parameter types, comma separated.
    pub signature: String,
    /// Positions of the first occurrence and of the repeat in the method list.
    pub first: usize,
    pub repeat: usize,
}

/// `owners[i]` names the activity that produced `methods[i]`.
pub fn find_duplicates(methods: &[MethodSpec], owners: &[String]) -> Vec<DuplicateSignature> {
    let mut seen: HashMap<(&str, Vec<Ty>), usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for (index, method) in methods.iter().enumerate() {
        let erased = method.erased_signature();
        let signature = erased.iter().join(", ");
        match seen.entry((method.name.as_str(), erased)) {
            Entry::Occupied(entry) => duplicates.push(DuplicateSignature {
                activity: owners.get(index).cloned().unwrap_or_default(),
                method: method.name.clone(),
                signature,
                first: *entry.get(),
                repeat: index,
            }),
            Entry::Vacant(entry) => {
                entry.insert(index);
            }
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::ir::{Modifier, ParamSpec};

    fn method(name: &str, params: &[(&str, &str)]) -> MethodSpec {
        MethodSpec {
            name: name.to_string(),
            modifiers: vec![Modifier::Public],
            doc: None,
            returns: None,
            params: params
                .iter()
                .map(|(key, ty)| ParamSpec {
                    name: key.to_string(),
                    ty: Ty::parse(ty).unwrap(),
                    annotations: Vec::new(),
                })
                .collect(),
            body: Vec::new(),
        }
    }

    #[test]
    fn same_erased_types_collide_regardless_of_names() {
        let methods = vec![
            method("gotoA", &[("x", "java.lang.String")]),
            method("gotoA", &[("y", "java.lang.String")]),
            method("gotoA", &[("z", "int")]),
            method("gotoA", &[("l", "java.util.List<java.lang.String>")]),
            method("gotoA", &[("m", "java.util.List<java.lang.Long>")]),
        ];
        let owners = vec!["com.example.A".to_string(); methods.len()];
        let duplicates = find_duplicates(&methods, &owners);
        assert_eq!(duplicates.len(), 2);
        assert_eq!((duplicates[0].first, duplicates[0].repeat), (0, 1));
        assert_eq!(duplicates[0].signature, "java.lang.String");
        assert_eq!((duplicates[1].first, duplicates[1].repeat), (3, 4));
        assert_eq!(duplicates[1].signature, "java.util.List");
    }

    #[test]
    fn different_names_never_collide() {
        let methods = vec![method("gotoA", &[]), method("gotoB", &[])];
        let owners = vec!["A".to_string(), "B".to_string()];
        assert!(find_duplicates(&methods, &owners).is_empty());
    }
}
