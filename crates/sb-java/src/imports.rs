use std::collections::{BTreeSet, HashMap};

use sb_core::ClassName;

const JAVA_LANG: &str = "java.lang";

/// Decides, per referenced class, whether it is printed by simple name or qualified.
///
/// Classes in the unit's own package and in `java.lang` are visible without an import.
/// Any other top-level class is imported when its simple name is not claimed by a
/// different referenced class or by the unit itself.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    /// Simple name -> top-level class that owns it in this unit.
    short: HashMap<String, ClassName>,
    imports: BTreeSet<ClassName>,
}

impl ImportTable {
    pub fn build<'a>(
        package: &str,
        own: &ClassName,
        referenced: impl IntoIterator<Item = &'a ClassName>,
    ) -> Self {
        let mut by_simple: HashMap<String, BTreeSet<ClassName>> = HashMap::new();
        for class in referenced {
            let top = class.top_level();
            by_simple
                .entry(top.simple_name().to_string())
                .or_default()
                .insert(top);
        }

        let mut table = Self::default();
        table
            .short
            .insert(own.top_level().simple_name().to_string(), own.top_level());
        for (simple, candidates) in by_simple {
            if table.short.contains_key(&simple) || candidates.len() != 1 {
                continue;
            }
            let Some(top) = candidates.into_iter().next() else {
                continue;
            };
            if top.package().is_empty() && !package.is_empty() {
                // default-package classes cannot be imported
                continue;
            }
            let implicit = top.package() == package || top.package() == JAVA_LANG;
            if !implicit {
                table.imports.insert(top.clone());
            }
            table.short.insert(simple, top);
        }
        table
    }

    pub fn imports(&self) -> impl Iterator<Item = &ClassName> {
        self.imports.iter()
    }

    /// How `class` is spelled in the unit body.
    pub fn reference(&self, class: &ClassName) -> String {
        let top = class.top_level();
        match self.short.get(top.simple_name()) {
            Some(owner) if *owner == top => class.relative_name(),
            _ => class.canonical_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn class(name: &str) -> ClassName {
        ClassName::best_guess(name).unwrap()
    }

    #[test]
    fn imports_foreign_classes_and_skips_implicit_ones() {
        let own = class("com.example.nav.Routes");
        let referenced = [
            class("java.lang.String"),
            class("java.util.List"),
            class("com.example.nav.Helper"),
            class("springboard.runtime.Url.Builder"),
        ];
        let table = ImportTable::build("com.example.nav", &own, referenced.iter());
        let imports: Vec<String> = table.imports().map(ClassName::canonical_name).collect();
        assert_eq!(imports, vec!["java.util.List", "springboard.runtime.Url"]);
        assert_eq!(table.reference(&referenced[0]), "String");
        assert_eq!(table.reference(&referenced[2]), "Helper");
        assert_eq!(table.reference(&referenced[3]), "Url.Builder");
    }

    #[test]
    fn clashing_simple_names_stay_qualified() {
        let own = class("com.example.nav.Routes");
        let referenced = [
            class("com.example.a.Result"),
            class("com.example.b.Result"),
            class("com.example.c.Routes"),
        ];
        let table = ImportTable::build("com.example.nav", &own, referenced.iter());
        assert_eq!(table.imports().count(), 0);
        assert_eq!(table.reference(&referenced[0]), "com.example.a.Result");
        assert_eq!(table.reference(&referenced[2]), "com.example.c.Routes");
        assert_eq!(table.reference(&own), "Routes");
    }
}
