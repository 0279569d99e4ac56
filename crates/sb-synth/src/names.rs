use std::collections::HashSet;

use sb_core::ty::is_keyword;

/// Hands out identifiers that are unique within one generated method body.
///
/// Parameter names are reserved first so generated locals never shadow them; a taken
/// suggestion gets the smallest free `_N` suffix.
#[derive(Debug, Default, Clone)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self, name: impl Into<String>) -> bool {
        self.taken.insert(name.into())
    }

    pub fn allocate(&mut self, suggestion: &str) -> String {
        if !is_keyword(suggestion) && self.taken.insert(suggestion.to_string()) {
            return suggestion.to_string();
        }
        let mut n = 1usize;
        loop {
            let candidate = format!("{suggestion}_{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Upper-case the first character of a template tag for use as a method-name suffix.
///
/// A character whose upper case is not a single character (`ß` is `SS`) is kept as is.
pub fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let head = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };
    std::iter::once(head).chain(chars).collect()
}
