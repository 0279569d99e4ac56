//! Template partitioning: split an activity's parameters into named method groups.
//!
//! Untagged parameters are shared: they join every group, whether the group was opened
//! before or after the parameter was declared. Tagged parameters stay private to the
//! groups they name.

use sb_core::ParamDescriptor;

/// Parameters of one template group, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateGroup<'a> {
    /// Empty for the untagged base group.
    pub tag: String,
    pub params: Vec<&'a ParamDescriptor>,
}

impl<'a> TemplateGroup<'a> {
    pub fn keys(&self) -> Vec<&'a str> {
        self.params.iter().map(|param| param.key.as_str()).collect()
    }
}

/// Single left-to-right pass. Groups come back in the order their tag first appears;
/// when no parameter carries a tag the result is the one base group keyed by `""`.
pub fn partition(params: &[ParamDescriptor]) -> Vec<TemplateGroup<'_>> {
    let mut base: Vec<&ParamDescriptor> = Vec::new();
    let mut groups: Vec<TemplateGroup<'_>> = Vec::new();

    for param in params {
        if param.is_untagged() {
            base.push(param);
            for group in &mut groups {
                group.params.push(param);
            }
            continue;
        }
        for tag in param.tags() {
            let index = match groups.iter().position(|group| group.tag == tag) {
                Some(index) => index,
                None => {
                    groups.push(TemplateGroup {
                        tag: tag.to_string(),
                        params: base.clone(),
                    });
                    groups.len() - 1
                }
            };
            groups[index].params.push(param);
        }
    }

    if groups.is_empty() {
        vec![TemplateGroup {
            tag: String::new(),
            params: base,
        }]
    } else {
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sb_core::Ty;

    fn param(key: &str, tags: &[&str]) -> ParamDescriptor {
        ParamDescriptor::new(key, Ty::parse("java.lang.String").unwrap()).with_tags(tags.iter().copied())
    }

    fn layout<'a>(groups: &[TemplateGroup<'a>]) -> Vec<(String, Vec<&'a str>)> {
        groups
            .iter()
            .map(|group| (group.tag.clone(), group.keys()))
            .collect()
    }

    #[test]
    fn untagged_params_form_the_base_group() {
        let params = vec![param("a", &[]), param("b", &[""]), param("c", &[])];
        assert_eq!(
            layout(&partition(&params)),
            vec![(String::new(), vec!["a", "b", "c"])]
        );
    }

    #[test]
    fn empty_param_list_still_yields_one_group() {
        let groups = partition(&[]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].tag.is_empty());
        assert!(groups[0].params.is_empty());
    }

    #[test]
    fn untagged_params_declared_later_join_existing_groups() {
        let params = vec![param("a", &[]), param("b", &["x"]), param("c", &[])];
        assert_eq!(
            layout(&partition(&params)),
            vec![("x".to_string(), vec!["a", "b", "c"])]
        );
    }

    #[test]
    fn tagged_params_stay_private_to_their_groups() {
        let params = vec![param("a", &[]), param("b", &["x"]), param("c", &["y"])];
        assert_eq!(
            layout(&partition(&params)),
            vec![
                ("x".to_string(), vec!["a", "b"]),
                ("y".to_string(), vec!["a", "c"]),
            ]
        );
    }

    #[test]
    fn multi_tag_param_joins_each_group_once() {
        let params = vec![
            param("a", &["x"]),
            param("b", &["x", "y", "x"]),
            param("c", &[]),
            param("d", &["y"]),
        ];
        assert_eq!(
            layout(&partition(&params)),
            vec![
                ("x".to_string(), vec!["a", "b", "c"]),
                ("y".to_string(), vec!["b", "c", "d"]),
            ]
        );
    }

    #[test]
    fn groups_preserve_declaration_order() {
        let params = vec![
            param("p0", &[]),
            param("p1", &["y"]),
            param("p2", &["x"]),
            param("p3", &[]),
            param("p4", &["x", "y"]),
            param("p5", &[]),
        ];
        for group in partition(&params) {
            let positions: Vec<usize> = group
                .params
                .iter()
                .map(|p| params.iter().position(|q| q.key == p.key).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        }
    }
}
