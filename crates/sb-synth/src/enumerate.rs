//! Optional-parameter enumeration: one overload per inclusion subset of the ignorable
//! parameters of a template group.

use sb_core::ParamDescriptor;

/// Widest optional-parameter set a mask can describe; validation rejects wider ones.
pub const MAX_OPTIONAL_PARAMS: usize = 63;

/// One overload's parameter list together with the subset mask that produced it.
/// Bit `j` of `mask` set means the `j`-th optional parameter is included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalSubset<'a> {
    pub mask: u64,
    pub params: Vec<&'a ParamDescriptor>,
}

/// Lazily yields `2^n` subsets in ascending mask order. Each list is the mandatory
/// parameters followed by the included optional ones, both in declaration order.
#[derive(Debug, Clone)]
pub struct OptionalSubsets<'a> {
    mandatory: Vec<&'a ParamDescriptor>,
    optional: Vec<&'a ParamDescriptor>,
    next: u64,
    end: u64,
}

impl<'a> OptionalSubsets<'a> {
    pub fn new(params: &[&'a ParamDescriptor]) -> Self {
        let (optional, mandatory): (Vec<_>, Vec<_>) =
            params.iter().copied().partition(|param| param.ignore);
        let end = u32::try_from(optional.len())
            .ok()
            .and_then(|n| 1u64.checked_shl(n))
            .unwrap_or(u64::MAX);
        Self {
            mandatory,
            optional,
            next: 0,
            end,
        }
    }

    pub fn optional_count(&self) -> usize {
        self.optional.len()
    }
}

impl<'a> Iterator for OptionalSubsets<'a> {
    type Item = OptionalSubset<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let mask = self.next;
        self.next += 1;
        let mut params = self.mandatory.clone();
        params.extend(
            self.optional
                .iter()
                .enumerate()
                .filter(|(j, _)| *j < 64 && mask & (1u64 << j) != 0)
                .map(|(_, param)| *param),
        );
        Some(OptionalSubset { mask, params })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

pub fn optional_subsets<'a>(params: &[&'a ParamDescriptor]) -> OptionalSubsets<'a> {
    OptionalSubsets::new(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sb_core::Ty;

    fn params(layout: &[(&str, bool)]) -> Vec<ParamDescriptor> {
        layout.iter()
            .map(|(key, ignore)| {
                let param = ParamDescriptor::new(*key, Ty::parse("int").unwrap());
                if *ignore {
                    param.ignorable()
                } else {
                    param
                }
            })
            .collect()
    }

    fn keys(subset: &OptionalSubset<'_>) -> Vec<String> {
        subset.params.iter().map(|p| p.key.clone()).collect()
    }

    #[test]
    fn no_optional_params_yields_the_mandatory_list() {
        let owned = params(&[("a", false), ("b", false)]);
        let refs: Vec<_> = owned.iter().collect();
        let subsets: Vec<_> = optional_subsets(&refs).collect();
        assert_eq!(subsets.len(), 1);
        assert_eq!(keys(&subsets[0]), vec!["a", "b"]);
    }

    #[test]
    fn subsets_follow_ascending_mask_order() {
        let owned = params(&[("o1", true), ("m", false), ("o2", true)]);
        let refs: Vec<_> = owned.iter().collect();
        let subsets: Vec<Vec<String>> = optional_subsets(&refs).map(|s| keys(&s)).collect();
        assert_eq!(
            subsets,
            vec![
                vec!["m".to_string()],
                vec!["m".to_string(), "o1".to_string()],
                vec!["m".to_string(), "o2".to_string()],
                vec!["m".to_string(), "o1".to_string(), "o2".to_string()],
            ]
        );
    }

    #[test]
    fn every_subset_has_mandatory_prefix_and_popcount_length() {
        let owned = params(&[
            ("a", false),
            ("b", true),
            ("c", true),
            ("d", false),
            ("e", true),
        ]);
        let refs: Vec<_> = owned.iter().collect();
        let subsets: Vec<_> = optional_subsets(&refs).collect();
        assert_eq!(subsets.len(), 8);
        for subset in &subsets {
            let keys = keys(subset);
            assert_eq!(&keys[..2], &["a".to_string(), "d".to_string()]);
            assert_eq!(keys.len(), 2 + subset.mask.count_ones() as usize);
        }
    }

    #[test]
    fn each_optional_param_is_present_or_absent_exactly_once() {
        let owned = params(&[("x", true), ("y", true), ("z", true)]);
        let refs: Vec<_> = owned.iter().collect();
        for subset in optional_subsets(&refs) {
            for (j, key) in ["x", "y", "z"].iter().enumerate() {
                let count = subset.params.iter().filter(|p| p.key == *key).count();
                let expected = usize::from(subset.mask & (1 << j) != 0);
                assert_eq!(count, expected);
            }
        }
    }
}
