//! Springboard method synthesis.
//!
//! For every activity: split parameters into template groups, enumerate the optional
//! parameter subsets of each group, and synthesize one method per variant. The methods
//! of all activities are then wrapped into a single generated class.

pub mod entry_point;
pub mod enumerate;
pub mod method;
pub mod names;
pub mod partition;
pub mod signature;
pub mod type_token;
pub mod validate;

pub use entry_point::EntryPointEmitter;
pub use enumerate::{optional_subsets, OptionalSubset, OptionalSubsets};
pub use method::MethodSynthesizer;
pub use partition::{partition, TemplateGroup};
pub use signature::{find_duplicates, DuplicateSignature};
pub use type_token::{TokenSlot, TypeTokenSynthesizer};

use sb_core::ir::{CompilationUnit, MethodSpec};
use sb_core::{ActivityDescriptor, DuplicatePolicy, Error, GeneratorConfig, Result};
use tracing::{debug, info, trace, warn};

/// Methods produced for one template group of one activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub tag: String,
    pub method: String,
    pub params: Vec<String>,
    pub optional: usize,
    pub variants: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityReport {
    pub activity: String,
    pub groups: Vec<GroupReport>,
}

impl ActivityReport {
    pub fn method_count(&self) -> usize {
        self.groups.iter().map(|group| group.variants).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub activities: Vec<ActivityReport>,
    pub duplicates: Vec<DuplicateSignature>,
}

impl GenerationReport {
    pub fn method_count(&self) -> usize {
        self.activities.iter().map(ActivityReport::method_count).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Generation {
    pub unit: CompilationUnit,
    pub report: GenerationReport,
}

pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Run one generation over the given activities. Fails as a whole: either every
    /// activity is synthesized or no unit is produced.
    pub fn generate(&self, activities: &[ActivityDescriptor]) -> Result<Generation> {
        validate::validate_config(&self.config)?;
        validate::validate_run(activities, &self.config.runtime)?;

        let synth = MethodSynthesizer::new(&self.config);
        let mut methods = Vec::new();
        let mut owners = Vec::new();
        let mut report = GenerationReport::default();

        for activity in activities {
            let (activity_methods, activity_report) = self.synthesize_activity(&synth, activity)?;
            owners.extend(std::iter::repeat(activity.qualified_name()).take(activity_methods.len()));
            methods.extend(activity_methods);
            report.activities.push(activity_report);
        }

        report.duplicates = find_duplicates(&methods, &owners);
        self.apply_duplicate_policy(&report.duplicates)?;

        let unit = EntryPointEmitter::new(&self.config).emit(methods);
        info!(
            "generated {} with {} methods for {} activities",
            unit.class.name,
            unit.class.methods.len(),
            activities.len()
        );
        Ok(Generation { unit, report })
    }

    fn synthesize_activity(
        &self,
        synth: &MethodSynthesizer<'_>,
        activity: &ActivityDescriptor,
    ) -> Result<(Vec<MethodSpec>, ActivityReport)> {
        let name = activity.qualified_name();
        let _span = tracing::debug_span!("activity", %name).entered();
        if activity.urls.len() > 1 {
            debug!("only the first of {} urls is used", activity.urls.len());
        }

        let mut methods = Vec::new();
        let mut groups = Vec::new();
        for group in partition(&activity.params) {
            let subsets = optional_subsets(&group.params);
            let optional = subsets.optional_count();
            if optional > self.config.fanout_warning as usize {
                warn!(
                    "{} optional parameters in group `{}` of {} expand to {} methods",
                    optional,
                    group.tag,
                    name,
                    1u128 << optional
                );
            }
            let mut variants = 0;
            for subset in subsets {
                let method = synth.synthesize(activity, &group.tag, &subset.params)?;
                trace!(method = %method.name, mask = subset.mask, params = method.params.len(), "synthesized");
                methods.push(method);
                variants += 1;
            }
            groups.push(GroupReport {
                method: synth.method_name(activity, &group.tag),
                params: group.keys().into_iter().map(str::to_string).collect(),
                tag: group.tag,
                optional,
                variants,
            });
        }
        debug!(groups = groups.len(), methods = methods.len(), "activity synthesized");
        Ok((
            methods,
            ActivityReport {
                activity: name,
                groups,
            },
        ))
    }

    fn apply_duplicate_policy(&self, duplicates: &[DuplicateSignature]) -> Result<()> {
        match self.config.duplicates {
            DuplicatePolicy::Allow => {
                if !duplicates.is_empty() {
                    debug!("{} duplicate signatures allowed", duplicates.len());
                }
            }
            DuplicatePolicy::Warn => {
                for duplicate in duplicates {
                    warn!(
                        "{}: {}({}) is generated more than once",
                        duplicate.activity, duplicate.method, duplicate.signature
                    );
                }
            }
            DuplicatePolicy::Deny => {
                if let Some(duplicate) = duplicates.first() {
                    return Err(Error::DuplicateSignature {
                        activity: duplicate.activity.clone(),
                        method: duplicate.method.clone(),
                        signature: duplicate.signature.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
