//! Exclusion merge: a plain union keyed on the exact coordinate.

use modgraft_core::manifest::Manifest;

use crate::report::{Decision, MergeReport};

pub fn merge_excludes(dest: &mut Manifest, src: &Manifest, report: &mut MergeReport) {
    for s in &src.exclude {
        if dest.add_exclude(&s.module.path, &s.module.version) {
            report.push(Decision::ExcludeAdded {
                module: s.module.clone(),
            });
        } else {
            report.push(Decision::ExcludeMatched {
                module: s.module.clone(),
            });
        }
    }
}
