//! Replacement merge.
//!
//! Replacements of the source module are dropped from the destination, since
//! it stops being an external dependency once absorbed. Source replacements
//! the destination lacks are added. The same original coordinate redirected
//! to two different targets is a conflict that needs a human.

use modgraft_core::manifest::Manifest;
use modgraft_util::errors::GraftError;

use crate::report::{Decision, MergeReport};

pub fn merge_replacements(
    dest: &mut Manifest,
    src: &Manifest,
    report: &mut MergeReport,
) -> Result<(), GraftError> {
    let self_path = src.module.as_str();
    let dropped: Vec<_> = dest
        .replace
        .iter()
        .filter(|r| r.old.path == self_path)
        .cloned()
        .collect();
    for directive in dropped {
        dest.drop_replace(&directive.old);
        report.push(Decision::ReplaceDropped { directive });
    }

    for s in &src.replace {
        if s.old.path == self_path {
            tracing::warn!(directive = %s, "source replaces itself, skipping");
            continue;
        }

        match dest.find_replace(&s.old) {
            Some(d) if d.new == s.new => {
                report.push(Decision::ReplaceMatched {
                    directive: s.clone(),
                });
            }
            Some(d) => {
                return Err(GraftError::ConflictingReplacement {
                    dest: d.to_string(),
                    src: s.to_string(),
                });
            }
            None => {
                dest.add_replace(s.old.clone(), s.new.clone());
                report.push(Decision::ReplaceAdded {
                    directive: s.clone(),
                });
            }
        }
    }

    Ok(())
}
