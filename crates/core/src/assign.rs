//! Score-part label matching.
//!
//! Score parts come out of uploaded sheet music as free-text labels such as
//! "1st Trumpet (Kari)". When a label mentions a roster member's first name,
//! the part is assigned to that member. This is a deliberate first-match
//! substring heuristic, not a best-match algorithm: downstream consumers
//! depend on its exact tie-break and accumulation behavior, so it must not
//! be "improved".

use crate::document::{Assignment, Member};
use std::collections::HashMap;

/// Match an ordered sequence of part labels against a band roster.
///
/// For each label, the first roster member (in iteration order) whose
/// lower-cased first name token occurs in the lower-cased label wins.
/// When a label that already produced a matched assignment matches again,
/// the member is appended to the existing entry instead of creating a
/// duplicate — accumulation is by exact label equality, not by musical
/// identity. Labels matching nobody yield an entry with no members and
/// never accumulate.
///
/// Output order follows input label order.
pub fn assign_parts(labels: &[String], roster: &[Member]) -> Vec<Assignment> {
    let mut assignments: Vec<Assignment> = Vec::with_capacity(labels.len());
    // Label -> index of the matched entry it produced.
    let mut matched_labels: HashMap<&str, usize> = HashMap::new();

    for label in labels {
        let haystack = label.to_lowercase();
        let hit = roster.iter().find(|member| {
            member
                .name
                .split_whitespace()
                .next()
                .is_some_and(|first| haystack.contains(&first.to_lowercase()))
        });

        match hit {
            Some(member) => {
                if let Some(&index) = matched_labels.get(label.as_str()) {
                    assignments[index].members.push(member.id.clone());
                } else {
                    matched_labels.insert(label.as_str(), assignments.len());
                    assignments.push(Assignment {
                        part: label.clone(),
                        members: vec![member.id.clone()],
                    });
                }
            }
            None => assignments.push(Assignment {
                part: label.clone(),
                members: Vec::new(),
            }),
        }
    }

    assignments
}
