//! Type hoisting
//!
//! A baseless type with exactly one member is a pass-through wrapper. The
//! hoister removes such wrappers and points every member that referenced
//! one at the wrapped type instead, adding the wrapper member's rank:
//!
//! ```text
//! log:  version runs;   log.runs: run[] (rank 1)
//! runs: run*;     ──▶   (runs removed)
//! run:  tool results;
//! ```
//!
//! Chains of wrappers collapse in one hop. Wrappers that form a cycle are
//! left in place. The input model is not modified; types without affected
//! members are shared with the output.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::{debug, trace, warn};

use crate::model::{DataModel, DataModelType};

/// Replace references to one type by references to `becomes`, with
/// `added_rank` extra levels of collection nesting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HoistAction {
    pub becomes: SmolStr,
    pub added_rank: u32,
}

/// The resolved hoist actions for `model`, keyed by the declared name of each
/// type that will be removed.
pub fn hoist_actions(model: &DataModel) -> FxHashMap<SmolStr, HoistAction> {
    let mut edges = candidate_edges(model);
    remove_cycles(&mut edges);
    resolve_transitive(&edges)
}

/// Produce a new model with every hoistable wrapper type removed.
pub fn hoist(model: &DataModel) -> DataModel {
    let actions = hoist_actions(model);
    if actions.is_empty() {
        debug!("no types to hoist");
        return model.clone();
    }

    let types: Vec<Arc<DataModelType>> = model
        .shared_types()
        .filter(|t| !actions.contains_key(&t.declared_name))
        .map(|t| rewrite_members(t, &actions))
        .collect();

    debug!(
        hoisted = actions.len(),
        remaining = types.len(),
        "hoisted wrapper types"
    );
    DataModel::new(model.metadata().clone(), types)
}

/// One edge per baseless single-member type: the wrapper becomes its member.
fn candidate_edges(model: &DataModel) -> FxHashMap<SmolStr, HoistAction> {
    model
        .types()
        .filter(|t| t.is_single_member_wrapper())
        .map(|t| {
            let member = &t.members[0];
            (
                t.declared_name.clone(),
                HoistAction {
                    becomes: member.declared_name.clone(),
                    added_rank: member.rank,
                },
            )
        })
        .collect()
}

/// Drop every edge that lies on a cycle.
///
/// Starting points are visited in name order so the outcome does not depend
/// on hash order. When a walk revisits a name, the chain from the first
/// occurrence of that name onwards is removed.
fn remove_cycles(edges: &mut FxHashMap<SmolStr, HoistAction>) {
    let mut starts: Vec<SmolStr> = edges.keys().cloned().collect();
    starts.sort();

    for start in starts {
        if !edges.contains_key(&start) {
            continue;
        }
        let mut chain = vec![start.clone()];
        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
        seen.insert(start.clone());

        let mut current = start;
        while let Some(action) = edges.get(&current) {
            let next = action.becomes.clone();
            trace!("[HOIST] {} -> {}", current, next);
            if !seen.insert(next.clone()) {
                let from = chain.iter().position(|name| *name == next).unwrap_or(0);
                let cycle = chain.split_off(from);
                warn!(
                    cycle = ?cycle,
                    "wrapper types form a cycle and will not be hoisted"
                );
                for name in &cycle {
                    edges.remove(name);
                }
                break;
            }
            chain.push(next.clone());
            current = next;
        }
    }
}

/// Point every edge directly at the end of its chain, summing ranks.
fn resolve_transitive(
    edges: &FxHashMap<SmolStr, HoistAction>,
) -> FxHashMap<SmolStr, HoistAction> {
    edges
        .iter()
        .map(|(name, action)| {
            let mut resolved = action.clone();
            let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
            seen.insert(name.clone());
            while let Some(next) = edges.get(&resolved.becomes) {
                if !seen.insert(resolved.becomes.clone()) {
                    break;
                }
                resolved.added_rank += next.added_rank;
                resolved.becomes = next.becomes.clone();
            }
            if resolved.becomes != action.becomes {
                trace!(
                    "[HOIST] {} resolves through {} to {}",
                    name, action.becomes, resolved.becomes
                );
            }
            (name.clone(), resolved)
        })
        .collect()
}

fn rewrite_members(
    data_type: &Arc<DataModelType>,
    actions: &FxHashMap<SmolStr, HoistAction>,
) -> Arc<DataModelType> {
    let affected = data_type
        .members
        .iter()
        .any(|m| actions.contains_key(&m.declared_name));
    if !affected {
        return Arc::clone(data_type);
    }

    let mut rewritten = DataModelType::clone(data_type);
    for member in &mut rewritten.members {
        if let Some(action) = actions.get(&member.declared_name) {
            *member = member.retargeted(&action.becomes, action.added_rank);
        }
    }
    Arc::new(rewritten)
}
