use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::{debug, trace};

use crate::{loader::Records, records::RecordKind};

/// A record retained for the output, with the debate it was reached through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reached {
    pub id: String,
    /// Owning debate id; `None` only for the requested debate itself.
    pub group: Option<String>,
}

/// The closed set of records belonging to one debate, in visit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub debate_id: String,
    pub debates: Vec<Reached>,
    pub positions: Vec<Reached>,
    pub arguments: Vec<Reached>,
    visited: BTreeSet<(RecordKind, String)>,
}

impl Resolution {
    /// True when the requested debate was not found in the export.
    pub fn is_empty(&self) -> bool {
        self.debates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.debates.len() + self.positions.len() + self.arguments.len()
    }

    pub fn contains(&self, kind: RecordKind, id: &str) -> bool {
        self.visited.contains(&(kind, id.to_owned()))
    }

    /// Records the visit and returns false when `id` was already retained.
    fn visit(&mut self, kind: RecordKind, id: &str, group: Option<&str>) -> bool {
        if !self.visited.insert((kind, id.to_owned())) {
            return false;
        }
        let reached = Reached {
            id: id.to_owned(),
            group: group.map(str::to_owned),
        };
        match kind {
            RecordKind::Debate => self.debates.push(reached),
            RecordKind::Position => self.positions.push(reached),
            RecordKind::Argument => self.arguments.push(reached),
        }
        true
    }
}

/// Reverse references: for each parent id, the ids of the records pointing at it.
#[derive(Debug, Default)]
struct Children {
    debates_of_debate: BTreeMap<String, Vec<String>>,
    positions_of_debate: BTreeMap<String, Vec<String>>,
    positions_of_position: BTreeMap<String, Vec<String>>,
    arguments_of_position: BTreeMap<String, Vec<String>>,
    arguments_of_argument: BTreeMap<String, Vec<String>>,
}

impl Children {
    fn index(records: &Records) -> Self {
        fn add(map: &mut BTreeMap<String, Vec<String>>, parent: &str, child: &str) {
            map.entry(parent.to_owned()).or_default().push(child.to_owned());
        }

        // records iterate in id order, so every child list is sorted
        let mut children = Children::default();
        for (id, debate) in &records.debates {
            for parent in &debate.larger_debates {
                add(&mut children.debates_of_debate, parent, id);
            }
        }
        for (id, position) in &records.positions {
            for parent in &position.larger_debates {
                add(&mut children.positions_of_debate, parent, id);
            }
            for parent in &position.larger_positions {
                add(&mut children.positions_of_position, parent, id);
            }
        }
        for (id, argument) in &records.arguments {
            for target in &argument.target_positions {
                add(&mut children.arguments_of_position, &target.id, id);
            }
            for target in &argument.target_arguments {
                add(&mut children.arguments_of_argument, &target.id, id);
            }
        }
        children
    }
}

fn children_of<'a>(map: &'a BTreeMap<String, Vec<String>>, id: &str) -> &'a [String] {
    map.get(id).map(Vec::as_slice).unwrap_or_default()
}

/// Collect `debate_id`, its sub-debates, their positions (including counter
/// positions at any depth) and every argument aimed at a retained position or
/// argument. Breadth-first over an explicit work list; each record is visited
/// at most once, so reference cycles terminate.
pub fn resolve(records: &Records, debate_id: &str) -> Resolution {
    let mut resolution = Resolution {
        debate_id: debate_id.to_owned(),
        ..Default::default()
    };
    if !records.debates.contains_key(debate_id) {
        return resolution;
    }

    let children = Children::index(records);
    let mut queue: VecDeque<(RecordKind, String, Option<String>)> = VecDeque::new();
    resolution.visit(RecordKind::Debate, debate_id, None);
    queue.push_back((RecordKind::Debate, debate_id.to_owned(), None));

    while let Some((kind, id, group)) = queue.pop_front() {
        trace!("Resolving {kind} {id}");
        let next: Vec<(RecordKind, &[String], Option<&str>)> = match kind {
            RecordKind::Debate => vec![
                (
                    RecordKind::Debate,
                    children_of(&children.debates_of_debate, &id),
                    Some(id.as_str()),
                ),
                (
                    RecordKind::Position,
                    children_of(&children.positions_of_debate, &id),
                    Some(id.as_str()),
                ),
            ],
            RecordKind::Position => vec![
                (
                    RecordKind::Position,
                    children_of(&children.positions_of_position, &id),
                    group.as_deref(),
                ),
                (
                    RecordKind::Argument,
                    children_of(&children.arguments_of_position, &id),
                    group.as_deref(),
                ),
            ],
            RecordKind::Argument => vec![(
                RecordKind::Argument,
                children_of(&children.arguments_of_argument, &id),
                group.as_deref(),
            )],
        };

        for (child_kind, child_ids, child_group) in next {
            for child_id in child_ids {
                if resolution.visit(child_kind, child_id, child_group) {
                    queue.push_back((
                        child_kind,
                        child_id.clone(),
                        child_group.map(str::to_owned),
                    ));
                }
            }
        }
    }

    debug!(
        "Debate {debate_id}: {} records ({} debates, {} positions, {} arguments)",
        resolution.len(),
        resolution.debates.len(),
        resolution.positions.len(),
        resolution.arguments.len()
    );
    resolution
}
