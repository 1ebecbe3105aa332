use std::collections::{BTreeMap, BTreeSet};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    loader::Records,
    records::{HyperRecord, RecordKind, Stance, Target},
    resolver::{Reached, Resolution},
};

/// How node keys are derived from record ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum KeyScheme {
    /// raw ids, switching to typed keys when two record kinds share an id
    #[default]
    Auto,
    /// always `<kind>-<id>`
    Typed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkCategory {
    BelongsTo,
    Counters,
    Supports,
    Opposes,
}

impl From<Stance> for LinkCategory {
    fn from(stance: Stance) -> Self {
        match stance {
            Stance::Supports => LinkCategory::Supports,
            Stance::Opposes => LinkCategory::Opposes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub text: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkData {
    pub from: String,
    pub to: String,
    pub category: LinkCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<serde_json::Value>,
}

/// The document the Block Editor widget loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockEditorModel {
    pub class: Vec<NodeData>,
    #[serde(rename = "linkDataArray")]
    pub link_data_array: Vec<LinkData>,
}

struct Keys {
    typed: bool,
}

impl Keys {
    fn new(scheme: KeyScheme, resolution: &Resolution) -> Self {
        let typed = match scheme {
            KeyScheme::Typed => true,
            KeyScheme::Auto => {
                let mut seen: BTreeSet<&str> = BTreeSet::new();
                // ids are unique within a kind, so any repeat is a cross-kind collision
                !resolution
                    .debates
                    .iter()
                    .chain(&resolution.positions)
                    .chain(&resolution.arguments)
                    .all(|r| seen.insert(r.id.as_str()))
            }
        };
        Keys { typed }
    }

    fn key(&self, kind: RecordKind, id: &str) -> String {
        if self.typed {
            format!("{kind}-{id}")
        } else {
            id.to_owned()
        }
    }
}

impl BlockEditorModel {
    pub fn from_resolution(records: &Records, resolution: &Resolution, scheme: KeyScheme) -> Self {
        let keys = Keys::new(scheme, resolution);
        let mut model = BlockEditorModel::default();

        model.add_nodes(&keys, &records.debates, &resolution.debates);
        model.add_nodes(&keys, &records.positions, &resolution.positions);
        model.add_nodes(&keys, &records.arguments, &resolution.arguments);

        let mut link = |from_kind: RecordKind,
                        from: &str,
                        to_kind: RecordKind,
                        to: &str,
                        category: LinkCategory,
                        text: Option<&String>| {
            // references leaving the resolved set are dropped, never emitted dangling
            if resolution.contains(to_kind, to) {
                model.link_data_array.push(LinkData {
                    from: keys.key(from_kind, from),
                    to: keys.key(to_kind, to),
                    category,
                    text: text.cloned(),
                    points: None,
                });
            }
        };

        for reached in &resolution.debates {
            if let Some(debate) = records.debates.get(&reached.id) {
                for parent in &debate.larger_debates {
                    link(
                        RecordKind::Debate,
                        &debate.id,
                        RecordKind::Debate,
                        parent,
                        LinkCategory::BelongsTo,
                        None,
                    );
                }
            }
        }
        for reached in &resolution.positions {
            if let Some(position) = records.positions.get(&reached.id) {
                for debate in &position.larger_debates {
                    link(
                        RecordKind::Position,
                        &position.id,
                        RecordKind::Debate,
                        debate,
                        LinkCategory::BelongsTo,
                        None,
                    );
                }
                for larger in &position.larger_positions {
                    link(
                        RecordKind::Position,
                        &position.id,
                        RecordKind::Position,
                        larger,
                        LinkCategory::Counters,
                        None,
                    );
                }
            }
        }
        for reached in &resolution.arguments {
            if let Some(argument) = records.arguments.get(&reached.id) {
                let targets = argument
                    .target_positions
                    .iter()
                    .map(|t| (RecordKind::Position, t))
                    .chain(
                        argument
                            .target_arguments
                            .iter()
                            .map(|t| (RecordKind::Argument, t)),
                    );
                for (to_kind, Target { id, stance, verdict }) in targets {
                    link(
                        RecordKind::Argument,
                        &argument.id,
                        to_kind,
                        id,
                        LinkCategory::from(*stance),
                        verdict.as_ref(),
                    );
                }
            }
        }

        model
    }

    fn add_nodes<R: HyperRecord>(
        &mut self,
        keys: &Keys,
        records: &BTreeMap<String, R>,
        reached: &[Reached],
    ) {
        for reached in reached {
            let Some(record) = records.get(&reached.id) else {
                continue;
            };
            let text = match record.name() {
                "" => format!("{} {}", R::KIND, record.id()),
                name => name.to_owned(),
            };
            self.class.push(NodeData {
                id: keys.key(R::KIND, record.id()),
                text,
                category: R::KIND.tag().to_owned(),
                group: reached
                    .group
                    .as_deref()
                    .map(|debate| keys.key(RecordKind::Debate, debate)),
                loc: None,
            });
        }
    }

    pub fn count_nodes(&self, category: RecordKind) -> usize {
        self.class
            .iter()
            .filter(|n| n.category == category.tag())
            .count()
    }

    pub fn count_links(&self, category: LinkCategory) -> usize {
        self.link_data_array
            .iter()
            .filter(|l| l.category == category)
            .count()
    }
}
