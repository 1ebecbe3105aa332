//! Carry node locations and link routes over from a previously generated
//! document, so positions arranged in the Block Editor survive a regeneration.
//!
//! The previous file is read loosely: the widget saves whatever the user did
//! in it (links drawn by hand carry no category, new nodes get numeric keys),
//! and only the entries whose keys match the new document matter here.

use std::{collections::BTreeMap, path::Path};

use serde_json::Value;
use tracing::{debug, warn};

use crate::mapper::BlockEditorModel;

/// Node locations by key and link routes by (from, to) from a saved document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedLayout {
    pub locs: BTreeMap<String, String>,
    pub points: BTreeMap<(String, String), Value>,
}

/// Node keys and link ends may be saved as strings or numbers.
fn key_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl SavedLayout {
    /// Pick the layout out of a saved document. `None` when `doc` is not
    /// shaped like a Block Editor document at all.
    pub fn from_document(doc: &Value) -> Option<Self> {
        let nodes = doc.get("class")?.as_array()?;
        let links = match doc.get("linkDataArray") {
            Some(links) => links.as_array()?.as_slice(),
            None => &[],
        };

        let mut layout = SavedLayout::default();
        for node in nodes {
            let loc = node.get("loc").and_then(Value::as_str);
            if let (Some(id), Some(loc)) = (key_text(node.get("id")), loc) {
                layout.locs.entry(id).or_insert_with(|| loc.to_owned());
            }
        }
        for link in links {
            let ends = key_text(link.get("from")).zip(key_text(link.get("to")));
            if let (Some(ends), Some(points)) = (ends, link.get("points")) {
                layout.points.entry(ends).or_insert_with(|| points.clone());
            }
        }
        Some(layout)
    }
}

/// Read the layout saved at `path`, if there is a usable document there.
pub fn previous(path: &Path) -> Option<SavedLayout> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            debug!("No previous layout at {}: {err}", path.display());
            return None;
        }
    };
    let layout = serde_json::from_str::<Value>(&json)
        .map_err(|err| err.to_string())
        .and_then(|doc| {
            SavedLayout::from_document(&doc).ok_or_else(|| "no class array".to_owned())
        });
    match layout {
        Ok(layout) => Some(layout),
        Err(err) => {
            warn!(
                "Ignoring the layout in {}, it is not a Block Editor document: {err}",
                path.display()
            );
            None
        }
    }
}

/// Copy `loc` by node id and `points` by (from, to) pair from `previous` into
/// `model`. Returns how many nodes and links picked up saved layout.
pub fn carry_over(model: &mut BlockEditorModel, previous: &SavedLayout) -> (usize, usize) {
    let mut nodes = 0;
    for node in &mut model.class {
        if let Some(loc) = previous.locs.get(&node.id) {
            node.loc = Some(loc.clone());
            nodes += 1;
        }
    }
    let mut links = 0;
    for link in &mut model.link_data_array {
        if let Some(p) = previous.points.get(&(link.from.clone(), link.to.clone())) {
            link.points = Some(p.clone());
            links += 1;
        }
    }
    (nodes, links)
}
