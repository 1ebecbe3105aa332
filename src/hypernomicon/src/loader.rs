use std::{collections::BTreeMap, path::Path};

use tracing::{debug, warn};

use crate::{
    config::ConvertConfig,
    error::{ConvertError, ConvertResult},
    records::{Argument, Debate, HyperRecord, Position},
};

/// Parse one Hypernomicon XML export into its records of kind `R`, keyed by id.
pub fn load<R: HyperRecord>(path: &Path) -> ConvertResult<BTreeMap<String, R>> {
    if !path.exists() {
        return Err(ConvertError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let xml = std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse::<R>(&xml).map_err(|source| ConvertError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Loaded {} {} records from {}",
        records.len(),
        R::KIND,
        path.display()
    );
    Ok(records)
}

/// Same as [`load`] but from an in-memory document.
pub fn parse<R: HyperRecord>(xml: &str) -> Result<BTreeMap<String, R>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;

    let mut records: BTreeMap<String, R> = BTreeMap::new();
    for element in doc.descendants().filter(|n| n.has_tag_name("record")) {
        // untyped records are taken as the file's own kind
        if let Some(kind) = element.attribute("type") {
            if kind != R::KIND.tag() {
                continue;
            }
        }
        let Some(id) = element.attribute("id").map(str::trim).filter(|id| !id.is_empty()) else {
            warn!(
                "Skipping {} record without an id (line {})",
                R::KIND,
                doc.text_pos_at(element.range().start).row
            );
            continue;
        };
        if records.contains_key(id) {
            warn!("Duplicate {} id {id}, keeping the first record", R::KIND);
            continue;
        }
        records.insert(id.to_owned(), R::from_element(id, element));
    }
    Ok(records)
}

/// Everything read from the three XML exports for one run.
#[derive(Debug, Default, Clone)]
pub struct Records {
    pub debates: BTreeMap<String, Debate>,
    pub positions: BTreeMap<String, Position>,
    pub arguments: BTreeMap<String, Argument>,
}

impl Records {
    pub fn load(config: &ConvertConfig) -> ConvertResult<Self> {
        Ok(Records {
            debates: load(&config.debates_xml)?,
            positions: load(&config.positions_xml)?,
            arguments: load(&config.arguments_xml)?,
        })
    }
}
