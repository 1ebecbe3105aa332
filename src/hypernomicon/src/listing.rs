use std::{collections::BTreeMap, path::Path};

use serde::Serialize;
use tracing::warn;

use crate::{
    error::ConvertResult,
    format::{as_table, TableStyle},
    loader,
    records::{Debate, Position},
};

/// One row of the `debates` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebateSummary {
    pub id: String,
    pub name: String,
    pub parents: Vec<String>,
    pub sub_debates: usize,
    /// Positions naming this debate directly; counter positions are not counted.
    pub positions: usize,
}

pub fn summarize(
    debates: &BTreeMap<String, Debate>,
    positions: &BTreeMap<String, Position>,
) -> Vec<DebateSummary> {
    debates
        .values()
        .map(|debate| DebateSummary {
            id: debate.id.clone(),
            name: debate.name.clone(),
            parents: debate.larger_debates.clone(),
            sub_debates: debates
                .values()
                .filter(|d| d.larger_debates.contains(&debate.id))
                .count(),
            positions: positions
                .values()
                .filter(|p| p.larger_debates.contains(&debate.id))
                .count(),
        })
        .collect()
}

/// Summaries of every debate in `debates_xml`. Position counts are zero when
/// `positions_xml` does not exist.
pub fn list(debates_xml: &Path, positions_xml: &Path) -> ConvertResult<Vec<DebateSummary>> {
    let debates = loader::load::<Debate>(debates_xml)?;
    let positions = if positions_xml.exists() {
        loader::load::<Position>(positions_xml)?
    } else {
        warn!(
            "{} not found, position counts are omitted",
            positions_xml.display()
        );
        BTreeMap::new()
    };
    Ok(summarize(&debates, &positions))
}

pub fn as_text(summaries: &[DebateSummary], style: TableStyle) -> String {
    let rows = summaries.iter().map(|s| {
        vec![
            s.id.clone(),
            s.name.clone(),
            s.parents.join(", "),
            s.sub_debates.to_string(),
            s.positions.to_string(),
        ]
    });
    as_table(
        style,
        ["Id", "Debate", "Part of", "Sub-debates", "Positions"],
        rows,
    )
}
