use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    browser,
    config::ConvertConfig,
    error::ConvertResult,
    layout,
    loader::Records,
    mapper::{BlockEditorModel, LinkCategory},
    output,
    records::RecordKind,
    resolver::resolve,
};

/// What one conversion produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConvertReport {
    pub debate_id: String,
    pub debate_found: bool,
    pub json_path: PathBuf,
    pub html_path: Option<PathBuf>,
    pub html_created: bool,
    pub json_embedded: bool,
    pub debates: usize,
    pub positions: usize,
    pub arguments: usize,
    pub belongs_to_links: usize,
    pub counters_links: usize,
    pub supports_links: usize,
    pub opposes_links: usize,
    pub nodes_with_saved_layout: usize,
    pub links_with_saved_layout: usize,
}

impl ConvertReport {
    pub fn nodes(&self) -> usize {
        self.debates + self.positions + self.arguments
    }

    pub fn links(&self) -> usize {
        self.belongs_to_links + self.counters_links + self.supports_links + self.opposes_links
    }

    /// (label, count) rows for display.
    pub fn rows(&self) -> Vec<Vec<String>> {
        [
            ("debate nodes", self.debates),
            ("position nodes", self.positions),
            ("argument nodes", self.arguments),
            ("belongs-to links", self.belongs_to_links),
            ("counters links", self.counters_links),
            ("supports links", self.supports_links),
            ("opposes links", self.opposes_links),
            ("nodes with saved layout", self.nodes_with_saved_layout),
            ("links with saved layout", self.links_with_saved_layout),
        ]
        .into_iter()
        .map(|(label, count)| vec![label.to_owned(), count.to_string()])
        .collect()
    }
}

/// Build the Block Editor document for `config.debate_id` from already loaded records.
pub fn build_model(records: &Records, config: &ConvertConfig) -> BlockEditorModel {
    let resolution = resolve(records, &config.debate_id);
    if resolution.is_empty() {
        warn!(
            "Debate {} not found in {}, writing an empty document",
            config.debate_id,
            config.debates_xml.display()
        );
    }
    BlockEditorModel::from_resolution(records, &resolution, config.key_scheme)
}

/// Load, resolve, map and write everything `config` asks for.
pub fn convert(config: &ConvertConfig) -> ConvertResult<ConvertReport> {
    let records = Records::load(config)?;
    let mut model = build_model(&records, config);

    let mut report = ConvertReport {
        debate_id: config.debate_id.clone(),
        debate_found: records.debates.contains_key(&config.debate_id),
        json_path: config.json_path.clone(),
        html_path: config.html_path.clone(),
        debates: model.count_nodes(RecordKind::Debate),
        positions: model.count_nodes(RecordKind::Position),
        arguments: model.count_nodes(RecordKind::Argument),
        belongs_to_links: model.count_links(LinkCategory::BelongsTo),
        counters_links: model.count_links(LinkCategory::Counters),
        supports_links: model.count_links(LinkCategory::Supports),
        opposes_links: model.count_links(LinkCategory::Opposes),
        ..Default::default()
    };

    if config.keep_layout {
        if let Some(previous) = layout::previous(&config.json_path) {
            let (nodes, links) = layout::carry_over(&mut model, &previous);
            report.nodes_with_saved_layout = nodes;
            report.links_with_saved_layout = links;
        }
    }

    output::write_json(&model, &config.json_path)?;
    info!(
        "Debate {}: {} nodes and {} links written to {}",
        config.debate_id,
        report.nodes(),
        report.links(),
        config.json_path.display()
    );

    if let Some(html_path) = &config.html_path {
        report.html_created = output::materialize_html(html_path)?;
        if report.html_created {
            info!("Created {} from the Block Editor template", html_path.display());
        }
        if config.embed {
            report.json_embedded = output::embed_json(&model, html_path)?;
        }
        if config.open_browser {
            if let Err(err) = browser::launch(html_path) {
                warn!("Unable to open {} in a browser: {err}", html_path.display());
            }
        }
    }

    Ok(report)
}
