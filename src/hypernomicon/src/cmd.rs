use clap::Args;
use serde::Serialize;

use crate::mapper::KeyScheme;

pub const DEFAULT_DEBATE_ID: &str = "1";
pub const DEFAULT_DEBATES_XML: &str = "Debates.xml";
pub const DEFAULT_POSITIONS_XML: &str = "Positions.xml";
pub const DEFAULT_ARGUMENTS_XML: &str = "Arguments.xml";
/// `{debate}` is replaced with the requested debate id.
pub const DEFAULT_JSON_FS_PATH: &str = "hyper2gojs_{debate}.json";
pub const DEFAULT_HTML_FS_PATH: &str = "blockEditor.html";

/// Convert one debate of a Hypernomicon export into Block Editor JSON
#[derive(Debug, Serialize, Args, Clone)]
pub struct ConvertArgs {
    /// id of the debate to convert
    #[arg(short = 'D', long, default_value = DEFAULT_DEBATE_ID, env = "HYPER2GOJS_DEBATE")]
    pub debate: String,

    /// Hypernomicon debates export
    #[arg(long, default_value = DEFAULT_DEBATES_XML, env = "HYPER2GOJS_DEBATES_XML")]
    pub debates: String,

    /// Hypernomicon positions export
    #[arg(long, default_value = DEFAULT_POSITIONS_XML, env = "HYPER2GOJS_POSITIONS_XML")]
    pub positions: String,

    /// Hypernomicon arguments export
    #[arg(long, default_value = DEFAULT_ARGUMENTS_XML, env = "HYPER2GOJS_ARGUMENTS_XML")]
    pub arguments: String,

    /// JSON output, overwritten on every run
    #[arg(long, default_value = DEFAULT_JSON_FS_PATH, env = "HYPER2GOJS_JSON")]
    pub json: String,

    /// HTML page created from the bundled Block Editor template when absent
    #[arg(long, default_value = DEFAULT_HTML_FS_PATH, env = "HYPER2GOJS_HTML")]
    pub html: String,

    /// don't create the HTML page
    #[arg(long)]
    pub no_html: bool,

    /// write the JSON into the page's `mySavedModel` textarea
    #[arg(long, conflicts_with = "no_html")]
    pub embed: bool,

    /// open the HTML page in the default browser afterwards
    #[arg(long, conflicts_with = "no_html")]
    pub open: bool,

    /// ignore node locations and link points saved in the previous JSON output
    #[arg(long)]
    pub fresh_layout: bool,

    /// how node keys are built from record ids
    #[arg(long, value_enum, default_value_t = KeyScheme::Auto)]
    pub key_scheme: KeyScheme,

    /// show node and link counts as an ASCII table after completion
    #[arg(long)]
    pub stats: bool,

    /// show node and link counts in JSON after completion
    #[arg(long)]
    pub stats_json: bool,
}

/// List the debates of a Hypernomicon export
#[derive(Debug, Serialize, Args, Clone)]
pub struct DebatesArgs {
    /// Hypernomicon debates export
    #[arg(long, default_value = DEFAULT_DEBATES_XML, env = "HYPER2GOJS_DEBATES_XML")]
    pub debates: String,

    /// Hypernomicon positions export, used for the position counts
    #[arg(long, default_value = DEFAULT_POSITIONS_XML, env = "HYPER2GOJS_POSITIONS_XML")]
    pub positions: String,

    /// emit the listing as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// emit the listing as a markdown table
    #[arg(long, conflicts_with = "json")]
    pub markdown: bool,
}
