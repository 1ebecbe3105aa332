use std::path::PathBuf;

use crate::{cmd::ConvertArgs, mapper::KeyScheme};

const DEBATE_PLACEHOLDER: &str = "{debate}";

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub debate_id: String,
    pub debates_xml: PathBuf,
    pub positions_xml: PathBuf,
    pub arguments_xml: PathBuf,
    pub json_path: PathBuf,
    /// `None` when no HTML page is wanted.
    pub html_path: Option<PathBuf>,
    pub embed: bool,
    pub open_browser: bool,
    pub keep_layout: bool,
    pub key_scheme: KeyScheme,
}

impl ConvertConfig {
    pub fn new(args: &ConvertArgs) -> Self {
        let debate_id = args.debate.trim().to_owned();
        let json_path = PathBuf::from(args.json.replace(DEBATE_PLACEHOLDER, &debate_id));

        ConvertConfig {
            debates_xml: PathBuf::from(&args.debates),
            positions_xml: PathBuf::from(&args.positions),
            arguments_xml: PathBuf::from(&args.arguments),
            json_path,
            html_path: (!args.no_html).then(|| PathBuf::from(&args.html)),
            embed: args.embed,
            open_browser: args.open,
            keep_layout: !args.fresh_layout,
            key_scheme: args.key_scheme,
            debate_id,
        }
    }
}

#[cfg(test)]
impl ConvertConfig {
    /// Defaults for `debate_id` with every file relative to the current directory.
    pub fn for_debate(debate_id: &str) -> Self {
        ConvertConfig {
            debate_id: debate_id.to_owned(),
            debates_xml: PathBuf::from(crate::cmd::DEFAULT_DEBATES_XML),
            positions_xml: PathBuf::from(crate::cmd::DEFAULT_POSITIONS_XML),
            arguments_xml: PathBuf::from(crate::cmd::DEFAULT_ARGUMENTS_XML),
            json_path: PathBuf::from(
                crate::cmd::DEFAULT_JSON_FS_PATH.replace(DEBATE_PLACEHOLDER, debate_id),
            ),
            html_path: Some(PathBuf::from(crate::cmd::DEFAULT_HTML_FS_PATH)),
            embed: false,
            open_browser: false,
            keep_layout: true,
            key_scheme: KeyScheme::Auto,
        }
    }
}

impl From<&ConvertArgs> for ConvertConfig {
    fn from(value: &ConvertArgs) -> Self {
        ConvertConfig::new(value)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ConvertArgs,
    }

    fn config(argv: &[&str]) -> ConvertConfig {
        let cli = TestCli::parse_from(std::iter::once("hyper2gojs").chain(argv.iter().copied()));
        ConvertConfig::from(&cli.args)
    }

    #[test]
    fn test_json_path_names_the_debate() {
        let config = config(&["--debate", "42"]);
        assert_eq!(config.debate_id, "42");
        assert_eq!(config.json_path, PathBuf::from("hyper2gojs_42.json"));
        assert_eq!(config.html_path, Some(PathBuf::from("blockEditor.html")));
        assert!(config.keep_layout);
    }

    #[test]
    fn test_no_html_and_fresh_layout() {
        let config = config(&["--no-html", "--fresh-layout", "--json", "out.json"]);
        assert_eq!(config.html_path, None);
        assert!(!config.keep_layout);
        assert_eq!(config.json_path, PathBuf::from("out.json"));
    }

    #[test]
    fn test_for_debate_matches_cli_defaults() {
        let parsed = config(&["-D", "7"]);
        let built = ConvertConfig::for_debate("7");
        assert_eq!(parsed.json_path, built.json_path);
        assert_eq!(parsed.debates_xml, built.debates_xml);
        assert_eq!(parsed.key_scheme, built.key_scheme);
    }
}
