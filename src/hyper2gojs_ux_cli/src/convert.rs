use anyhow::Context;
use hypernomicon::{
    cmd::ConvertArgs,
    format::{as_table, TableStyle},
    ConvertConfig,
};

pub fn execute(args: &ConvertArgs) -> anyhow::Result<()> {
    let config = ConvertConfig::from(args);
    let report = hypernomicon::convert(&config)
        .with_context(|| format!("[convert] debate {} failed", config.debate_id))?;

    if args.stats_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if args.stats {
        let headers = [format!("Debate {}", report.debate_id), "Count".to_owned()];
        println!("{}", as_table(TableStyle::Ascii, headers, report.rows()));
    }
    Ok(())
}
