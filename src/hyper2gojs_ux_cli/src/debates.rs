use std::path::Path;

use anyhow::Context;
use hypernomicon::{cmd::DebatesArgs, format::TableStyle, listing};

pub fn execute(args: &DebatesArgs) -> anyhow::Result<()> {
    let summaries = listing::list(Path::new(&args.debates), Path::new(&args.positions))
        .with_context(|| format!("[debates] unable to list {}", args.debates))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        let style = if args.markdown {
            TableStyle::Markdown
        } else {
            TableStyle::Ascii
        };
        println!("{}", listing::as_text(&summaries, style));
    }
    Ok(())
}
