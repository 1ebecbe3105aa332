use clap::Parser;
use hyper2gojs::{service_management, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    service_management::start(&cli)?;
    hyper2gojs::execute(&cli)?;

    Ok(())
}
