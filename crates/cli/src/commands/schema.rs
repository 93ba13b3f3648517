use anyhow::Result;
use phony_core::configs::config_schema;

pub fn execute() -> Result<()> {
    println!("{}", config_schema()?);
    Ok(())
}
