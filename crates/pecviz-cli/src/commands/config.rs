use crate::cli::{ConfigArgs, ConfigCommands};
use crate::data::DataManager;
use crate::error::Result;

pub async fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => handle_path(&DataManager::new()?),
    }
}

fn handle_path(manager: &DataManager) -> Result<()> {
    let path = manager.default_config_path()?;
    let status = if path.exists() { "" } else { " (not created yet)" };
    println!("{}{}", path.display(), status);
    Ok(())
}
