use crate::error::{HarnessError, Result};
use crate::models::config::{project_config_path, save_config};

use super::Context;

pub fn show_config(ctx: &Context, save: bool) -> Result<()> {
    let json = serde_json::to_string_pretty(&ctx.config)
        .map_err(|e| HarnessError::Config(format!("Failed to serialize config: {}", e)))?;
    println!("{}", json);

    if save {
        let path = project_config_path(ctx.workspace.root());
        save_config(&path, &ctx.config)?;
        println!();
        println!("Saved to {}", path.display());
    }
    Ok(())
}
