use anyhow::Result;
use colored::Colorize;

use nook_infrastructure::ConfigService;

/// Writes the default config file unless one already exists.
pub fn init(service: &ConfigService) -> Result<()> {
    let path = service.path().display();

    if service.ensure_config_file()? {
        println!("{}", format!("Created {}", path).bright_green());
    } else {
        println!("{}", format!("{} already exists", path).bright_black());
    }

    Ok(())
}
