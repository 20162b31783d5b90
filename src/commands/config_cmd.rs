use crate::config::{Config, config_file_path, ensure_config_file};
use crate::error::AppError;
use crate::path::display_path;

pub struct ConfigOptions {
    pub show_path: bool,
    pub init: bool,
}

pub fn execute_config(options: ConfigOptions) -> Result<(), AppError> {
    if options.init {
        let path = ensure_config_file()?;
        println!("Configuration file ready at {}", display_path(&path));
    }

    if options.show_path || !options.init {
        let path = config_file_path()?;
        println!("Configuration file: {}", display_path(&path));
    }

    if !options.show_path && !options.init {
        let config = Config::load()?;
        let rendered = toml::to_string_pretty(&config)?;
        print!("{rendered}");
    }

    Ok(())
}
