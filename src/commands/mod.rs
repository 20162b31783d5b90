pub mod config_cmd;
pub mod scan;
pub mod sync;

pub use config_cmd::execute_config;
pub use scan::execute_scan;
pub use sync::execute_sync;
