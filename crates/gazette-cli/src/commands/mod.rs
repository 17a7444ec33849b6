//! Command implementations.

pub mod config;
pub mod init_db;
pub mod run;
pub mod segment;
pub mod status;

pub use self::config::execute_config;
pub use self::init_db::execute_init_db;
pub use self::run::{execute_process, execute_run};
pub use self::segment::execute_segment;
pub use self::status::execute_status;
