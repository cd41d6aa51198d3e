mod command_result;
pub mod convert;
pub mod init;
pub mod scan;

pub use command_result::*;
