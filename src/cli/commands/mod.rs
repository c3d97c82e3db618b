mod command_result;
pub mod enforce;
pub mod extract;
pub mod init;
pub mod localize;
pub mod simulate;

pub use command_result::*;
