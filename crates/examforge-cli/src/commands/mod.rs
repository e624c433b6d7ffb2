pub mod generate;
pub mod init;
pub mod key;
pub mod remove;
pub mod validate;
