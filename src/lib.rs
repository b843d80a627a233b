pub mod error;
pub mod flags;
pub mod parser;
pub mod process;
pub mod shell;
