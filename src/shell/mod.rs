pub mod command;
pub mod lexer;
pub mod session;

pub use session::{Flow, Mode, Session};
