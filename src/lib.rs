pub mod board;
pub mod game;
pub mod session;
pub mod web;

pub use board::*;
pub use game::*;
pub use session::*;
