pub mod app;
pub mod collision;
pub mod constants;
pub mod entities;
pub mod game;
pub mod input;
pub mod options;
pub mod rendering;
pub mod scheduler;
pub mod terminal_io;
pub mod types;
