pub mod api;
pub mod arguments;
pub mod dto;
pub mod run;
pub mod transactions;

pub use self::run::{run, start};
