pub mod filter;
pub mod form;
pub mod player;
