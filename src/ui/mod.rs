mod app;
pub mod cards;
pub mod components;

pub use app::App;
