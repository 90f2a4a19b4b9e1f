pub mod components;
pub mod controller;

pub use controller::Controller;
