mod button;
mod checkbox;
mod dropdown;

pub use button::button;
pub use checkbox::checkbox;
pub use dropdown::{DropdownId, OnPick, dropdown};
