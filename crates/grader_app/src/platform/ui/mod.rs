pub mod constants;
pub mod layout;
pub mod page;
pub mod render;
