pub mod bench;
pub mod check;
pub mod list;
pub mod menu;
pub mod show;
