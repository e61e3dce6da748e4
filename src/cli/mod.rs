pub mod list;
pub mod setup;
pub mod show;
pub mod ui;
