pub mod defaults;
pub mod ui;
