mod manager;

pub use manager::TabManager;
