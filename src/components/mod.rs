pub mod manager;
pub mod path_explorer;
