pub mod file_controller;
pub mod health_controller;
pub mod snippet_controller;
