pub mod local;
pub mod secrets;
pub mod settings;
