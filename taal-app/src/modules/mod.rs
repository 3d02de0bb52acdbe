pub mod app;
pub mod greeting;
pub mod language_selector;
