pub mod format_spec;
pub mod generator;
pub mod loader;
pub mod mapping;
pub mod selector;
pub mod template;
