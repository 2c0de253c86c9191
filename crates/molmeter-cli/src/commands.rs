pub mod measure;
pub mod settings;
