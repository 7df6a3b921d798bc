//! Generation handlers.

mod generate_website;

pub use generate_website::{
    GenerateWebsiteCommand, GenerateWebsiteHandler, GenerateWebsiteResult, GenerationSettings,
};
