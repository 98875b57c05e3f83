//! Configuration module

mod build;
mod site;

pub use build::BuildConfig;
pub use site::HighlightConfig;
pub use site::SiteConfig;
