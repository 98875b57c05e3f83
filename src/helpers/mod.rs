//! Helper functions shared by content loading and templates

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
