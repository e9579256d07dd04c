// Readpace services
// One module per component: classification, estimation, completion tracking,
// debouncing, settings storage and the session that ties them together.

pub mod completion;
pub mod debounce;
pub mod density;
pub mod estimator;
pub mod html_document;
#[cfg(feature = "network")]
pub mod page_loader;
pub mod readability;
pub mod reading_session;
pub mod settings_engine;
