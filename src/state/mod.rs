/// State management module
///
/// This module handles all UI state, including:
/// - The picked invoice and its preview (image.rs)
/// - The busy flag and submission outcome (form.rs)

pub mod form;
pub mod image;
