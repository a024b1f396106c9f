/// Widgets and styling
///
/// - The upload page layout (form.rs)
/// - Brand colors and palette (theme.rs)

pub mod form;
pub mod theme;
