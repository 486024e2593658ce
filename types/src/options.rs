/// Presentation options resolved from config and environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs for markers and the focus pointer.
    pub ascii_only: bool,
    pub high_contrast: bool,
}
