use crate::shared::Result;

/// OutputPresenter port for presenting formatted report output
///
/// Implementations decide where the content goes (file, stdout, ...).
pub trait OutputPresenter {
    /// Present the formatted content
    fn present(&self, content: &str) -> Result<()>;
}
