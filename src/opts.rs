use crate::task::TaskMode;

/// Options that control how subtitles are generated.
///
/// This struct represents *library-level configuration*, not CLI flags
/// directly. The frontends are responsible for mapping user input into this
/// type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (APIs, tests, batch jobs) can construct options
///   programmatically
#[derive(Debug, Clone, Default)]
pub struct Opts {
    /// Whether to transcribe verbatim or translate speech to English.
    pub task: TaskMode,

    /// Optional language hint (e.g. `"en"`, `"ja"`).
    ///
    /// When `None`, we allow the model to auto-detect the spoken language.
    pub language: Option<String>,
}
