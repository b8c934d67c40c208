use serde::Deserialize;

/// What the speech model should do with the audio.
///
/// Why this exists:
/// - We want a single, strongly-typed representation of the task across the
///   CLI, the server, and library code.
/// - Using an enum avoids stringly-typed conditionals and keeps mode
///   selection explicit and discoverable.
///
/// Integration notes:
/// - `ValueEnum` (behind the `cli` feature) allows this enum to be used
///   directly as a CLI flag with `clap`.
/// - `Deserialize` allows it to appear in server query strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TaskMode {
    /// Transcribe speech verbatim in the spoken language.
    #[default]
    Transcribe,

    /// Translate speech to English while transcribing.
    Translate,
}

impl TaskMode {
    /// Whether the backend should translate to English.
    pub fn translate_to_english(self) -> bool {
        matches!(self, Self::Translate)
    }
}
