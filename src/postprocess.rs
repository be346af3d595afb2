// Post-transcription text conversion
// Script conversion is an external collaborator; the core only dispatches

use crate::settings::PostprocessMode;

/// Chinese script conversion collaborator.
///
/// Hosts that support conversion plug in a real implementation (e.g. an
/// OpenCC binding); everyone else uses [`IdentityConverter`].
pub trait TextConverter: Send + Sync {
    fn to_simplified(&self, text: &str) -> String;
    fn to_traditional(&self, text: &str) -> String;
}

/// Pass-through converter for deployments without script conversion.
pub struct IdentityConverter;

impl TextConverter for IdentityConverter {
    fn to_simplified(&self, text: &str) -> String {
        text.to_string()
    }

    fn to_traditional(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Apply the configured postprocessing mode to transcribed text.
pub fn apply(mode: PostprocessMode, converter: &dyn TextConverter, text: &str) -> String {
    match mode {
        PostprocessMode::None => text.to_string(),
        PostprocessMode::ToSimplified => converter.to_simplified(text),
        PostprocessMode::ToTraditional => converter.to_traditional(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MarkingConverter;

    impl TextConverter for MarkingConverter {
        fn to_simplified(&self, text: &str) -> String {
            format!("s:{text}")
        }

        fn to_traditional(&self, text: &str) -> String {
            format!("t:{text}")
        }
    }

    #[test]
    fn none_mode_passes_text_through() {
        assert_eq!(apply(PostprocessMode::None, &MarkingConverter, "你好"), "你好");
    }

    #[test]
    fn conversion_modes_dispatch_to_converter() {
        assert_eq!(
            apply(PostprocessMode::ToSimplified, &MarkingConverter, "文"),
            "s:文"
        );
        assert_eq!(
            apply(PostprocessMode::ToTraditional, &MarkingConverter, "文"),
            "t:文"
        );
    }

    #[test]
    fn identity_converter_changes_nothing() {
        assert_eq!(
            apply(PostprocessMode::ToSimplified, &IdentityConverter, "hello"),
            "hello"
        );
        assert_eq!(
            apply(PostprocessMode::ToTraditional, &IdentityConverter, "hello"),
            "hello"
        );
    }
}
