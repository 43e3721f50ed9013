//! Chat interaction rules: message validation and canned mascot replies.

use crate::error::CoreError;
use crate::stats::Mood;

/// Maximum characters accepted in one chat message.
pub const MAX_MESSAGE_LENGTH: usize = 500;

const JOYFUL_REPLIES: &[&str] = &[
    "What a great day to be outside!",
    "I'm so happy you're here!",
    "Let's go chase some sunshine!",
];

const CONTENT_REPLIES: &[&str] = &[
    "Nice to hear from you.",
    "Did you check the forecast today?",
    "I like spending time with you.",
];

const SAD_REPLIES: &[&str] = &[
    "I feel a little gloomy... maybe we could play?",
    "It's a cloudy kind of day for me.",
];

const TIRED_REPLIES: &[&str] = &[
    "I'm so sleepy... a snack would help.",
    "Yawn... can we rest for a bit?",
];

/// Validate a chat message and return it trimmed.
pub fn validate_message(message: &str) -> Result<&str, CoreError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Chat message must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Chat message must be at most {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}

/// Candidate replies for a mood. Never empty.
pub fn replies_for(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Joyful => JOYFUL_REPLIES,
        Mood::Content => CONTENT_REPLIES,
        Mood::Sad => SAD_REPLIES,
        Mood::Tired => TIRED_REPLIES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_message() {
        assert_eq!(validate_message("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn rejects_blank_and_oversized() {
        assert!(validate_message(" \n ").is_err());
        assert!(validate_message(&"a".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
        assert!(validate_message(&"a".repeat(MAX_MESSAGE_LENGTH)).is_ok());
    }

    #[test]
    fn every_mood_has_replies() {
        for mood in [Mood::Joyful, Mood::Content, Mood::Sad, Mood::Tired] {
            assert!(!replies_for(mood).is_empty());
        }
    }
}
