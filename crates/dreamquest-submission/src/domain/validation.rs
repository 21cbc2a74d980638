//! Input validation, applied before a job record is created.

use dreamquest_core::error::DomainError;
use dreamquest_core::job::JobInput;

/// Fewest characters accepted in `dream_text`, after trimming.
pub const MIN_DREAM_TEXT_CHARS: usize = 30;

/// Most characters accepted in `dream_text`, after trimming.
pub const MAX_DREAM_TEXT_CHARS: usize = 2000;

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Checks a submitted job.
///
/// # Errors
///
/// Returns `DomainError::Validation` when neither dream text nor audio is
/// given, when the dream text is outside the accepted length, or when a
/// supplied `user_id` is blank.
pub fn validate(input: &JobInput) -> Result<(), DomainError> {
    let dream_text = present(input.dream_text.as_deref());

    if dream_text.is_none() && present(input.audio_url.as_deref()).is_none() {
        return Err(DomainError::Validation(
            "either dream_text or audio_url must be provided".into(),
        ));
    }

    if let Some(text) = dream_text {
        let chars = text.chars().count();
        if !(MIN_DREAM_TEXT_CHARS..=MAX_DREAM_TEXT_CHARS).contains(&chars) {
            return Err(DomainError::Validation(format!(
                "dream_text must be between {MIN_DREAM_TEXT_CHARS} and \
                 {MAX_DREAM_TEXT_CHARS} characters, got {chars}"
            )));
        }
    }

    if input.user_id.is_some() && present(input.user_id.as_deref()).is_none() {
        return Err(DomainError::Validation("user_id must not be blank".into()));
    }

    Ok(())
}
