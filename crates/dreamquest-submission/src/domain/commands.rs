//! Commands for the Job Submission context.

use dreamquest_core::command::Command;
use dreamquest_core::job::JobInput;
use uuid::Uuid;

/// Command to submit a new job.
#[derive(Debug, Clone)]
pub struct SubmitJob {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The request as submitted.
    pub input: JobInput,
}

impl Command for SubmitJob {
    fn command_type(&self) -> &'static str {
        "submission.submit_job"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn job_id(&self) -> Option<Uuid> {
        None
    }
}

#[cfg(test)]
mod tests {
    use dreamquest_core::job::{Length, Mood, OutputType, Style};

    use super::*;

    #[test]
    fn test_submit_job_has_no_job_yet() {
        let command = SubmitJob {
            correlation_id: Uuid::new_v4(),
            input: JobInput {
                dream_text: Some("A storm over the ocean at dawn.".to_owned()),
                audio_url: None,
                output_type: OutputType::Game,
                style: Style::Toon,
                mood: Mood::Tense,
                length: Length::Long,
                user_id: None,
            },
        };

        assert_eq!(command.job_id(), None);
        assert_eq!(command.command_type(), "submission.submit_job");
    }
}
