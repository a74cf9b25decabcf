use parking_lot::Mutex;

use crate::models::config::EnhancementConfig;
use crate::models::content_models::EnhancementOption;
use crate::models::error::CaptureError;

/// Placeholder enhancement flow state.
///
/// ```text
/// empty → loaded → enhancing → enhanced
///           ↑                     │
///           └──── load_image ─────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhancementState {
    Empty,
    Loaded {
        source_uri: String,
    },
    Enhancing {
        source_uri: String,
        option_id: String,
    },
    Enhanced {
        source_uri: String,
        option_id: String,
        result_uri: String,
    },
}

impl EnhancementState {
    pub fn is_enhancing(&self) -> bool {
        matches!(self, Self::Enhancing { .. })
    }

    pub fn source_uri(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Loaded { source_uri }
            | Self::Enhancing { source_uri, .. }
            | Self::Enhanced { source_uri, .. } => Some(source_uri),
        }
    }
}

/// Suspend-then-resolve stand-in for a remote enhancement service.
///
/// No image processing happens: after the configured delay the result is
/// the source image itself, tagged with the chosen option. There is no
/// cancellation and no failure path once the delay has started.
pub struct EnhancementSession {
    config: EnhancementConfig,
    options: Vec<EnhancementOption>,
    state: Mutex<EnhancementState>,
}

impl EnhancementSession {
    pub fn new(config: EnhancementConfig, options: Vec<EnhancementOption>) -> Self {
        Self {
            config,
            options,
            state: Mutex::new(EnhancementState::Empty),
        }
    }

    pub fn options(&self) -> &[EnhancementOption] {
        &self.options
    }

    pub fn state(&self) -> EnhancementState {
        self.state.lock().clone()
    }

    /// Select the image to enhance, dropping any earlier result.
    pub fn load_image(&self, uri: impl Into<String>) -> Result<(), CaptureError> {
        let mut state = self.state.lock();
        if state.is_enhancing() {
            return Err(CaptureError::OperationInProgress);
        }
        *state = EnhancementState::Loaded {
            source_uri: uri.into(),
        };
        Ok(())
    }

    /// Run the placeholder enhancement. Transitions: loaded/enhanced → enhancing → enhanced.
    pub async fn enhance(&self, option_id: &str) -> Result<String, CaptureError> {
        if !self.options.iter().any(|o| o.id == option_id) {
            return Err(CaptureError::ContentError(format!(
                "unknown enhancement option: {}",
                option_id
            )));
        }

        let source_uri = {
            let mut state = self.state.lock();
            let source_uri = match &*state {
                EnhancementState::Empty => {
                    return Err(CaptureError::InvalidState("no image loaded".into()));
                }
                EnhancementState::Enhancing { .. } => return Err(CaptureError::OperationInProgress),
                EnhancementState::Loaded { source_uri }
                | EnhancementState::Enhanced { source_uri, .. } => source_uri.clone(),
            };
            *state = EnhancementState::Enhancing {
                source_uri: source_uri.clone(),
                option_id: option_id.to_string(),
            };
            source_uri
        };

        log::debug!("Enhancing {} with '{}'", source_uri, option_id);
        tokio::time::sleep(self.config.delay()).await;

        *self.state.lock() = EnhancementState::Enhanced {
            source_uri: source_uri.clone(),
            option_id: option_id.to_string(),
            result_uri: source_uri.clone(),
        };
        Ok(source_uri)
    }

    /// Back to empty. Not allowed while an enhancement is running.
    pub fn reset(&self) -> Result<(), CaptureError> {
        let mut state = self.state.lock();
        if state.is_enhancing() {
            return Err(CaptureError::OperationInProgress);
        }
        *state = EnhancementState::Empty;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn options() -> Vec<EnhancementOption> {
        vec![
            EnhancementOption {
                id: "auto".into(),
                name: "Auto Enhance".into(),
                description: "Automatically enhance your photo".into(),
            },
            EnhancementOption {
                id: "retouch".into(),
                name: "Retouch".into(),
                description: "Smooth skin and remove blemishes".into(),
            },
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn enhance_waits_for_configured_delay() {
        let session = EnhancementSession::new(EnhancementConfig::default(), options());
        session.load_image("file:///photo.jpg").unwrap();

        let started = tokio::time::Instant::now();
        let result = session.enhance("auto").await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(result, "file:///photo.jpg");
        assert_eq!(
            session.state(),
            EnhancementState::Enhanced {
                source_uri: "file:///photo.jpg".into(),
                option_id: "auto".into(),
                result_uri: "file:///photo.jpg".into(),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn second_enhance_while_running_is_rejected() {
        let session = Arc::new(EnhancementSession::new(EnhancementConfig::default(), options()));
        session.load_image("file:///photo.jpg").unwrap();

        let task = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.enhance("auto").await }
        });
        tokio::task::yield_now().await;

        assert!(session.state().is_enhancing());
        assert_eq!(
            session.enhance("retouch").await,
            Err(CaptureError::OperationInProgress)
        );
        assert_eq!(
            session.load_image("file:///other.jpg"),
            Err(CaptureError::OperationInProgress)
        );

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(task.await.unwrap().is_ok());
        assert!(!session.state().is_enhancing());
    }

    #[tokio::test]
    async fn enhance_without_image_is_rejected() {
        let session = EnhancementSession::new(EnhancementConfig { delay_ms: 0 }, options());
        assert!(matches!(
            session.enhance("auto").await,
            Err(CaptureError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn unknown_option_is_rejected() {
        let session = EnhancementSession::new(EnhancementConfig { delay_ms: 0 }, options());
        session.load_image("file:///photo.jpg").unwrap();
        assert!(matches!(
            session.enhance("sharpen").await,
            Err(CaptureError::ContentError(_))
        ));
        assert_eq!(session.state().source_uri(), Some("file:///photo.jpg"));
    }

    #[tokio::test]
    async fn loading_new_image_drops_result() {
        let session = EnhancementSession::new(EnhancementConfig { delay_ms: 0 }, options());
        session.load_image("file:///a.jpg").unwrap();
        session.enhance("retouch").await.unwrap();

        session.load_image("file:///b.jpg").unwrap();
        assert_eq!(
            session.state(),
            EnhancementState::Loaded {
                source_uri: "file:///b.jpg".into()
            }
        );

        session.reset().unwrap();
        assert_eq!(session.state(), EnhancementState::Empty);
    }
}
