use super::camera_models::{Facing, PendingShot, PermissionState};

/// Capture session state machine.
///
/// State transitions:
/// ```text
/// awaiting_permission → live → capturing → reviewing → committing
///                        ↑         │           │  │          │
///                        └─failure─┘           │  │          │
///                        ↑←──── retake ────────┘  ↑←failure──┘
///                        ↑←──────────── success ─────────────┘
/// ```
/// There is no terminal state; the session ends when its owner drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingPermission,
    Live,
    Capturing,
    Reviewing { shot: PendingShot },
    Committing { shot: PendingShot },
}

impl SessionState {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// A capture or commit is waiting on a provider.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Capturing | Self::Committing { .. })
    }

    pub fn pending_shot(&self) -> Option<&PendingShot> {
        match self {
            Self::Reviewing { shot } | Self::Committing { shot } => Some(shot),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingPermission => "awaiting_permission",
            Self::Live => "live",
            Self::Capturing => "capturing",
            Self::Reviewing { .. } => "reviewing",
            Self::Committing { .. } => "committing",
        }
    }
}

/// Everything the presentation layer needs to render the capture screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub facing: Facing,
    pub guidance_overlay: bool,
    /// Tip text, present only while the overlay is enabled.
    pub guidance_tip: Option<String>,
    pub permissions: PermissionState,
    pub preview_active: bool,
    pub last_committed_uri: Option<String>,
}

impl SessionSnapshot {
    pub fn pending_uri(&self) -> Option<&str> {
        self.state.pending_shot().map(|shot| shot.uri.as_str())
    }

    /// The UI shows a request-permission affordance instead of the preview.
    pub fn needs_permission(&self) -> bool {
        matches!(self.state, SessionState::AwaitingPermission)
    }
}
