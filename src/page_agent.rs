//! Page agent: applies the inversion style to one page and follows live
//! toggles from the coordinator.
//!
//! Lifecycle: `Uninitialized → Initializing → Applied(bool)`. Toggle
//! messages and the safety timer move straight to `Applied` from any phase.

use std::cell::RefCell;

use crate::domain::resolve_domain;
use crate::error::HostError;
use crate::host::{PageSurface, PreferenceStore, VisualMarker};
use crate::messages::ExtensionMessage;
use crate::storage::PreferenceMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentPhase {
    Uninitialized,
    /// Storage read in flight
    Initializing,
    Applied(bool),
}

pub struct PageAgent<P> {
    surface: P,
    phase: AgentPhase,
    marker: Option<VisualMarker>,
    live_update: bool,
}

impl<P: PageSurface> PageAgent<P> {
    pub fn new(surface: P) -> Self {
        PageAgent {
            surface,
            phase: AgentPhase::Uninitialized,
            marker: None,
            live_update: false,
        }
    }

    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    /// Attach or detach the inversion style. Returns whether the document
    /// was touched; repeating the current state is a no-op.
    pub fn apply_visual_state(&mut self, enabled: bool) -> bool {
        self.apply(enabled, VisualMarker::for_state(enabled))
    }

    fn apply(&mut self, enabled: bool, marker: VisualMarker) -> bool {
        if self.phase == AgentPhase::Applied(enabled) && self.marker == Some(marker) {
            return false;
        }

        match self.render(enabled, marker) {
            Ok(()) => {
                self.phase = AgentPhase::Applied(enabled);
                self.marker = Some(marker);
            }
            Err(e) => {
                log::warn!("Could not apply dark mode ({}): {}", marker.as_str(), e);
                self.fall_back();
            }
        }
        true
    }

    fn render(&mut self, enabled: bool, marker: VisualMarker) -> Result<(), HostError> {
        if enabled != self.surface.style_attached() {
            if enabled {
                self.surface.attach_style()?;
            } else {
                self.surface.detach_style()?;
            }
        }
        self.surface.set_marker(marker)
    }

    fn fall_back(&mut self) {
        if self.surface.style_attached() {
            if let Err(e) = self.surface.detach_style() {
                log::error!("Could not detach inversion style: {}", e);
            }
        }
        self.marker = match self.surface.set_marker(VisualMarker::Disabled) {
            Ok(()) => Some(VisualMarker::Disabled),
            Err(e) => {
                log::error!("Could not mark page as disabled: {}", e);
                None
            }
        };
        self.phase = AgentPhase::Applied(false);
    }

    /// Returns false when initialization already started or a live toggle
    /// got here first.
    pub fn begin_initialization(&mut self) -> bool {
        if self.phase != AgentPhase::Uninitialized {
            return false;
        }
        self.phase = AgentPhase::Initializing;
        true
    }

    /// Apply the stored state for this page's domain.
    pub fn finish_initialization(&mut self, domain: Option<&str>, prefs: Result<PreferenceMap, HostError>) {
        if self.live_update {
            log::debug!("Stored state ignored, a live toggle already applied");
            return;
        }

        match (domain, prefs) {
            (None, _) => {
                self.apply(false, VisualMarker::Disabled);
            }
            (Some(domain), Ok(prefs)) => {
                self.apply_visual_state(prefs.is_enabled(domain));
            }
            (Some(domain), Err(e)) => {
                log::error!("Dark mode initialization failed for {}: {}", domain, e);
                self.apply(false, VisualMarker::Error);
            }
        }
    }

    pub fn on_message(&mut self, message: &ExtensionMessage) {
        match *message {
            ExtensionMessage::ToggleDarkMode { enabled } => {
                self.live_update = true;
                self.apply_visual_state(enabled);
            }
        }
    }

    /// Settle on the disabled state if nothing was applied in time.
    pub fn on_safety_timeout(&mut self) -> bool {
        match self.phase {
            AgentPhase::Uninitialized | AgentPhase::Initializing => {
                log::warn!("Dark mode state not resolved in time, showing page unstyled");
                self.apply(false, VisualMarker::Timeout)
            }
            AgentPhase::Applied(_) => false,
        }
    }
}

/// Read the stored map and apply this page's state.
///
/// The agent is only borrowed around the synchronous steps, so toggle
/// messages delivered while storage is being read are applied at once.
pub async fn run_initialization<P, S>(agent: &RefCell<PageAgent<P>>, store: &S, page_url: &str)
where
    P: PageSurface,
    S: PreferenceStore,
{
    if !agent.borrow_mut().begin_initialization() {
        return;
    }

    let Some(domain) = resolve_domain(page_url) else {
        agent.borrow_mut().finish_initialization(None, Ok(PreferenceMap::new()));
        return;
    };

    let prefs = store.load().await;
    agent.borrow_mut().finish_initialization(Some(&domain), prefs);
}
