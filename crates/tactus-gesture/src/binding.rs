//! Effect-style binding
//!
//! Holds at most one recognizer for a host. Binding again replaces the
//! previous recognizer; unbinding or dropping the binding destroys it.

use tactus_dom::{Host, NodeId};

use crate::callbacks::GestureCallbacks;
use crate::config::PartialGestureConfig;
use crate::recognizer::GestureRecognizer;
use crate::GestureError;

#[derive(Debug)]
pub struct GestureBinding {
    host: Host,
    recognizer: Option<GestureRecognizer>,
}

impl GestureBinding {
    pub fn new(host: &Host) -> Self {
        Self {
            host: host.clone(),
            recognizer: None,
        }
    }

    /// Subscribe a recognizer to `surface`, replacing any current one.
    ///
    /// An absent surface leaves the binding empty.
    pub fn bind(
        &mut self,
        surface: Option<NodeId>,
        callbacks: GestureCallbacks,
        config: PartialGestureConfig,
    ) -> Result<(), GestureError> {
        self.unbind();
        let Some(surface) = surface else {
            tracing::trace!("Gesture binding skipped: no surface");
            return Ok(());
        };
        self.recognizer = Some(GestureRecognizer::new(&self.host, surface, callbacks, config)?);
        Ok(())
    }

    /// Create a binding and bind it in one go
    pub fn mount(
        host: &Host,
        surface: Option<NodeId>,
        callbacks: GestureCallbacks,
        config: PartialGestureConfig,
    ) -> Result<Self, GestureError> {
        let mut binding = Self::new(host);
        binding.bind(surface, callbacks, config)?;
        Ok(binding)
    }

    /// Destroy the current recognizer, if any
    pub fn unbind(&mut self) {
        if let Some(recognizer) = self.recognizer.take() {
            recognizer.destroy();
        }
    }

    pub fn is_bound(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn recognizer(&self) -> Option<&GestureRecognizer> {
        self.recognizer.as_ref()
    }
}

impl Drop for GestureBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}
