use std::sync::Arc;

use tile_host::{AnimationPrefs, KeyBinder, ModalChooser, WindowHost};

/// The host capabilities the engine is plugged into.
#[derive(Clone)]
pub struct Hosts {
    /// Window and workspace surface.
    pub windows: Arc<dyn WindowHost>,
    /// Desktop animation preference.
    pub animations: Arc<dyn AnimationPrefs>,
    /// Global accelerator registry.
    pub keys: Arc<dyn KeyBinder>,
    /// Modal window chooser used by paired actions.
    pub chooser: Arc<dyn ModalChooser>,
}

impl Hosts {
    /// Use one object for every capability.
    pub fn single<H>(host: H) -> Self
    where
        H: WindowHost + AnimationPrefs + KeyBinder + ModalChooser + 'static,
    {
        let host = Arc::new(host);
        Self {
            windows: host.clone(),
            animations: host.clone(),
            keys: host.clone(),
            chooser: host,
        }
    }
}
