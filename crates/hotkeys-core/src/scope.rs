//! Scope tiers and the local/global dispatcher pair.

use crate::config::HotkeysConfig;
use crate::descriptor::BindingDescriptor;
use crate::dispatch::ScopeDispatcher;
use crate::error::HotkeysError;
use crate::table::BindingTable;

/// Which tier a dispatcher serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeTag {
    /// Bindings declared with `global == false`; active while their
    /// component's subtree has the event.
    Local,
    /// Bindings declared with `global == true`; active application-wide.
    Global,
}

/// The two dispatchers a hotkey-declaring UI subtree owns.
///
/// Call [`set_hotkeys`](ScopeRouter::set_hotkeys) whenever the subtree's
/// declared bindings change; each tier keeps only its own bindings.
#[derive(Debug, Clone)]
pub struct ScopeRouter {
    local: ScopeDispatcher,
    global: ScopeDispatcher,
}

impl ScopeRouter {
    /// Create a router with empty tables and default options.
    pub fn new() -> Self {
        Self::with_config(HotkeysConfig::default())
    }

    /// Create a router whose dispatchers share `config`.
    pub fn with_config(config: HotkeysConfig) -> Self {
        Self {
            local: ScopeDispatcher::with_config(ScopeTag::Local, config.clone()),
            global: ScopeDispatcher::with_config(ScopeTag::Global, config),
        }
    }

    /// Replace both tiers from one declared list.
    ///
    /// Both tables are built before either is swapped in, so a bad
    /// descriptor in either tier leaves the router unchanged.
    pub fn set_hotkeys(&mut self, descriptors: &[BindingDescriptor]) -> Result<(), HotkeysError> {
        let local = BindingTable::from_descriptors(ScopeTag::Local, descriptors)?;
        let global = BindingTable::from_descriptors(ScopeTag::Global, descriptors)?;
        tracing::debug!(
            local = local.count(),
            global = global.count(),
            "replaced hotkey bindings"
        );
        self.local.set_table(local);
        self.global.set_table(global);
        Ok(())
    }

    /// Remove every binding from both tiers.
    pub fn clear(&mut self) {
        self.local.clear();
        self.global.clear();
    }

    /// The local-tier dispatcher.
    pub fn local(&self) -> &ScopeDispatcher {
        &self.local
    }

    /// The global-tier dispatcher.
    pub fn global(&self) -> &ScopeDispatcher {
        &self.global
    }

    /// Mutable access to the local-tier dispatcher.
    pub fn local_mut(&mut self) -> &mut ScopeDispatcher {
        &mut self.local
    }

    /// Mutable access to the global-tier dispatcher.
    pub fn global_mut(&mut self) -> &mut ScopeDispatcher {
        &mut self.global
    }

    /// The dispatcher for `scope`.
    pub fn dispatcher(&self, scope: ScopeTag) -> &ScopeDispatcher {
        match scope {
            ScopeTag::Local => &self.local,
            ScopeTag::Global => &self.global,
        }
    }
}

impl Default for ScopeRouter {
    fn default() -> Self {
        Self::new()
    }
}
