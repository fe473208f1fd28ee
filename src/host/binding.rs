//! Traits implemented by the embedding web view.

use std::rc::Rc;

use crate::error::Result;

// ============================================================================
// HostContext
// ============================================================================

/// Resource lookup provided by the host.
pub trait HostContext {
    /// Reads a named text asset, e.g. the companion script.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Asset`](crate::Error::Asset) if the asset is
    /// missing or unreadable.
    fn read_asset(&self, name: &str) -> Result<String>;
}

// ============================================================================
// HostBinding
// ============================================================================

/// Web view adapter the bridge delegates to.
///
/// `execute_script` receives a complete `javascript:` command. It is
/// fire-and-forget: no result is observed synchronously. Results come
/// back through navigation to the reserved URL schemes, which the host
/// forwards to [`Bridge::should_override_url_loading`].
///
/// [`Bridge::should_override_url_loading`]: crate::Bridge::should_override_url_loading
pub trait HostBinding {
    /// Executes a command inside the hosted content.
    fn execute_script(&self, command: &str);

    /// Resource context used to load the companion script.
    fn host_context(&self) -> &dyn HostContext;
}

impl<T: HostBinding + ?Sized> HostBinding for &T {
    fn execute_script(&self, command: &str) {
        (**self).execute_script(command);
    }

    fn host_context(&self) -> &dyn HostContext {
        (**self).host_context()
    }
}

impl<T: HostBinding + ?Sized> HostBinding for Box<T> {
    fn execute_script(&self, command: &str) {
        (**self).execute_script(command);
    }

    fn host_context(&self) -> &dyn HostContext {
        (**self).host_context()
    }
}

impl<T: HostBinding + ?Sized> HostBinding for Rc<T> {
    fn execute_script(&self, command: &str) {
        (**self).execute_script(command);
    }

    fn host_context(&self) -> &dyn HostContext {
        (**self).host_context()
    }
}
