//! Logging listener for lifecycle observation.

use toro_core::{BoxError, HookContext, Listener};

/// A listener that logs every firing it is registered for.
///
/// # Example
/// ```ignore
/// for hook in HookName::LIFECYCLE {
///     hooks.add_listener(hook, LoggingListener);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl Listener for LoggingListener {
    fn on_fire(&self, ctx: &mut HookContext) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            let method = ctx.request_method.as_ref().map(ToString::to_string);
            tracing::info!(
                hook = %ctx.hook,
                path = %ctx.request.path(),
                method = method.as_deref().unwrap_or(ctx.request.method()),
                handler = ctx.discovered_handler.as_deref().unwrap_or("-"),
                args = ctx.arguments.as_ref().map_or(0, |a| a.len()),
                "hook fired"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = ctx;
        }
        Ok(())
    }
}
