use crate::event::{EditorEvent, EventHandler};

/// Mirrors editor events into the log
#[derive(Debug, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::PatternChanged { version, change } => {
                log::debug!("pattern v{version}: {change:?}");
            }
            EditorEvent::ImportRejected { reason } => {
                log::warn!("import rejected: {reason}");
            }
            other => log::debug!("{other:?}"),
        }
    }
}
