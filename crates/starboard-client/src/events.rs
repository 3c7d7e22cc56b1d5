use serde::Serialize;
use tokio::sync::broadcast;

/// Notifications sent to subscribers after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "kebab-case")]
pub enum StateEvent {
    RepositoriesChanged,
    BookmarksChanged,
    NotesChanged,
    LoadingChanged(bool),
    FiltersChanged,
    TabChanged,
    NoteEditorChanged,
}

pub fn emit_events(tx: &broadcast::Sender<StateEvent>, events: Vec<StateEvent>) {
    for event in events {
        // Err only means nobody is subscribed right now.
        if tx.send(event).is_err() {
            tracing::trace!(?event, "No subscribers for state event");
        }
    }
}
