//! Command-to-handler registry for toolbar and hotkey dispatch.
//!
//! The presentation layer binds a handler per command while a view is
//! mounted and unbinds it on unmount; dispatching an unbound command is a
//! no-op. Keeping the mapping explicit avoids the dangling-closure problem
//! of registering callbacks implicitly at call sites.

use std::collections::HashMap;

/// Commands a view can bind handlers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppCommand {
    /// Start the selected torrents.
    Start,
    /// Start every stopped torrent.
    StartAll,
    /// Start torrents that finished downloading.
    StartFinished,
    /// Pause the selected torrents.
    Pause,
    /// Pause every active torrent.
    PauseAll,
    /// Pause torrents in an error state.
    PauseErrored,
    /// Pause torrents that are downloading.
    PauseDownloading,
    /// Open the remove confirmation for the selection.
    Remove,
    /// Move the selection up in the daemon queue.
    QueueUp,
    /// Move the selection down in the daemon queue.
    QueueDown,
    /// Open the move-storage dialog for the selection.
    Move,
    /// Open the label editor for the selection.
    SetLabels,
    /// Open the daemon settings dialog.
    DaemonSettings,
    /// Toggle the daemon's alternate speed limits.
    ToggleAltSpeed,
    /// Focus the search input.
    FocusSearch,
}

impl AppCommand {
    /// Stable name used in logs and key-binding configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::StartAll => "start_all",
            Self::StartFinished => "start_finished",
            Self::Pause => "pause",
            Self::PauseAll => "pause_all",
            Self::PauseErrored => "pause_errored",
            Self::PauseDownloading => "pause_downloading",
            Self::Remove => "remove",
            Self::QueueUp => "queue_up",
            Self::QueueDown => "queue_down",
            Self::Move => "move",
            Self::SetLabels => "set_labels",
            Self::DaemonSettings => "daemon_settings",
            Self::ToggleAltSpeed => "toggle_alt_speed",
            Self::FocusSearch => "focus_search",
        }
    }
}

/// Handler invoked when a command is dispatched.
pub type CommandHandler = Box<dyn Fn() + Send + Sync>;

/// Mapping from command to the currently bound handler.
///
/// Rebinding a command replaces the previous handler; the latest binding
/// wins, matching how a newly mounted view takes over its commands.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<AppCommand, CommandHandler>,
}

impl CommandRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `command`, replacing any previous binding.
    pub fn bind(&mut self, command: AppCommand, handler: impl Fn() + Send + Sync + 'static) {
        self.handlers.insert(command, Box::new(handler));
    }

    /// Remove the binding for `command`, restoring the no-op behaviour.
    pub fn unbind(&mut self, command: AppCommand) {
        self.handlers.remove(&command);
    }

    /// Whether a handler is currently bound for `command`.
    #[must_use]
    pub fn is_bound(&self, command: AppCommand) -> bool {
        self.handlers.contains_key(&command)
    }

    /// Invoke the handler bound to `command`, returning whether one ran.
    pub fn dispatch(&self, command: AppCommand) -> bool {
        match self.handlers.get(&command) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bound: Vec<&'static str> = self.handlers.keys().map(|c| c.name()).collect();
        bound.sort_unstable();
        f.debug_struct("CommandRegistry")
            .field("bound", &bound)
            .finish()
    }
}
