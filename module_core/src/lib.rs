// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::error::NavigationError;
use common::navigation::{GuidanceDisplay, NavigationDisplay, PlaybackStatus};
use common::position::GnssPosition;
use common::route::RouteDescription;
use std::path::PathBuf;
use std::sync::Arc;
use strum_macros::EnumDiscriminants;

/// Represents a high-level event in the system.
///
/// Each `Event` wraps an [`EventKind`], which defines the actual type
/// and data carried by the event.
///
/// This structure is designed to be passed through an [`EventBus`]
/// between asynchronous modules.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// The inner event type and associated data.
    pub kind: EventKind,
}

impl Event {
    /// Returns the payload independent type of the event.
    pub fn event_type(&self) -> EventKindType {
        EventKindType::from(&self.kind)
    }
}

/// A thread-safe, reference-counted pointer to a live [`GnssPosition`].
pub type GnssPositionPtr = Arc<GnssPosition>;

/// Shared path of a route file that shall be loaded.
pub type RouteSourcePtr = Arc<PathBuf>;

/// Shared complete route as delivered by the routing collaborator.
pub type RouteDescriptionPtr = Arc<RouteDescription>;

/// Shared display position, heading and speed.
pub type NavigationDisplayPtr = Arc<NavigationDisplay>;

/// Shared formatted guidance texts.
pub type GuidanceDisplayPtr = Arc<GuidanceDisplay>;

/// Shared error report.
pub type NavigationErrorPtr = Arc<NavigationError>;

/// Enumerates the different kinds of events that can be emitted
/// and transmitted via the [`EventBus`].
///
/// [`EventKindType`] is the payload free discriminant of every variant and is
/// used to wait for or filter events of one kind.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(EventKindType), derive(Hash))]
pub enum EventKind {
    /// Indicates that a module shall terminate.
    QuitEvent,

    /// A live GNSS position update from the positioning collaborator.
    GnssPositionEvent(GnssPositionPtr),

    /// Requests loading the route stored in the given file.
    LoadRouteRequestEvent(RouteSourcePtr),

    /// A complete route is available and shall replace the current one.
    RouteLoadedEvent(RouteDescriptionPtr),

    /// Requests the start of a simulated playback of the loaded route.
    StartSimulationEvent,

    /// Requests the stop of a running playback.
    StopSimulationEvent,

    /// Switches the playback speed to the next multiplier.
    CycleSpeedMultiplierEvent,

    /// Switches route guidance on or off.
    ToggleGuidanceEvent,

    /// The position, heading and speed that shall be displayed.
    DisplayPositionEvent(NavigationDisplayPtr),

    /// New guidance texts that shall be displayed.
    GuidanceEvent(GuidanceDisplayPtr),

    /// The playback simulator changed its phase or speed multiplier.
    PlaybackStatusEvent(PlaybackStatus),

    /// An operation failed, the state before the operation is still active.
    NavigationErrorEvent(NavigationErrorPtr),
}

/// Returns a reference to the payload of an [`EventKind`] if it is the given variant.
///
/// ```
/// use module_core::{EventKind, payload_ref};
///
/// let kind = EventKind::QuitEvent;
/// assert!(payload_ref!(kind, EventKind::GnssPositionEvent).is_none());
/// ```
#[macro_export]
macro_rules! payload_ref {
    ($kind:expr, $variant:path) => {
        match &$kind {
            $variant(payload) => Some(payload),
            _ => None,
        }
    };
}

/// A simple asynchronous event bus for publishing and subscribing to [`Event`]s.
///
/// The event bus uses a [`tokio::sync::broadcast::channel`] under the hood,
/// allowing multiple receivers to listen for the same stream of events.
///
/// Each published event is cloned and distributed to all active subscribers.
/// If no subscribers exist at the time of publication, the event is discarded silently.
pub struct EventBus {
    /// The broadcast sender used internally to distribute events.
    sender: tokio::sync::broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new [`EventBus`] with a fixed buffer capacity of 256 messages.
    ///
    /// Playback publishes a display and a guidance event per frame, so the
    /// buffer is sized for a few seconds of frames. When the buffer is full,
    /// the oldest messages are dropped.
    pub fn new() -> Self {
        let (sender, _) = tokio::sync::broadcast::channel(256);
        EventBus { sender }
    }

    /// Subscribes to the event bus and returns a [`tokio::sync::broadcast::Receiver`].
    ///
    /// The returned receiver will receive all future events published after the
    /// subscription is created.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publishes an [`Event`] to all active subscribers.
    ///
    /// If no subscribers exist, the event is discarded silently.
    pub fn publish(&self, event: &Event) {
        let _ = self.sender.send(event.clone());
    }

    /// Returns a sender that can publish into this bus from outside a module,
    /// e.g. from a signal handler.
    pub fn sender(&self) -> tokio::sync::broadcast::Sender<Event> {
        self.sender.clone()
    }

    /// Creates a [`ModuleCtx`] bound to this [`EventBus`].
    pub fn context(&self) -> ModuleCtx {
        ModuleCtx::new(self)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Defines the common interface for an asynchronous module
/// that can be executed and communicate via the [`EventBus`].
#[async_trait::async_trait]
pub trait Module {
    /// Runs the module asynchronously until completion.
    ///
    /// This function typically contains the module's main event loop,
    /// reacting to messages received through the [`ModuleCtx`].
    async fn run(&mut self) -> Result<(), ()>;
}

/// Provides a module-scoped context for interacting with the [`EventBus`].
///
/// Each `ModuleCtx` owns both a sender and a receiver, allowing the module
/// to both publish and listen for events.
pub struct ModuleCtx {
    /// The broadcast sender used to publish events.
    pub sender: tokio::sync::broadcast::Sender<Event>,

    /// The broadcast receiver used to listen for events.
    pub receiver: tokio::sync::broadcast::Receiver<Event>,
}

impl ModuleCtx {
    /// Constructs a new [`ModuleCtx`] from the given [`EventBus`].
    pub fn new(event_bus: &EventBus) -> Self {
        ModuleCtx {
            sender: event_bus.sender.clone(),
            receiver: event_bus.subscribe(),
        }
    }

    /// Wraps `kind` into an [`Event`] and publishes it.
    ///
    /// Fails only if no receiver is subscribed to the bus.
    pub fn publish_event(
        &self,
        kind: EventKind,
    ) -> Result<(), tokio::sync::broadcast::error::SendError<Event>> {
        self.sender.send(Event { kind }).map(|_| ())
    }
}

pub mod test_helper;
