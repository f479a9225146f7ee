//! Token module - one colored occupant of a grid cell
//!
//! A token carries its color (fixed at creation), its current position (rewritten
//! by the grid whenever it moves), and two flags. Presentation code can subscribe to
//! per-token notifications; each subscription is an `mpsc` receiver owned by the
//! subscriber, and a dropped receiver is pruned the next time the token notifies.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::types::{Position, TileColor};

/// Identity of a token within one grid.
///
/// Ids are handed out by the grid in increasing order; a refilled cell gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TokenId(pub u32);

/// Per-token notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEvent {
    /// The selection flag changed to the carried value
    SelectionChanged(bool),
    /// The token was matched and destroyed
    Destroyed,
}

#[derive(Debug)]
pub struct Token {
    id: TokenId,
    position: Position,
    color: TileColor,
    selected: bool,
    destroyed: bool,
    subscribers: Vec<Sender<TokenEvent>>,
}

impl Token {
    pub fn new(position: Position, color: TileColor) -> Self {
        Self {
            id: TokenId::default(),
            position,
            color,
            selected: false,
            destroyed: false,
            subscribers: Vec::new(),
        }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Set the selection flag.
    ///
    /// Notifies subscribers only when the value actually changes.
    pub fn set_selected(&mut self, selected: bool) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
        self.notify(TokenEvent::SelectionChanged(selected));
    }

    /// Mark the token destroyed and notify subscribers.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.notify(TokenEvent::Destroyed);
    }

    /// Subscribe to this token's notifications.
    pub fn subscribe(&mut self) -> Receiver<TokenEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub(crate) fn set_id(&mut self, id: TokenId) {
        self.id = id;
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn notify(&mut self, event: TokenEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}
