//! Buffered stride commands awaiting the next frame.

use bevy::prelude::{Entity, Resource};

/// One macro-tick command for one cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrideCommand {
    /// Cart entity the command is for.
    pub cart: Entity,
    /// Waypoint index the cart should reach next.
    pub segment: usize,
}

/// Stride commands queued by the macro-tick scheduler.
///
/// Drained once per frame before carts are ticked, so commands issued
/// between frames are delivered as ordinary synchronous calls.
#[derive(Resource, Default, Debug)]
pub struct StrideInbox {
    commands: Vec<StrideCommand>,
}

impl StrideInbox {
    /// Queues one command.
    pub fn push(&mut self, command: StrideCommand) {
        self.commands.push(command);
    }

    /// Queues several commands in order.
    pub fn extend<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = StrideCommand>,
    {
        self.commands.extend(commands);
    }

    /// Removes and yields every queued command.
    pub fn drain(&mut self) -> std::vec::Drain<'_, StrideCommand> {
        self.commands.drain(..)
    }

    /// Whether no command is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
