use std::collections::VecDeque;

/// Discrete navigation signals from the key-event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    MoveUp,
    MoveDown,
    Confirm,
}

/// Answer given to the key-event source at dispatch time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// Consumed; the source must not apply its default behavior
    Handled,
    /// Not ours; let the source handle it
    Ignored,
}

/// Signals accepted during one dispatch, applied on the next drain.
///
/// Keeps "acknowledge now, mutate next tick": nothing a signal does can run
/// while the dispatch that produced it is still reading controller state.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Signal>,
}

impl CommandQueue {
    pub fn push(&mut self, signal: Signal) -> Ack {
        self.pending.push_back(signal);
        Ack::Handled
    }

    /// Take everything queued so far, oldest first
    pub fn take(&mut self) -> VecDeque<Signal> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_preserves_order_and_empties() {
        let mut q = CommandQueue::default();
        assert_eq!(q.push(Signal::MoveDown), Ack::Handled);
        q.push(Signal::MoveDown);
        q.push(Signal::Confirm);
        assert_eq!(q.len(), 3);

        let taken: Vec<Signal> = q.take().into_iter().collect();
        assert_eq!(
            taken,
            vec![Signal::MoveDown, Signal::MoveDown, Signal::Confirm]
        );
        assert!(q.is_empty());
    }
}
