use crate::chain::{ChainId, NodeId};

/// What changed in a session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// A node's annotation was set or cleared.
    Node(NodeId),

    /// A chain was extended, or the session stopped working on it.
    Chain(ChainId),
}

/// A type that observes the changes a [`ProofSession`](crate::session::ProofSession) makes, so a
/// presentation host knows what to redraw.
///
/// [`Notifier`] is also implemented for the unit type `()`, which discards every notification,
/// and for [`Vec<Target>`], which records them in order.
pub trait Notifier {
    /// Called once per change, synchronously, after the change is applied.
    fn notify(&mut self, target: Target);
}

impl Notifier for () {
    #[inline]
    fn notify(&mut self, _: Target) {}
}

impl Notifier for Vec<Target> {
    #[inline]
    fn notify(&mut self, target: Target) {
        self.push(target);
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    #[inline]
    fn notify(&mut self, target: Target) {
        (**self).notify(target);
    }
}
