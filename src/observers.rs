use crate::events::StateTransition;

/// Trait for observing tracking transitions in a catalog
pub trait CatalogObserver: Send {
    /// Called after a transition has been applied
    fn on_transition(&self, transition: &StateTransition);
}

/// Logs every transition through `tracing`
#[derive(Debug, Default)]
pub struct TransitionLogger;

impl CatalogObserver for TransitionLogger {
    fn on_transition(&self, transition: &StateTransition) {
        tracing::info!(
            sequence = transition.sequence,
            copy = %transition.copy,
            book = %transition.book,
            "transition: {:?} --({:?})--> {:?}",
            transition.from,
            transition.event,
            transition.to
        );
    }
}
