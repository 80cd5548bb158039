use std::convert::Infallible;

use thiserror::Error;

use crate::intent::Intent;
use crate::patch::{Patch, Snapshot};
use crate::reducer::{apply_intent, ReduceError};
use crate::state::ShieldsState;

pub trait Persistence {
    type Error;

    fn commit(&mut self, state: &ShieldsState) -> Result<(), Self::Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPersistence;

impl Persistence for NoopPersistence {
    type Error = Infallible;

    fn commit(&mut self, _state: &ShieldsState) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum EngineError<E> {
    #[error("intent was rejected: {0}")]
    Reduce(ReduceError),
    #[error("state could not be persisted: {0}")]
    Persist(E),
}

pub struct Engine<P: Persistence> {
    state: ShieldsState,
    revision: u64,
    persistence: P,
}

impl<P: Persistence> Engine<P> {
    pub fn new(persistence: P) -> Self {
        Self {
            state: ShieldsState::default(),
            revision: 0,
            persistence,
        }
    }

    pub fn with_state(persistence: P, state: ShieldsState, revision: u64) -> Self {
        Self {
            state,
            revision,
            persistence,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn state(&self) -> &ShieldsState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            revision: self.revision,
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<Patch, EngineError<P::Error>> {
        let from_revision = self.revision;
        let ops = apply_intent(&mut self.state, intent).map_err(EngineError::Reduce)?;

        // Contract: the snapshot reaches persistence before the patch
        // reaches anyone else.
        self.persistence
            .commit(&self.state)
            .map_err(EngineError::Persist)?;

        let to_revision = if ops.is_empty() {
            from_revision
        } else {
            from_revision + 1
        };
        self.revision = to_revision;
        tracing::debug!(from_revision, to_revision, op_count = ops.len(), "intent applied");

        Ok(Patch {
            ops,
            from_revision,
            to_revision,
        })
    }
}
