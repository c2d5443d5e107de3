use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::{LayerEngine, LayeredProblem};

pub struct LayerEngineBuilder<P: LayeredProblem> {
    problem: P,
    cancel: Option<Arc<AtomicBool>>,
}

impl<P: LayeredProblem> LayerEngineBuilder<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            cancel: None,
        }
    }
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }
    pub fn build(self) -> LayerEngine<P> {
        match self.cancel {
            Some(flag) => LayerEngine::with_cancel_flag(self.problem, flag),
            None => LayerEngine::new(self.problem),
        }
    }
}
