//! Draw-scope bookkeeping for the frame loop.
//!
//! wgpu's render pass already scopes pipeline and vertex state to the pass
//! lifetime, but the frame loop tracks activation explicitly so an exit on
//! any path (including a panic unwinding through a frame) never leaves the
//! renderer believing resources are still bound.

use std::cell::Cell;

/// Tracks which per-frame resources are currently active.
#[derive(Debug, Default)]
pub struct BindingState {
    pipeline_active: Cell<bool>,
    lattice_bound: Cell<bool>,
}

impl BindingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pipeline_active(&self) -> bool {
        self.pipeline_active.get()
    }

    pub fn is_lattice_bound(&self) -> bool {
        self.lattice_bound.get()
    }
}

/// Guard marking the pipeline and lattice active for the duration of a draw.
///
/// Clears both flags on drop, whether the draw completed or unwound.
pub struct DrawScope<'a> {
    state: &'a BindingState,
}

impl<'a> DrawScope<'a> {
    pub fn enter(state: &'a BindingState) -> Self {
        state.pipeline_active.set(true);
        state.lattice_bound.set(true);
        Self { state }
    }
}

impl Drop for DrawScope<'_> {
    fn drop(&mut self) {
        self.state.pipeline_active.set(false);
        self.state.lattice_bound.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_scope_sets_and_clears_flags() {
        let state = BindingState::new();
        assert!(!state.is_pipeline_active());
        {
            let _scope = DrawScope::enter(&state);
            assert!(state.is_pipeline_active());
            assert!(state.is_lattice_bound());
        }
        assert!(!state.is_pipeline_active());
        assert!(!state.is_lattice_bound());
    }

    #[test]
    fn test_scope_clears_flags_on_panic() {
        let state = BindingState::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _scope = DrawScope::enter(&state);
            panic!("draw failed");
        }));
        assert!(result.is_err());
        assert!(!state.is_pipeline_active());
        assert!(!state.is_lattice_bound());
    }

    #[test]
    fn test_sequential_scopes() {
        let state = BindingState::new();
        {
            let _scope = DrawScope::enter(&state);
        }
        {
            let _scope = DrawScope::enter(&state);
            assert!(state.is_pipeline_active());
        }
        assert!(!state.is_pipeline_active());
    }
}
