use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{Chart, ChartEvent, ChartState, EventKind};

impl<R: Renderer> Chart<R> {
    /// Registers a handler for one event kind.
    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&ChartEvent) + 'static) {
        self.dispatcher.on(kind, handler);
    }

    /// Removes every handler of `kind`.
    pub fn off(&mut self, kind: EventKind) -> usize {
        self.dispatcher.off(kind)
    }

    /// Current persistable state.
    #[must_use]
    pub fn state(&self) -> ChartState {
        ChartState {
            disabled: self.data.data.iter().map(|series| series.disabled).collect(),
            active: self.active.clone(),
            stacked: Some(self.config.stacked),
            style: self.style.clone(),
        }
    }

    /// Routes an event to handlers. `ChangeState` is applied first and
    /// answered with a `StateChange` carrying the resulting state.
    pub fn dispatch(&mut self, event: ChartEvent) -> usize {
        match event {
            ChartEvent::ChangeState { state } => {
                let handled = self.dispatcher.emit(&ChartEvent::ChangeState {
                    state: state.clone(),
                });
                self.apply_state(&state);
                handled + self.emit_state_change()
            }
            event => self.dispatcher.emit(&event),
        }
    }

    /// Flips one series' disabled flag and emits `StateChange`.
    pub fn toggle_series(&mut self, index: usize) -> ChartResult<()> {
        let count = self.data.data.len();
        let Some(series) = self.data.data.get_mut(index) else {
            return Err(ChartError::InvalidData(format!(
                "series index {index} out of range for {count} series"
            )));
        };
        series.disabled = !series.disabled;
        debug!(index, disabled = series.disabled, "toggle series");
        self.emit_state_change();
        Ok(())
    }

    fn apply_state(&mut self, state: &ChartState) {
        if !state.disabled.is_empty() && state.disabled.len() != self.data.data.len() {
            warn!(
                expected = self.data.data.len(),
                got = state.disabled.len(),
                "state disabled flags do not match series count; applying the overlap"
            );
        }
        for (series, disabled) in self.data.data.iter_mut().zip(&state.disabled) {
            series.disabled = *disabled;
        }
        if !state.active.is_empty() {
            self.active = state.active.clone();
        }
        if let Some(stacked) = state.stacked {
            self.config.stacked = stacked;
        }
        if state.style.is_some() {
            self.style = state.style.clone();
        }
    }

    fn emit_state_change(&mut self) -> usize {
        let state = self.state();
        self.dispatcher.emit(&ChartEvent::StateChange { state })
    }
}
