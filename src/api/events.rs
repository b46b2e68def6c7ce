use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ChartState, RenderOutcome};

/// Events flowing between the chart, its host and its handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartEvent {
    TooltipShow {
        series: usize,
        point: usize,
        x: f64,
        y: f64,
    },
    TooltipMove {
        x: f64,
        y: f64,
    },
    TooltipHide,
    /// Emitted after the chart state changed.
    StateChange {
        state: ChartState,
    },
    /// Request to apply a persisted state.
    ChangeState {
        state: ChartState,
    },
    ElementClick {
        series: usize,
        point: usize,
    },
    ElementMouseOver {
        series: usize,
        point: usize,
    },
    ElementMouseOut {
        series: usize,
        point: usize,
    },
    ChartClick {
        x: f64,
        y: f64,
    },
    Rendered {
        outcome: RenderOutcome,
    },
}

/// Discriminant used to register handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    TooltipShow,
    TooltipMove,
    TooltipHide,
    StateChange,
    ChangeState,
    ElementClick,
    ElementMouseOver,
    ElementMouseOut,
    ChartClick,
    Rendered,
}

impl ChartEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TooltipShow { .. } => EventKind::TooltipShow,
            Self::TooltipMove { .. } => EventKind::TooltipMove,
            Self::TooltipHide => EventKind::TooltipHide,
            Self::StateChange { .. } => EventKind::StateChange,
            Self::ChangeState { .. } => EventKind::ChangeState,
            Self::ElementClick { .. } => EventKind::ElementClick,
            Self::ElementMouseOver { .. } => EventKind::ElementMouseOver,
            Self::ElementMouseOut { .. } => EventKind::ElementMouseOut,
            Self::ChartClick { .. } => EventKind::ChartClick,
            Self::Rendered { .. } => EventKind::Rendered,
        }
    }
}

pub type EventHandler = Box<dyn FnMut(&ChartEvent)>;

/// Named-event registry; handlers run in registration order.
#[derive(Default)]
pub struct Dispatcher {
    handlers: IndexMap<EventKind, Vec<EventHandler>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&ChartEvent) + 'static) {
        self.handlers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Removes every handler for `kind`; returns how many were removed.
    pub fn off(&mut self, kind: EventKind) -> usize {
        self.handlers
            .shift_remove(&kind)
            .map_or(0, |handlers| handlers.len())
    }

    /// Calls every handler registered for the event's kind; returns the count.
    pub fn emit(&mut self, event: &ChartEvent) -> usize {
        let Some(handlers) = self.handlers.get_mut(&event.kind()) else {
            return 0;
        };
        for handler in handlers.iter_mut() {
            handler(event);
        }
        handlers.len()
    }

    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (kind, handlers) in &self.handlers {
            map.entry(kind, &handlers.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{ChartEvent, Dispatcher, EventKind};

    #[test]
    fn handlers_run_in_registration_order_per_kind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            dispatcher.on(EventKind::ChartClick, move |_| log.borrow_mut().push(tag));
        }
        let seen = Rc::clone(&log);
        dispatcher.on(EventKind::TooltipHide, move |_| seen.borrow_mut().push("hide"));

        assert_eq!(dispatcher.emit(&ChartEvent::ChartClick { x: 1.0, y: 2.0 }), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert_eq!(dispatcher.emit(&ChartEvent::TooltipMove { x: 0.0, y: 0.0 }), 0);
        assert_eq!(dispatcher.off(EventKind::ChartClick), 2);
        assert_eq!(dispatcher.handler_count(EventKind::ChartClick), 0);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&ChartEvent::ElementClick { series: 1, point: 2 })
            .expect("json");
        assert_eq!(json, r#"{"type":"elementClick","series":1,"point":2}"#);
    }
}
