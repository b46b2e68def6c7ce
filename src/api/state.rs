use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Persistable interactive state of a chart.
///
/// `disabled` and `active` are indexed like the data series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartState {
    pub disabled: Vec<bool>,
    pub active: Vec<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ChartState {
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: Vec<bool>) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_stacked(mut self, stacked: bool) -> Self {
        self.stacked = Some(stacked);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::ChartState;

    #[test]
    fn json_round_trip_keeps_every_field() {
        let state = ChartState {
            disabled: vec![false, true],
            active: vec![true, false],
            stacked: Some(true),
            style: Some("expand".to_owned()),
        };
        let json = state.to_json_string().expect("json");
        assert_eq!(ChartState::from_json_str(&json).expect("parse"), state);
    }

    #[test]
    fn missing_fields_default() {
        let state = ChartState::from_json_str(r#"{"disabled": [true]}"#).expect("parse");
        assert_eq!(state.disabled, vec![true]);
        assert!(state.active.is_empty());
        assert_eq!(state.stacked, None);
        assert!(!ChartState::default().to_json_string().expect("json").contains("style"));
    }
}
