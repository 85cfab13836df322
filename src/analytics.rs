//! Usage events recorded by the editor.

use serde::Serialize;

use crate::config::AvatarConfig;

/// Action name recorded for every download request.
pub const DOWNLOAD_ACTION: &str = "download";

/// A single analytics event: an action and the configuration it applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub action: String,
    pub params: AvatarConfig,
}

impl AnalyticsEvent {
    pub fn new(action: impl Into<String>, params: AvatarConfig) -> Self {
        Self {
            action: action.into(),
            params,
        }
    }
}

/// Receives analytics events.
pub trait Analytics {
    fn event(&mut self, event: AnalyticsEvent);
}

/// Emits events as `tracing` records under the `notion_avatar::analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn event(&mut self, event: AnalyticsEvent) {
        let params = event.params.to_json().unwrap_or_default();
        tracing::info!(target: "notion_avatar::analytics", action = %event.action, %params, "event");
    }
}

/// Keeps events in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    pub events: Vec<AnalyticsEvent>,
}

impl Analytics for RecordingAnalytics {
    fn event(&mut self, event: AnalyticsEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::AvatarPart;

    #[test]
    fn event_serializes_with_config_params() {
        let event = AnalyticsEvent::new(
            DOWNLOAD_ACTION,
            AvatarConfig::new().with(AvatarPart::Hair, 4),
        );
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"action":"download","params":{"hair":4}}"#);
    }

    #[test]
    fn recording_keeps_order() {
        let mut analytics = RecordingAnalytics::default();
        analytics.event(AnalyticsEvent::new("a", AvatarConfig::new()));
        analytics.event(AnalyticsEvent::new("b", AvatarConfig::new()));
        let actions: Vec<_> = analytics.events.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, ["a", "b"]);
    }
}
