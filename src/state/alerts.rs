#[cfg(test)]
#[path = "alerts_test.rs"]
mod alerts_test;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::net::api::MonitorApi;
use crate::net::types::{AlertRecordDto, AlertRuleDto};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertMetric {
    Latency,
    PacketLossRate,
    Jitter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    P0,
    P1,
    P2,
}

impl AlertLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Pending,
    Processing,
    Resolved,
}

/// A threshold rule that raises alerts for one node or, with no `node_id`, all nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: String,
    pub metric: AlertMetric,
    pub threshold: f64,
    pub level: AlertLevel,
    pub node_id: Option<String>,
    pub enabled: bool,
}

impl From<AlertRuleDto> for AlertRule {
    fn from(dto: AlertRuleDto) -> Self {
        Self {
            id: dto.id,
            metric: dto.metric,
            threshold: dto.threshold,
            level: dto.level,
            node_id: dto.node_id,
            enabled: dto.enabled,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub node_id: String,
    pub metric: String,
    pub level: String,
    pub status: AlertStatus,
    pub timestamp: String,
}

impl From<AlertRecordDto> for AlertRecord {
    fn from(dto: AlertRecordDto) -> Self {
        Self {
            id: dto.id,
            node_id: dto.node_id,
            metric: dto.metric,
            level: dto.level,
            status: dto.status,
            timestamp: dto.timestamp,
        }
    }
}

/// Partial update for [`AlertsState::update_alert_rule`].
#[derive(Clone, Debug, Default)]
pub struct AlertRulePatch {
    pub metric: Option<AlertMetric>,
    pub threshold: Option<f64>,
    pub level: Option<AlertLevel>,
    pub node_id: Option<Option<String>>,
    pub enabled: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LevelFilter {
    #[default]
    All,
    Only(AlertLevel),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AlertStatus),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub level: LevelFilter,
    pub status: StatusFilter,
    pub node_id: Option<String>,
    pub search_query: String,
}

impl AlertFilter {
    /// Whether `record` passes every active criterion. The search query is a
    /// case-insensitive substring match on node id and metric.
    #[must_use]
    pub fn matches(&self, record: &AlertRecord) -> bool {
        if let LevelFilter::Only(level) = self.level {
            if record.level != level.as_str() {
                return false;
            }
        }
        if let StatusFilter::Only(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(node_id) = &self.node_id {
            if &record.node_id != node_id {
                return false;
            }
        }
        let query = self.search_query.trim().to_lowercase();
        query.is_empty()
            || record.node_id.to_lowercase().contains(&query)
            || record.metric.to_lowercase().contains(&query)
    }
}

/// Alert rules and records mirrored from the server, plus the list filter.
#[derive(Clone, Debug, Default)]
pub struct AlertsState {
    pub alert_rules: Vec<AlertRule>,
    pub alert_records: Vec<AlertRecord>,
    pub filter: AlertFilter,
}

impl AlertsState {
    pub fn set_alert_rules(&mut self, rules: Vec<AlertRule>) {
        self.alert_rules = rules;
    }

    pub fn set_alert_records(&mut self, records: Vec<AlertRecord>) {
        self.alert_records = records;
    }

    pub fn add_alert_rule(&mut self, rule: AlertRule) {
        self.alert_rules.push(rule);
    }

    pub fn update_alert_rule(&mut self, id: &str, patch: AlertRulePatch) {
        let Some(rule) = self.alert_rules.iter_mut().find(|r| r.id == id) else {
            return;
        };
        if let Some(metric) = patch.metric {
            rule.metric = metric;
        }
        if let Some(threshold) = patch.threshold {
            rule.threshold = threshold;
        }
        if let Some(level) = patch.level {
            rule.level = level;
        }
        if let Some(node_id) = patch.node_id {
            rule.node_id = node_id;
        }
        if let Some(enabled) = patch.enabled {
            rule.enabled = enabled;
        }
    }

    pub fn remove_alert_rule(&mut self, id: &str) {
        self.alert_rules.retain(|r| r.id != id);
    }

    pub fn set_filter(&mut self, filter: AlertFilter) {
        self.filter = filter;
    }

    /// Records passing the current filter, in server order.
    #[must_use]
    pub fn filtered_records(&self) -> Vec<&AlertRecord> {
        self.alert_records
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect()
    }

    /// # Errors
    ///
    /// Propagates the fetch error after logging it.
    pub async fn fetch_alert_rules<A>(&mut self, api: &A) -> Result<(), ApiError>
    where
        A: MonitorApi + ?Sized,
    {
        match api.fetch_alert_rules().await {
            Ok(rules) => {
                self.alert_rules = rules.into_iter().map(AlertRule::from).collect();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch alert rules");
                Err(e)
            }
        }
    }

    /// # Errors
    ///
    /// Propagates the fetch error after logging it.
    pub async fn fetch_alert_records<A>(&mut self, api: &A) -> Result<(), ApiError>
    where
        A: MonitorApi + ?Sized,
    {
        match api.fetch_alert_records().await {
            Ok(records) => {
                self.alert_records = records.into_iter().map(AlertRecord::from).collect();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch alert records");
                Err(e)
            }
        }
    }
}
