#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use super::nodes::{Node, NodeStatus};
use crate::config::{ClientConfig, DEFAULT_REFRESH_INTERVAL_SECS};

/// Time window shown by dashboard charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    Day,
    Week,
    Month,
}

impl TimeRange {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::Week => "7d",
            Self::Month => "30d",
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "24h" => Ok(Self::Day),
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeStatusFilter {
    #[default]
    All,
    Online,
    Offline,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    pub region: Option<String>,
    pub status: NodeStatusFilter,
    pub search_query: String,
}

impl DashboardFilter {
    /// Region must match exactly; the search query is a case-insensitive
    /// substring match on name and IP.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        if let Some(region) = &self.region {
            if &node.region != region {
                return false;
            }
        }
        let status_ok = match self.status {
            NodeStatusFilter::All => true,
            NodeStatusFilter::Online => node.status == NodeStatus::Online,
            NodeStatusFilter::Offline => node.status == NodeStatus::Offline,
        };
        if !status_ok {
            return false;
        }
        let query = self.search_query.trim().to_lowercase();
        query.is_empty() || node.name.to_lowercase().contains(&query) || node.ip.contains(&query)
    }
}

/// Dashboard view settings.
#[derive(Clone, Debug)]
pub struct DashboardState {
    pub filters: DashboardFilter,
    pub time_range: TimeRange,
    /// Seconds between automatic refreshes.
    pub refresh_interval: u32,
    pub auto_refresh: bool,
    pub top5_abnormal_nodes: Vec<Node>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            filters: DashboardFilter::default(),
            time_range: TimeRange::default(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL_SECS,
            auto_refresh: true,
            top5_abnormal_nodes: Vec::new(),
        }
    }
}

impl DashboardState {
    /// Defaults seeded from the client configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self { time_range: config.time_range, refresh_interval: config.refresh_interval_secs, ..Self::default() }
    }

    pub fn set_filters(&mut self, filters: DashboardFilter) {
        self.filters = filters;
    }

    pub fn set_time_range(&mut self, range: TimeRange) {
        self.time_range = range;
    }

    pub fn set_refresh_interval(&mut self, secs: u32) {
        self.refresh_interval = secs;
    }

    pub fn toggle_auto_refresh(&mut self) {
        self.auto_refresh = !self.auto_refresh;
    }

    pub fn set_top5_abnormal_nodes(&mut self, nodes: Vec<Node>) {
        self.top5_abnormal_nodes = nodes;
    }

    /// Nodes passing the current filters, in input order.
    #[must_use]
    pub fn visible_nodes<'a>(&self, nodes: &'a [Node]) -> Vec<&'a Node> {
        nodes.iter().filter(|n| self.filters.matches(n)).collect()
    }
}
