use super::*;
use crate::net::mock::MockApi;

fn rule(id: &str) -> AlertRule {
    AlertRule {
        id: id.into(),
        metric: AlertMetric::Latency,
        threshold: 200.0,
        level: AlertLevel::P1,
        node_id: Some("n1".into()),
        enabled: true,
    }
}

fn record(id: &str, node_id: &str, metric: &str, level: &str, status: AlertStatus) -> AlertRecord {
    AlertRecord {
        id: id.into(),
        node_id: node_id.into(),
        metric: metric.into(),
        level: level.into(),
        status,
        timestamp: "2024-01-01T00:00:00Z".into(),
    }
}

fn sample_records() -> Vec<AlertRecord> {
    vec![
        record("r1", "node-a", "latency", "P0", AlertStatus::Pending),
        record("r2", "node-b", "packet_loss_rate", "P1", AlertStatus::Resolved),
        record("r3", "node-a", "jitter", "P2", AlertStatus::Processing),
    ]
}

fn ids(records: &[&AlertRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

// =============================================================================
// rules
// =============================================================================

#[test]
fn update_rule_patch_can_clear_node_id() {
    let mut state = AlertsState::default();
    state.add_alert_rule(rule("a"));
    state.update_alert_rule("a", AlertRulePatch { node_id: Some(None), enabled: Some(false), ..AlertRulePatch::default() });

    let updated = &state.alert_rules[0];
    assert_eq!(updated.node_id, None);
    assert!(!updated.enabled);
    assert_eq!(updated.level, AlertLevel::P1);
}

#[test]
fn remove_rule() {
    let mut state = AlertsState::default();
    state.set_alert_rules(vec![rule("a"), rule("b")]);
    state.remove_alert_rule("a");
    assert_eq!(state.alert_rules.len(), 1);
    assert_eq!(state.alert_rules[0].id, "b");
}

#[test]
fn metric_wire_names() {
    assert_eq!(serde_json::to_string(&AlertMetric::PacketLossRate).unwrap(), "\"packet_loss_rate\"");
    assert_eq!(serde_json::to_string(&AlertLevel::P2).unwrap(), "\"P2\"");
}

// =============================================================================
// filtering
// =============================================================================

#[test]
fn default_filter_passes_everything() {
    let mut state = AlertsState::default();
    state.set_alert_records(sample_records());
    assert_eq!(ids(&state.filtered_records()), ["r1", "r2", "r3"]);
}

#[test]
fn filter_by_level_and_status() {
    let mut state = AlertsState::default();
    state.set_alert_records(sample_records());

    state.set_filter(AlertFilter { level: LevelFilter::Only(AlertLevel::P0), ..AlertFilter::default() });
    assert_eq!(ids(&state.filtered_records()), ["r1"]);

    state.set_filter(AlertFilter { status: StatusFilter::Only(AlertStatus::Resolved), ..AlertFilter::default() });
    assert_eq!(ids(&state.filtered_records()), ["r2"]);
}

#[test]
fn filter_by_node_and_search() {
    let mut state = AlertsState::default();
    state.set_alert_records(sample_records());

    state.set_filter(AlertFilter { node_id: Some("node-a".into()), ..AlertFilter::default() });
    assert_eq!(ids(&state.filtered_records()), ["r1", "r3"]);

    state.set_filter(AlertFilter { search_query: "  LOSS ".into(), ..AlertFilter::default() });
    assert_eq!(ids(&state.filtered_records()), ["r2"]);
}

// =============================================================================
// fetch
// =============================================================================

#[tokio::test]
async fn fetch_rules_and_records() {
    let rules = vec![AlertRuleDto {
        id: "r1".into(),
        metric: AlertMetric::Jitter,
        threshold: 5.0,
        level: AlertLevel::P2,
        node_id: None,
        enabled: true,
    }];
    let records = vec![AlertRecordDto {
        id: "x1".into(),
        node_id: "n1".into(),
        metric: "jitter".into(),
        level: "P2".into(),
        status: AlertStatus::Pending,
        timestamp: "2024-01-01T00:00:00Z".into(),
    }];
    let api = MockApi::new().with_alerts(rules, records);
    let mut state = AlertsState::default();

    state.fetch_alert_rules(&api).await.unwrap();
    state.fetch_alert_records(&api).await.unwrap();

    assert_eq!(state.alert_rules[0].metric, AlertMetric::Jitter);
    assert_eq!(state.alert_records[0].id, "x1");
    assert_eq!(api.fetch_calls(), 2);
}

#[tokio::test]
async fn fetch_failure_keeps_lists() {
    let api = MockApi::new().failing_fetch();
    let mut state = AlertsState::default();
    state.set_alert_rules(vec![rule("keep")]);

    assert!(state.fetch_alert_rules(&api).await.is_err());
    assert!(state.fetch_alert_records(&api).await.is_err());
    assert_eq!(state.alert_rules[0].id, "keep");
}
