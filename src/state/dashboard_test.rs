use super::*;

fn node(name: &str, ip: &str, region: &str, status: NodeStatus) -> Node {
    Node {
        id: name.into(),
        name: name.into(),
        ip: ip.into(),
        region: region.into(),
        tags: vec![],
        status,
    }
}

fn fleet() -> Vec<Node> {
    vec![
        node("Edge-Tokyo", "10.0.0.1", "ap", NodeStatus::Online),
        node("Edge-Paris", "10.0.1.1", "eu", NodeStatus::Offline),
        node("Core-Paris", "192.168.0.9", "eu", NodeStatus::Connecting),
    ]
}

fn names(nodes: &[&Node]) -> Vec<String> {
    nodes.iter().map(|n| n.name.clone()).collect()
}

#[test]
fn defaults() {
    let state = DashboardState::default();
    assert_eq!(state.time_range, TimeRange::Day);
    assert_eq!(state.refresh_interval, 5);
    assert!(state.auto_refresh);
    assert!(state.top5_abnormal_nodes.is_empty());
}

#[test]
fn from_config_seeds_settings() {
    let config = ClientConfig { refresh_interval_secs: 60, time_range: TimeRange::Month, ..ClientConfig::default() };
    let state = DashboardState::from_config(&config);
    assert_eq!(state.refresh_interval, 60);
    assert_eq!(state.time_range, TimeRange::Month);
}

#[test]
fn time_range_parse_and_display() {
    assert_eq!("7d".parse::<TimeRange>(), Ok(TimeRange::Week));
    assert_eq!(" 30d ".parse::<TimeRange>(), Ok(TimeRange::Month));
    assert!("1y".parse::<TimeRange>().is_err());
    assert_eq!(TimeRange::Day.as_str(), "24h");
}

#[test]
fn setters_and_toggle() {
    let mut state = DashboardState::default();
    state.set_time_range(TimeRange::Week);
    state.set_refresh_interval(10);
    state.toggle_auto_refresh();
    state.set_top5_abnormal_nodes(fleet());

    assert_eq!(state.time_range, TimeRange::Week);
    assert_eq!(state.refresh_interval, 10);
    assert!(!state.auto_refresh);
    assert_eq!(state.top5_abnormal_nodes.len(), 3);

    state.toggle_auto_refresh();
    assert!(state.auto_refresh);
}

#[test]
fn visible_nodes_by_region_and_status() {
    let nodes = fleet();
    let mut state = DashboardState::default();

    state.set_filters(DashboardFilter { region: Some("eu".into()), ..DashboardFilter::default() });
    assert_eq!(names(&state.visible_nodes(&nodes)), ["Edge-Paris", "Core-Paris"]);

    state.set_filters(DashboardFilter { status: NodeStatusFilter::Offline, ..DashboardFilter::default() });
    assert_eq!(names(&state.visible_nodes(&nodes)), ["Edge-Paris"]);

    // connecting nodes are neither online nor offline
    state.set_filters(DashboardFilter { status: NodeStatusFilter::Online, ..DashboardFilter::default() });
    assert_eq!(names(&state.visible_nodes(&nodes)), ["Edge-Tokyo"]);
}

#[test]
fn visible_nodes_by_search() {
    let nodes = fleet();
    let mut state = DashboardState::default();

    state.set_filters(DashboardFilter { search_query: "paris".into(), ..DashboardFilter::default() });
    assert_eq!(names(&state.visible_nodes(&nodes)), ["Edge-Paris", "Core-Paris"]);

    state.set_filters(DashboardFilter { search_query: "192.168".into(), ..DashboardFilter::default() });
    assert_eq!(names(&state.visible_nodes(&nodes)), ["Core-Paris"]);
}
