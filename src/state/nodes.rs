#[cfg(test)]
#[path = "nodes_test.rs"]
mod nodes_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::net::api::MonitorApi;
use crate::net::types::NodeDto;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Online,
    #[default]
    Offline,
    Connecting,
}

/// A monitored node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub region: String,
    pub tags: Vec<String>,
    pub status: NodeStatus,
}

impl From<NodeDto> for Node {
    fn from(dto: NodeDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            ip: dto.ip,
            region: dto.region,
            tags: dto.tags.unwrap_or_default(),
            status: dto.status.unwrap_or_default(),
        }
    }
}

/// Partial update applied by [`NodesState::update_node`]; `None` keeps the field.
#[derive(Clone, Debug, Default)]
pub struct NodePatch {
    pub name: Option<String>,
    pub ip: Option<String>,
    pub region: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<NodeStatus>,
}

/// Node list mirrored from `GET /api/v1/nodes`, plus selection and live statuses.
#[derive(Clone, Debug, Default)]
pub struct NodesState {
    pub nodes: Vec<Node>,
    pub selected_node: Option<Node>,
    pub node_statuses: HashMap<String, NodeStatus>,
}

impl NodesState {
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    pub fn set_selected_node(&mut self, node: Option<Node>) {
        self.selected_node = node;
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn update_node(&mut self, id: &str, patch: NodePatch) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return;
        };
        if let Some(name) = patch.name {
            node.name = name;
        }
        if let Some(ip) = patch.ip {
            node.ip = ip;
        }
        if let Some(region) = patch.region {
            node.region = region;
        }
        if let Some(tags) = patch.tags {
            node.tags = tags;
        }
        if let Some(status) = patch.status {
            node.status = status;
        }
    }

    /// Remove a node; clears the selection if it pointed at that node.
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.retain(|n| n.id != id);
        if self.selected_node.as_ref().is_some_and(|n| n.id == id) {
            self.selected_node = None;
        }
    }

    pub fn set_node_status(&mut self, node_id: &str, status: NodeStatus) {
        self.node_statuses.insert(node_id.to_owned(), status);
    }

    /// Replace the node list with the server's.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error after logging it; the list is left as-is.
    pub async fn fetch_nodes<A>(&mut self, api: &A) -> Result<(), ApiError>
    where
        A: MonitorApi + ?Sized,
    {
        match api.fetch_nodes().await {
            Ok(nodes) => {
                self.nodes = nodes.into_iter().map(Node::from).collect();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch nodes");
                Err(e)
            }
        }
    }
}
