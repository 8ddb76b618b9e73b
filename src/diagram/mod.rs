//! Network diagram of a network split into named subnets.
//!
//! A [`SubnetPlan`] collects what the user typed: the network address and a
//! list of subnets with host counts. [`SubnetPlan::generate`] lays it out as a
//! [`Diagram`]: one root node, one child node per subnet and one edge from the
//! root to every child. No address math happens here; the values are shown as
//! entered.
//!
//! Text rendering lives in [`render`], the PNG image in [`png`].

mod png;
mod render;

pub use png::PngRenderer;
pub use render::{DiagramRenderer, DotRenderer, TreeRenderer};

use crate::error::{Error, Result};
use crate::output::Report;
use std::str::FromStr;

/// Id of the root node.
pub const ROOT_ID: &str = "network";

/// Layout constants, in diagram units.
const ROOT_X: i32 = 250;
const CHILD_Y: i32 = 150;
const CHILD_SPACING: i32 = 200;

/// One subnet of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubnetEntry {
    pub name: String,
    /// Requested host count, `None` while not filled in.
    pub hosts: Option<u32>,
}

impl SubnetEntry {
    /// A named subnet needing `hosts` addresses. Zero hosts is rejected.
    pub fn new(name: &str, hosts: u32) -> Result<SubnetEntry> {
        if hosts == 0 {
            return Err(Error::Diagram(format!(
                "subnet '{name}' needs at least 1 host"
            )));
        }
        Ok(SubnetEntry {
            name: name.trim().to_string(),
            hosts: Some(hosts),
        })
    }
}

impl FromStr for SubnetEntry {
    type Err = Error;

    /// Parse `NAME=HOSTS`, e.g. `Sales=50`.
    fn from_str(s: &str) -> Result<SubnetEntry> {
        let (name, hosts) = s.rsplit_once('=').ok_or_else(|| {
            Error::InvalidFormat(format!("subnet '{s}' must be written as NAME=HOSTS"))
        })?;
        let hosts: u32 = hosts.trim().parse().map_err(|_| {
            Error::InvalidFormat(format!(
                "host count '{}' of subnet '{}' is not a whole number",
                hosts.trim(),
                name.trim()
            ))
        })?;
        SubnetEntry::new(name, hosts)
    }
}

/// The editable input of the diagram page. Always holds at least one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetPlan {
    pub network_address: String,
    subnets: Vec<SubnetEntry>,
}

impl Default for SubnetPlan {
    fn default() -> Self {
        SubnetPlan {
            network_address: String::new(),
            subnets: vec![SubnetEntry::default()],
        }
    }
}

impl SubnetPlan {
    /// A plan for `network_address` with the given subnets.
    ///
    /// An empty list gives one blank entry, like a fresh plan.
    pub fn new(network_address: &str, subnets: Vec<SubnetEntry>) -> SubnetPlan {
        let mut plan = SubnetPlan {
            network_address: network_address.trim().to_string(),
            subnets,
        };
        if plan.subnets.is_empty() {
            plan.subnets.push(SubnetEntry::default());
        }
        plan
    }

    /// The entries in the order they were added. Never empty.
    pub fn subnets(&self) -> &[SubnetEntry] {
        &self.subnets
    }

    /// Append a blank entry.
    pub fn add_subnet(&mut self) {
        self.subnets.push(SubnetEntry::default());
    }

    /// Replace the entry at `index`.
    ///
    /// # Arguments
    /// * `index` - Position of the entry, from 0
    /// * `entry` - The new name and host count
    ///
    /// # Returns
    /// * `Ok(())` - The entry was replaced
    /// * `Err(Error::Diagram)` - If there is no entry at `index`
    pub fn update_subnet(&mut self, index: usize, entry: SubnetEntry) -> Result<()> {
        let len = self.subnets.len();
        let slot = self
            .subnets
            .get_mut(index)
            .ok_or_else(|| Error::Diagram(format!("no subnet #{index}, plan has {len}")))?;
        *slot = entry;
        Ok(())
    }

    /// Remove an entry. The last remaining entry cannot be removed.
    pub fn remove_subnet(&mut self, index: usize) -> Result<SubnetEntry> {
        if index >= self.subnets.len() {
            return Err(Error::Diagram(format!(
                "no subnet #{index}, plan has {}",
                self.subnets.len()
            )));
        }
        if self.subnets.len() == 1 {
            return Err(Error::Diagram(
                "a plan keeps at least one subnet".to_string(),
            ));
        }
        Ok(self.subnets.remove(index))
    }

    /// Back to a blank plan.
    pub fn reset(&mut self) {
        *self = SubnetPlan::default();
    }

    /// Lay the plan out as nodes and edges.
    pub fn generate(&self) -> Diagram {
        let root = Node {
            id: ROOT_ID.to_string(),
            title: "Network".to_string(),
            detail: self.network_address.clone(),
            position: Position { x: ROOT_X, y: 0 },
        };

        let mut children = Vec::with_capacity(self.subnets.len());
        let mut edges = Vec::with_capacity(self.subnets.len());
        for (i, subnet) in self.subnets.iter().enumerate() {
            let id = format!("subnet-{i}");
            children.push(Node {
                id: id.clone(),
                title: subnet.name.clone(),
                detail: format!(
                    "Hosts: {}",
                    subnet.hosts.map(|h| h.to_string()).unwrap_or_default()
                ),
                position: Position {
                    x: i as i32 * CHILD_SPACING,
                    y: CHILD_Y,
                },
            });
            edges.push(Edge {
                id: format!("edge-{i}"),
                source: ROOT_ID.to_string(),
                target: id,
            });
        }
        log::debug!(
            "generate() root={} children={}",
            self.network_address,
            children.len()
        );

        Diagram {
            root,
            children,
            edges,
            subnets: self.subnets.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// A box in the diagram: a bold title line and a detail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub title: String,
    pub detail: String,
    pub position: Position,
}

/// Directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// A generated diagram, ready for a [`DiagramRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub root: Node,
    pub children: Vec<Node>,
    pub edges: Vec<Edge>,
    subnets: Vec<SubnetEntry>,
}

impl Diagram {
    /// `Network Diagram <address>`, also used to name exported files.
    pub fn title(&self) -> String {
        format!("Network Diagram {}", self.root.detail)
    }

    /// The subnet list as a report for export.
    ///
    /// # Returns
    /// One row per subnet: network address, subnet name and host count
    pub fn to_report(&self) -> Result<Report> {
        let mut report = Report::new(&self.title(), &["Network", "Subnet", "Hosts"]);
        for subnet in &self.subnets {
            report.push_row(vec![
                self.root.detail.clone(),
                subnet.name.clone(),
                subnet.hosts.map(|h| h.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> SubnetPlan {
        SubnetPlan::new(
            "192.168.1.0",
            vec![
                "Sales=50".parse().unwrap(),
                "IT=10".parse().unwrap(),
                "Guest Wifi=100".parse().unwrap(),
            ],
        )
    }

    #[test]
    fn test_entry_from_str() {
        let entry: SubnetEntry = " Guest Wifi = 25 ".parse().unwrap();
        assert_eq!(entry.name, "Guest Wifi");
        assert_eq!(entry.hosts, Some(25));

        assert!(matches!(
            "Sales".parse::<SubnetEntry>(),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            "Sales=many".parse::<SubnetEntry>(),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            "Sales=0".parse::<SubnetEntry>(),
            Err(Error::Diagram(_))
        ));
    }

    #[test]
    fn test_generate() {
        let diagram = sample_plan().generate();
        assert_eq!(diagram.root.id, "network");
        assert_eq!(diagram.root.detail, "192.168.1.0");
        assert_eq!(diagram.root.position, Position { x: 250, y: 0 });

        assert_eq!(diagram.children.len(), 3);
        assert_eq!(diagram.edges.len(), 3);
        for (i, (node, edge)) in diagram.children.iter().zip(&diagram.edges).enumerate() {
            assert_eq!(node.id, format!("subnet-{i}"));
            assert_eq!(node.position, Position { x: i as i32 * 200, y: 150 });
            assert_eq!(edge.id, format!("edge-{i}"));
            assert_eq!(edge.source, "network");
            assert_eq!(edge.target, node.id);
        }
        assert_eq!(diagram.children[2].title, "Guest Wifi");
        assert_eq!(diagram.children[2].detail, "Hosts: 100");
    }

    #[test]
    fn test_plan_keeps_one_subnet() {
        let mut plan = SubnetPlan::default();
        assert_eq!(plan.subnets().len(), 1);
        assert!(matches!(plan.remove_subnet(0), Err(Error::Diagram(_))));

        plan.add_subnet();
        plan.update_subnet(1, SubnetEntry::new("IT", 10).unwrap()).unwrap();
        let removed = plan.remove_subnet(0).unwrap();
        assert_eq!(removed, SubnetEntry::default());
        assert_eq!(plan.subnets()[0].name, "IT");
        assert!(plan.remove_subnet(0).is_err());
    }

    #[test]
    fn test_plan_index_errors() {
        let mut plan = sample_plan();
        assert!(plan.update_subnet(3, SubnetEntry::default()).is_err());
        assert!(plan.remove_subnet(7).is_err());
        assert_eq!(plan.subnets().len(), 3);
    }

    #[test]
    fn test_reset() {
        let mut plan = sample_plan();
        plan.reset();
        assert_eq!(plan, SubnetPlan::default());
        assert!(plan.network_address.is_empty());
    }

    #[test]
    fn test_blank_entry_renders_empty_hosts() {
        let diagram = SubnetPlan::new("10.0.0.0", vec![]).generate();
        assert_eq!(diagram.children.len(), 1);
        assert_eq!(diagram.children[0].detail, "Hosts: ");
    }

    #[test]
    fn test_to_report() {
        let report = sample_plan().generate().to_report().unwrap();
        assert_eq!(report.title, "Network Diagram 192.168.1.0");
        assert_eq!(report.columns, vec!["Network", "Subnet", "Hosts"]);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[1], vec!["192.168.1.0", "IT", "10"]);
    }
}
