use serde::{Deserialize, Serialize};

use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::error::{ReplayError, Result};
use crate::replay::GraphDescription;

pub type SiteId = u64;

const SITE_COLOR: &str = "#8fa3bf";
const MINE_COLOR: &str = "#ff4d4d";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
	pub id: SiteId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct River {
	pub source: SiteId,
	pub target: SiteId,
}

/// The map written as the first line of a game log.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverMap {
	pub sites: Vec<Site>,
	pub rivers: Vec<River>,
	pub mines: Vec<SiteId>,
}

impl RiverMap {
	pub fn from_description(desc: &GraphDescription) -> Result<Self> {
		serde_json::from_value(desc.value().clone()).map_err(ReplayError::InvalidMap)
	}

	pub fn is_mine(&self, site: SiteId) -> bool {
		self.mines.contains(&site)
	}

	/// One node per site and one link per river. Mines are labelled.
	pub fn graph_data(&self) -> GraphData {
		let nodes = self
			.sites
			.iter()
			.map(|site| {
				let mine = self.is_mine(site.id);
				GraphNode {
					id: site.id.to_string(),
					label: mine.then(|| format!("mine {}", site.id)),
					color: (if mine { MINE_COLOR } else { SITE_COLOR }).to_owned(),
				}
			})
			.collect();
		let links = self
			.rivers
			.iter()
			.map(|river| GraphLink {
				source: river.source.to_string(),
				target: river.target.to_string(),
			})
			.collect();
		GraphData { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn sample() -> GraphDescription {
		GraphDescription(json!({
			"sites": [{ "id": 4 }, { "id": 1 }, { "id": 3 }],
			"rivers": [{ "source": 3, "target": 4 }, { "source": 1, "target": 3 }],
			"mines": [1]
		}))
	}

	#[test]
	fn decodes_log_map() {
		let map = RiverMap::from_description(&sample()).unwrap();
		assert_eq!(map.sites.len(), 3);
		assert_eq!(map.rivers[1], River { source: 1, target: 3 });
		assert!(map.is_mine(1));
		assert!(!map.is_mine(3));
	}

	#[test]
	fn missing_fields_default_to_empty() {
		let map = RiverMap::from_description(&GraphDescription(json!({ "nodes": [] }))).unwrap();
		assert_eq!(map, RiverMap::default());
	}

	#[test]
	fn wrong_shape_is_rejected() {
		let err = RiverMap::from_description(&GraphDescription(json!([1, 2]))).unwrap_err();
		assert!(matches!(err, ReplayError::InvalidMap(_)));
		let err = RiverMap::from_description(&GraphDescription(json!({ "sites": [{ "id": "x" }] })))
			.unwrap_err();
		assert!(matches!(err, ReplayError::InvalidMap(_)));
	}

	#[test]
	fn graph_data_labels_mines() {
		let data = RiverMap::from_description(&sample()).unwrap().graph_data();
		assert_eq!(data.nodes.len(), 3);
		assert_eq!(data.links.len(), 2);
		let mine = data.nodes.iter().find(|n| n.id == "1").unwrap();
		assert_eq!(mine.label.as_deref(), Some("mine 1"));
		assert_eq!(mine.color, MINE_COLOR);
		assert!(data.nodes.iter().filter(|n| n.id != "1").all(|n| n.label.is_none()));
		assert_eq!(data.links[0].source, "3");
	}
}
