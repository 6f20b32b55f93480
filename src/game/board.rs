use std::collections::{HashMap, VecDeque};

use log::warn;

use super::map::{River, RiverMap, SiteId};
use crate::error::{ReplayError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PunterScore {
	pub punter: String,
	pub rivers: usize,
	pub score: u64,
}

/// River ownership over a fixed map, plus what scoring needs.
#[derive(Clone, Debug, Default)]
pub struct Board {
	index: HashMap<SiteId, usize>,
	rivers: Vec<River>,
	ends: Vec<(usize, usize)>,
	adjacency: Vec<Vec<usize>>,
	owners: Vec<Option<usize>>,
	punters: Vec<String>,
	mines: Vec<usize>,
	/// `distances[m][v]`: hops from the m-th mine to site v, ignoring owners.
	distances: Vec<Vec<Option<u64>>>,
}

impl Board {
	pub fn new(map: &RiverMap) -> Self {
		let index: HashMap<SiteId, usize> = map
			.sites
			.iter()
			.enumerate()
			.map(|(i, site)| (site.id, i))
			.collect();
		let mut adjacency = vec![Vec::new(); map.sites.len()];
		let mut rivers = Vec::with_capacity(map.rivers.len());
		let mut ends = Vec::with_capacity(map.rivers.len());
		for river in &map.rivers {
			let (Some(&a), Some(&b)) = (index.get(&river.source), index.get(&river.target)) else {
				warn!("Skipping river {}-{}: unknown site", river.source, river.target);
				continue;
			};
			adjacency[a].push(rivers.len());
			adjacency[b].push(rivers.len());
			rivers.push(*river);
			ends.push((a, b));
		}
		let mines: Vec<usize> = map
			.mines
			.iter()
			.filter_map(|mine| index.get(mine).copied())
			.collect();

		let mut board = Self {
			index,
			owners: vec![None; rivers.len()],
			rivers,
			ends,
			adjacency,
			punters: Vec::new(),
			mines,
			distances: Vec::new(),
		};
		board.distances = board
			.mines
			.iter()
			.map(|&mine| board.reach(mine, |_| true))
			.collect();
		board
	}

	fn site(&self, token: &str) -> Result<usize> {
		token
			.parse::<SiteId>()
			.ok()
			.and_then(|id| self.index.get(&id).copied())
			.ok_or_else(|| ReplayError::UnknownSite(token.to_owned()))
	}

	fn punter_slot(&mut self, piece: &str) -> usize {
		match self.punters.iter().position(|p| p == piece) {
			Some(slot) => slot,
			None => {
				self.punters.push(piece.to_owned());
				self.punters.len() - 1
			}
		}
	}

	fn find_river(&self, source: &str, target: &str) -> Result<usize> {
		let (a, b) = (self.site(source)?, self.site(target)?);
		self.adjacency[a]
			.iter()
			.copied()
			.find(|&r| {
				let (x, y) = self.ends[r];
				(x == a && y == b) || (x == b && y == a)
			})
			.ok_or_else(|| ReplayError::UnknownRiver {
				from: source.to_owned(),
				to: target.to_owned(),
			})
	}

	/// The river between `source` and `target`, in either direction.
	pub fn river(&self, source: &str, target: &str) -> Result<River> {
		Ok(self.rivers[self.find_river(source, target)?])
	}

	/// Gives the river between `source` and `target` to `piece` and returns
	/// the palette slot of its new owner. Either direction matches, and a
	/// later claim replaces an earlier owner.
	pub fn claim(&mut self, piece: &str, source: &str, target: &str) -> Result<usize> {
		let river = self.find_river(source, target)?;
		let punter = self.punter_slot(piece);
		self.owners[river] = Some(punter);
		Ok(punter)
	}

	/// BFS from `start`, crossing only rivers accepted by `follow`.
	fn reach(&self, start: usize, follow: impl Fn(usize) -> bool) -> Vec<Option<u64>> {
		let mut dist = vec![None; self.adjacency.len()];
		let mut queue = VecDeque::from([start]);
		dist[start] = Some(0);
		while let Some(u) = queue.pop_front() {
			let du = dist[u].unwrap_or_default();
			for &r in &self.adjacency[u] {
				if !follow(r) {
					continue;
				}
				let (a, b) = self.ends[r];
				let v = if a == u { b } else { a };
				if dist[v].is_none() {
					dist[v] = Some(du + 1);
					queue.push_back(v);
				}
			}
		}
		dist
	}

	/// Each punter scores, per mine, the squared distance of every site its
	/// own rivers connect to that mine.
	pub fn scores(&self) -> Vec<PunterScore> {
		self.punters
			.iter()
			.enumerate()
			.map(|(slot, punter)| {
				let owned = |r: usize| self.owners[r] == Some(slot);
				let score = self
					.mines
					.iter()
					.zip(&self.distances)
					.map(|(&mine, dist)| {
						self.reach(mine, &owned)
							.iter()
							.zip(dist)
							.filter(|(reached, _)| reached.is_some())
							.map(|(_, d)| d.map_or(0, |d| d * d))
							.sum::<u64>()
					})
					.sum();
				PunterScore {
					punter: punter.clone(),
					rivers: self.owners.iter().filter(|o| **o == Some(slot)).count(),
					score,
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::game::map::Site;

	/// 0 - 1 - 2 - 3 with a spur 1 - 4, mine at 0.
	fn line_map() -> RiverMap {
		RiverMap {
			sites: (0..5).map(|id| Site { id }).collect(),
			rivers: [(0, 1), (1, 2), (2, 3), (1, 4)]
				.into_iter()
				.map(|(source, target)| River { source, target })
				.collect(),
			mines: vec![0],
		}
	}

	#[test]
	fn claim_matches_either_direction() {
		let mut board = Board::new(&line_map());
		assert_eq!(board.claim("p0", "1", "0").unwrap(), 0);
		assert_eq!(board.scores()[0].rivers, 1);
	}

	#[test]
	fn river_lookup_does_not_claim() {
		let board = Board::new(&line_map());
		assert_eq!(board.river("2", "1").unwrap(), River { source: 1, target: 2 });
		assert!(matches!(board.river("0", "3"), Err(ReplayError::UnknownRiver { .. })));
		assert!(board.scores().is_empty());
	}

	#[test]
	fn unknown_sites_and_rivers_are_rejected() {
		let mut board = Board::new(&line_map());
		assert!(matches!(board.claim("p0", "A", "1"), Err(ReplayError::UnknownSite(s)) if s == "A"));
		assert!(matches!(board.claim("p0", "0", "99"), Err(ReplayError::UnknownSite(_))));
		assert!(matches!(board.claim("p0", "0", "3"), Err(ReplayError::UnknownRiver { .. })));
		assert!(board.scores().is_empty());
	}

	#[test]
	fn later_claim_replaces_owner() {
		let mut board = Board::new(&line_map());
		board.claim("a", "0", "1").unwrap();
		assert_eq!(board.claim("b", "0", "1").unwrap(), 1);
		let rivers: Vec<_> = board.scores().iter().map(|s| (s.punter.clone(), s.rivers)).collect();
		assert_eq!(rivers, vec![("a".to_owned(), 0), ("b".to_owned(), 1)]);
	}

	#[test]
	fn scores_sum_squared_mine_distances() {
		let mut board = Board::new(&line_map());
		board.claim("a", "0", "1").unwrap();
		board.claim("a", "1", "2").unwrap();
		board.claim("a", "2", "3").unwrap();
		// Not connected to the mine through b's own rivers.
		board.claim("b", "1", "4").unwrap();

		let scores = board.scores();
		assert_eq!(
			scores,
			vec![
				PunterScore {
					punter: "a".into(),
					rivers: 3,
					score: 1 + 4 + 9,
				},
				PunterScore {
					punter: "b".into(),
					rivers: 1,
					score: 0,
				},
			]
		);
	}

	#[test]
	fn rivers_to_unknown_sites_are_skipped() {
		let mut map = line_map();
		map.rivers.push(River { source: 3, target: 42 });
		let mut board = Board::new(&map);
		assert!(matches!(board.claim("p", "3", "42"), Err(ReplayError::UnknownSite(_))));
	}
}
