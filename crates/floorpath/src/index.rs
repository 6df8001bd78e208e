use serde::{Deserialize, Serialize};

use crate::Result;
use crate::floor::Floor;
use crate::model::{PortalKind, RouteGeometry, Solution, SolutionStep, StepKind};

/// The route index collaborator: owns the navigable graph and answers
/// shortest-route queries over it.
pub trait RouteIndex {
    /// Segment and portal records that solutions refer to.
    fn geometry(&self) -> &RouteGeometry;

    /// Ordered edge sequence from `startpoint` to `destination`.
    ///
    /// An empty solution means no path exists. `accessible` is forwarded as-is;
    /// excluding stairs is the index's business.
    fn shortest_route(
        &self,
        floors: &[Floor],
        destination: &str,
        startpoint: &str,
        accessible: bool,
    ) -> Result<Solution>;
}

/// A precomputed solution for one start/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub accessible: bool,
    pub solution: Vec<SolutionStep>,
}

/// Route index backed by a table of cached solutions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteTable {
    pub geometry: RouteGeometry,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(geometry: RouteGeometry) -> Self {
        Self {
            geometry,
            routes: Vec::new(),
        }
    }

    pub fn insert(&mut self, entry: RouteEntry) {
        self.routes.push(entry);
    }

    /// Whether any transition in `steps` goes through a stair portal.
    fn uses_stairs(&self, steps: &[SolutionStep]) -> bool {
        steps.iter().any(|step| {
            step.kind == StepKind::Transition
                && self
                    .geometry
                    .portals
                    .get(step.edge)
                    .is_some_and(|p| p.kind == PortalKind::Stair)
        })
    }
}

impl RouteIndex for RouteTable {
    fn geometry(&self) -> &RouteGeometry {
        &self.geometry
    }

    fn shortest_route(
        &self,
        _floors: &[Floor],
        destination: &str,
        startpoint: &str,
        accessible: bool,
    ) -> Result<Solution> {
        let mut candidates = self
            .routes
            .iter()
            .filter(|r| r.from == startpoint && r.to == destination);
        let entry = if accessible {
            let all: Vec<&RouteEntry> = candidates.collect();
            all.iter()
                .find(|r| r.accessible)
                .or_else(|| all.iter().find(|r| !self.uses_stairs(&r.solution)))
                .copied()
        } else {
            candidates.next()
        };
        Ok(Solution {
            solution: entry.map(|e| e.solution.clone()).unwrap_or_default(),
        })
    }
}

/// Everything the CLI needs for one building: floors plus a route table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteBundle {
    pub floors: Vec<Floor>,
    pub geometry: RouteGeometry,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteBundle {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_parts(self) -> (Vec<Floor>, RouteTable) {
        let table = RouteTable {
            geometry: self.geometry,
            routes: self.routes,
        };
        (self.floors, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Portal;

    fn entry(accessible: bool, edge: usize) -> RouteEntry {
        RouteEntry {
            from: "start".into(),
            to: "lab".into(),
            accessible,
            solution: vec![SolutionStep::segment(0, edge)],
        }
    }

    #[test]
    fn unknown_pair_yields_empty_solution() {
        let table = RouteTable::default();
        let solution = table.shortest_route(&[], "lab", "start", false).unwrap();
        assert!(solution.solution.is_empty());
    }

    #[test]
    fn accessible_flag_prefers_accessible_entry() {
        let mut table = RouteTable::default();
        table.insert(entry(false, 1));
        table.insert(entry(true, 2));

        let regular = table.shortest_route(&[], "lab", "start", false).unwrap();
        assert_eq!(regular.solution[0].edge, 1);

        let accessible = table.shortest_route(&[], "lab", "start", true).unwrap();
        assert_eq!(accessible.solution[0].edge, 2);
    }

    #[test]
    fn accessible_falls_back_to_stair_free_entry() {
        let mut table = RouteTable::default();
        table.insert(entry(false, 7));
        let solution = table.shortest_route(&[], "lab", "start", true).unwrap();
        assert_eq!(solution.solution[0].edge, 7);
    }

    #[test]
    fn accessible_never_takes_the_stairs() {
        let mut table = RouteTable::default();
        table.geometry.portals.push(Portal {
            id: Some("S".into()),
            kind: PortalKind::Stair,
            floor_a: 0,
            floor_b: 1,
            x_a: 0.0,
            y_a: 0.0,
            x_b: 0.0,
            y_b: 0.0,
        });
        table.insert(RouteEntry {
            from: "start".into(),
            to: "lab".into(),
            accessible: false,
            solution: vec![
                SolutionStep::segment(0, 0),
                SolutionStep::transition(1, 0),
                SolutionStep::segment(1, 0),
            ],
        });

        let regular = table.shortest_route(&[], "lab", "start", false).unwrap();
        assert_eq!(regular.solution.len(), 3);
        let accessible = table.shortest_route(&[], "lab", "start", true).unwrap();
        assert!(accessible.solution.is_empty());

        table.geometry.portals[0].kind = PortalKind::Elevator;
        let accessible = table.shortest_route(&[], "lab", "start", true).unwrap();
        assert_eq!(accessible.solution.len(), 3);
    }

    #[test]
    fn bundle_parses_from_json() {
        let json = r#"{
            "floors": [{"id": "ground", "doors": {"D1": {"x1": 0, "y1": 0, "x2": 2, "y2": 0}}}],
            "geometry": {"paths": [[{"ax": 1, "ay": 0, "bx": 1, "by": 12, "length": 12, "doorA": ["D1"]}]], "portals": []},
            "routes": [{"from": "D1", "to": "D2", "solution": [{"kind": "segment", "floor": 0, "edge": 0}]}]
        }"#;
        let (floors, table) = RouteBundle::from_json(json).unwrap().into_parts();
        assert_eq!(floors[0].id, "ground");
        assert_eq!(table.geometry.paths[0][0].door_a, vec!["D1".to_string()]);
        assert!(table.geometry.paths[0][0].door_b.is_empty());
        assert_eq!(table.routes.len(), 1);
    }
}
