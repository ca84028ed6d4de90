//! Assembling a personal visit route.
//!
//! A planner is an ordered, duplicate-free list of house ids. Resolving it
//! against the directory silently drops ids that no longer exist.

use uuid::Uuid;

use crate::models::{House, RouteFilters, RoutePlan, RouteStop};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePlanner {
    house_ids: Vec<String>,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Planner seeded from ids in order, keeping the first occurrence of each.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut planner = Self::new();
        for id in ids {
            planner.add_stop(id);
        }
        planner
    }

    pub fn house_ids(&self) -> &[String] {
        &self.house_ids
    }

    pub fn len(&self) -> usize {
        self.house_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.house_ids.is_empty()
    }

    /// Append a stop. Returns false if the house is already on the route.
    pub fn add_stop(&mut self, house_id: impl Into<String>) -> bool {
        let house_id = house_id.into();
        if self.house_ids.contains(&house_id) {
            return false;
        }
        self.house_ids.push(house_id);
        true
    }

    /// Remove a stop. Returns false if it was not on the route.
    pub fn remove_stop(&mut self, house_id: &str) -> bool {
        let before = self.house_ids.len();
        self.house_ids.retain(|id| id != house_id);
        self.house_ids.len() != before
    }

    /// Move the stop at `from` to position `to`, shifting the others.
    pub fn move_stop(&mut self, from: usize, to: usize) -> bool {
        if from >= self.house_ids.len() || to >= self.house_ids.len() {
            return false;
        }
        let id = self.house_ids.remove(from);
        self.house_ids.insert(to, id);
        true
    }

    pub fn clear(&mut self) {
        self.house_ids.clear();
    }

    /// Houses on the route, in route order.
    pub fn resolve<'a>(&self, houses: &'a [House]) -> Vec<&'a House> {
        self.house_ids
            .iter()
            .filter_map(|id| houses.iter().find(|house| &house.id == id))
            .collect()
    }

    pub fn into_plan(self, name: impl Into<String>, filters: RouteFilters) -> RoutePlan {
        RoutePlan {
            id: Uuid::new_v4(),
            name: name.into(),
            filters,
            stops: self.house_ids.into_iter().map(RouteStop::new).collect(),
            is_offline_ready: false,
        }
    }
}
