//! Movement reachability (bounded breadth-first search)

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::board::Hex;
use crate::kinds::Registry;
use crate::world::{UnitId, World};

/// Every hex `unit` can walk to within its move range.
///
/// Each step costs 1 and must land on a tile passable for the unit.
/// The unit's own hex is never part of the result. Unknown units reach nothing.
pub fn reachable(world: &World, registry: &Registry, unit: UnitId) -> FxHashSet<Hex> {
    let mut result = FxHashSet::default();
    let Some(u) = world.unit(unit) else {
        return result;
    };
    let max_steps = u.move_range(registry);

    let mut visited = FxHashSet::default();
    visited.insert(u.pos);
    let mut frontier = VecDeque::new();
    frontier.push_back((u.pos, 0u32));

    while let Some((hex, dist)) = frontier.pop_front() {
        if dist + 1 > max_steps {
            continue;
        }
        for next in hex.neighbors() {
            if visited.contains(&next) || !world.is_passable_for(registry, next, unit) {
                continue;
            }
            visited.insert(next);
            result.insert(next);
            frontier.push_back((next, dist + 1));
        }
    }

    result
}
