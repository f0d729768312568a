//! Recipe composition graph
//!
//! An edge runs from each recipe to every recipe it uses as a component. Costing
//! walks these edges bottom-up, so the graph must stay acyclic.

use petgraph::{
    algo::{astar, toposort},
    graph::NodeIndex,
    stable_graph::StableDiGraph,
};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::catalog::recipes::{Recipe, RecipeKey};

/// Directed graph of recipe-in-recipe usage.
#[derive(Debug)]
pub(crate) struct CompositionGraph {
    graph: StableDiGraph<RecipeKey, ()>,
    nodes: FxHashMap<RecipeKey, NodeIndex>,
}

impl CompositionGraph {
    /// Build the graph for all recipes.
    ///
    /// Outgoing edges of `excluding` are left out, describing the catalog as it
    /// would be while that recipe's components are being replaced.
    pub(crate) fn from_recipes(
        recipes: &SlotMap<RecipeKey, Recipe>,
        excluding: Option<RecipeKey>,
    ) -> Self {
        let mut graph = StableDiGraph::with_capacity(recipes.len(), 0);
        let mut nodes = FxHashMap::default();

        for key in recipes.keys() {
            nodes.insert(key, graph.add_node(key));
        }

        for (key, recipe) in recipes {
            if Some(key) == excluding {
                continue;
            }

            let Some(&from) = nodes.get(&key) else {
                continue;
            };

            for child in recipe.sub_recipes() {
                if let Some(&to) = nodes.get(&child) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        Self { graph, nodes }
    }

    /// The cycle an edge `parent -> child` would close, if any.
    ///
    /// The returned path starts and ends with `parent`.
    pub(crate) fn cycle_through(
        &self,
        parent: RecipeKey,
        child: RecipeKey,
    ) -> Option<Vec<RecipeKey>> {
        if parent == child {
            return Some(vec![parent, child]);
        }

        let from = *self.nodes.get(&child)?;
        let to = *self.nodes.get(&parent)?;

        let mut cycle = vec![parent];

        cycle.extend(self.path(from, to)?);

        Some(cycle)
    }

    /// A cycle in the graph, if it has one, starting and ending with the same recipe.
    pub(crate) fn find_cycle(&self) -> Option<Vec<RecipeKey>> {
        let on_cycle = toposort(&self.graph, None).err()?.node_id();
        let start = *self.graph.node_weight(on_cycle)?;

        self.graph.neighbors(on_cycle).find_map(|next| {
            let mut cycle = vec![start];

            cycle.extend(self.path(next, on_cycle)?);

            Some(cycle)
        })
    }

    /// Shortest path of recipes from `from` to `to`, both included.
    ///
    /// Each node is expanded at most once, so shared sub-recipes do not multiply
    /// the work.
    fn path(&self, from: NodeIndex, to: NodeIndex) -> Option<Vec<RecipeKey>> {
        let (_, nodes) = astar(&self.graph, from, |node| node == to, |_| 1_usize, |_| 0)?;

        Some(
            nodes
                .into_iter()
                .filter_map(|idx| self.graph.node_weight(idx).copied())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{catalog::components::Component, units::Unit};

    use super::*;

    fn recipes() -> (SlotMap<RecipeKey, Recipe>, RecipeKey, RecipeKey, RecipeKey) {
        let mut recipes = SlotMap::with_key();

        let stock = recipes.insert(Recipe::new("Stock", Decimal::ONE, Unit::Litre));
        let sauce = recipes.insert(
            Recipe::new("Sauce", Decimal::ONE, Unit::Litre)
                .with_components([Component::recipe(stock, Decimal::ONE)]),
        );
        let stew = recipes.insert(
            Recipe::new("Stew", Decimal::ONE, Unit::Kilogram)
                .with_components([Component::recipe(sauce, Decimal::ONE)]),
        );

        (recipes, stock, sauce, stew)
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        let (recipes, ..) = recipes();
        let graph = CompositionGraph::from_recipes(&recipes, None);

        assert_eq!(graph.find_cycle(), None);
    }

    #[test]
    fn edge_back_to_an_ancestor_closes_a_cycle() {
        let (recipes, stock, sauce, stew) = recipes();
        let graph = CompositionGraph::from_recipes(&recipes, Some(stock));

        assert_eq!(
            graph.cycle_through(stock, stew),
            Some(vec![stock, stew, sauce, stock])
        );
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let (recipes, stock, ..) = recipes();
        let graph = CompositionGraph::from_recipes(&recipes, Some(stock));

        assert_eq!(graph.cycle_through(stock, stock), Some(vec![stock, stock]));
    }

    #[test]
    fn edge_to_a_sibling_is_not_a_cycle() {
        let (recipes, stock, _sauce, stew) = recipes();
        let graph = CompositionGraph::from_recipes(&recipes, Some(stew));

        assert_eq!(graph.cycle_through(stew, stock), None);
    }

    #[test]
    fn find_cycle_reports_the_whole_cycle() {
        let (mut recipes, stock, sauce, stew) = recipes();

        if let Some(recipe) = recipes.get_mut(stock) {
            recipe.components = [Component::recipe(stew, Decimal::ONE)].into_iter().collect();
        }

        let graph = CompositionGraph::from_recipes(&recipes, None);
        let cycle = graph.find_cycle().unwrap_or_default();

        assert_eq!(cycle.len(), 4, "three recipes plus the repeat: {cycle:?}");
        assert_eq!(cycle.first(), cycle.last());
        assert!(
            [stock, sauce, stew].iter().all(|key| cycle.contains(key)),
            "cycle should pass through every recipe: {cycle:?}"
        );
    }

    #[test]
    fn find_cycle_reports_self_reference() {
        let (mut recipes, stock, ..) = recipes();

        if let Some(recipe) = recipes.get_mut(stock) {
            recipe.components = [Component::recipe(stock, Decimal::ONE)].into_iter().collect();
        }

        let graph = CompositionGraph::from_recipes(&recipes, None);

        assert_eq!(graph.find_cycle(), Some(vec![stock, stock]));
    }
}
