//! Query layer: applies region and service filters, then delegates to the
//! analysis engines.

use tracing::debug;

use rn_analysis::{
    ComponentSummary, SpanningForest, classify, component_containing, connected_components,
    connected_components_within, full_spanning_forest, minimum_spanning_forest, nearest_matching,
    shortest_paths,
};
use rn_core::{LevelTier, NodeId, Real};
use rn_graph::{Graph, Node};

/// Which facilities count as a referral destination.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityFilter {
    /// Lowest acceptable tier.
    pub min_tier: LevelTier,
    pub service: Option<String>,
    pub region: Option<String>,
}

impl Default for FacilityFilter {
    fn default() -> Self {
        Self {
            min_tier: LevelTier::II,
            service: None,
            region: None,
        }
    }
}

impl FacilityFilter {
    pub fn matches(&self, node: &Node) -> bool {
        node.tier.is_some_and(|t| t >= self.min_tier)
            && self.service.as_deref().is_none_or(|s| node.offers(s))
            && self.region.as_deref().is_none_or(|r| node.in_region(r))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteTarget {
    /// A specific facility code.
    Facility(String),
    /// The closest facility other than the origin that passes the filter.
    Nearest(FacilityFilter),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: String,
    pub target: RouteTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub origin: NodeId,
    pub destination: NodeId,
    pub path: Vec<NodeId>,
    /// Facility codes along `path`.
    pub codes: Vec<String>,
    pub distance_km: Real,
    pub origin_component: ComponentSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(RoutePlan),
    /// Origin or explicit destination is not in the graph.
    UnknownFacility(String),
    NoRoute { origin_component: ComponentSummary },
    NoMatchingFacility { origin_component: ComponentSummary },
}

impl RouteOutcome {
    /// Summary of the origin's component, when the origin was known.
    pub fn origin_component(&self) -> Option<&ComponentSummary> {
        match self {
            RouteOutcome::Found(plan) => Some(&plan.origin_component),
            RouteOutcome::NoRoute { origin_component }
            | RouteOutcome::NoMatchingFacility { origin_component } => Some(origin_component),
            RouteOutcome::UnknownFacility(_) => None,
        }
    }
}

enum Destination<'a> {
    Known(NodeId),
    Search(&'a FacilityFilter),
}

/// Route a referral from `request.origin`.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> RouteOutcome {
    let Some(origin) = graph.lookup(&request.origin) else {
        return RouteOutcome::UnknownFacility(request.origin.clone());
    };
    let target = match &request.target {
        RouteTarget::Facility(code) => match graph.lookup(code) {
            Some(id) => Destination::Known(id),
            None => return RouteOutcome::UnknownFacility(code.clone()),
        },
        RouteTarget::Nearest(filter) => Destination::Search(filter),
    };

    let origin_component = origin_summary(graph, origin);
    let paths = shortest_paths(graph, origin);

    let destination = match target {
        Destination::Known(id) => id,
        Destination::Search(filter) => {
            match nearest_matching(graph, &paths, |n| n.id != origin && filter.matches(n)) {
                Some(id) => id,
                None => return RouteOutcome::NoMatchingFacility { origin_component },
            }
        }
    };

    let Some(path) = paths.path_to(destination) else {
        return RouteOutcome::NoRoute { origin_component };
    };
    debug!(
        origin = %request.origin,
        destination = graph.code(destination),
        hops = path.len().saturating_sub(1),
        "route planned"
    );
    RouteOutcome::Found(RoutePlan {
        origin,
        destination,
        codes: path.iter().map(|&id| graph.code(id).to_string()).collect(),
        path,
        distance_km: paths.distance(destination),
        origin_component,
    })
}

fn origin_summary(graph: &Graph, origin: NodeId) -> ComponentSummary {
    let component = component_containing(graph, origin).unwrap_or_default();
    classify(graph, &component)
}

/// Minimum spanning backbone: the first facility's tree, or every component's.
pub fn spanning_backbone(graph: &Graph, all_components: bool) -> SpanningForest {
    if all_components {
        full_spanning_forest(graph)
    } else {
        minimum_spanning_forest(graph)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentReport {
    pub members: Vec<NodeId>,
    pub codes: Vec<String>,
    pub summary: ComponentSummary,
}

/// Connected components, optionally of the subgraph induced by one region.
///
/// Reports come largest first; equal sizes keep discovery order.
pub fn analyze_components(graph: &Graph, region: Option<&str>) -> Vec<ComponentReport> {
    let components = match region {
        Some(region) => connected_components_within(graph, &graph.nodes_in_region(region)),
        None => connected_components(graph),
    };
    let mut reports: Vec<ComponentReport> = components
        .into_iter()
        .map(|members| ComponentReport {
            codes: members.iter().map(|&id| graph.code(id).to_string()).collect(),
            summary: classify(graph, &members),
            members,
        })
        .collect();
    reports.sort_by(|a, b| b.summary.size.cmp(&a.summary.size));
    reports
}
