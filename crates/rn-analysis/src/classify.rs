//! Component statistics and isolation labels.

use std::collections::BTreeSet;
use std::fmt;

use rn_core::{LevelTier, NodeId};
use rn_graph::Graph;

/// Components with at most this many facilities are "micro" components.
pub const MICRO_COMPONENT_MAX: usize = 5;

/// Facilities per level tier. Nodes without a recognisable level go to `unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub i: usize,
    pub ii: usize,
    pub iii: usize,
    pub unknown: usize,
}

impl LevelCounts {
    pub fn record(&mut self, tier: Option<LevelTier>) {
        match tier {
            Some(LevelTier::III) => self.iii += 1,
            Some(LevelTier::II) => self.ii += 1,
            Some(LevelTier::I) => self.i += 1,
            None => self.unknown += 1,
        }
    }

    pub fn count(&self, tier: LevelTier) -> usize {
        match tier {
            LevelTier::I => self.i,
            LevelTier::II => self.ii,
            LevelTier::III => self.iii,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentLabel {
    /// Small, and every classified facility is level I.
    IsolatedLevelIOnly,
    SmallMicrocomponent,
    /// Levels I and II present, no level III.
    PartialNoTertiary,
    TertiaryAccess,
}

impl fmt::Display for ComponentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ComponentLabel::IsolatedLevelIOnly => "isolated microcomponent (level I only)",
            ComponentLabel::SmallMicrocomponent => "small microcomponent",
            ComponentLabel::PartialNoTertiary => "partial network (no tertiary care)",
            ComponentLabel::TertiaryAccess => "network with tertiary access",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSummary {
    pub size: usize,
    pub levels: LevelCounts,
    pub regions: BTreeSet<String>,
    pub label: Option<ComponentLabel>,
    /// Small, or without any level III facility.
    pub at_risk: bool,
}

/// Summarise one component against the graph it came from.
///
/// IDs the graph doesn't know still count toward `size`, as `unknown`.
pub fn classify(graph: &Graph, component: &[NodeId]) -> ComponentSummary {
    let mut levels = LevelCounts::default();
    let mut regions = BTreeSet::new();
    for &id in component {
        let node = graph.node(id);
        levels.record(node.and_then(|n| n.tier));
        if let Some(region) = node.and_then(|n| n.region.clone()) {
            regions.insert(region);
        }
    }

    let size = component.len();
    ComponentSummary {
        size,
        levels,
        regions,
        label: label_for(size, &levels),
        at_risk: is_at_risk(size, &levels),
    }
}

fn label_for(size: usize, levels: &LevelCounts) -> Option<ComponentLabel> {
    if size <= MICRO_COMPONENT_MAX {
        if levels.i > 0 && levels.ii == 0 && levels.iii == 0 {
            Some(ComponentLabel::IsolatedLevelIOnly)
        } else {
            Some(ComponentLabel::SmallMicrocomponent)
        }
    } else if levels.iii > 0 {
        Some(ComponentLabel::TertiaryAccess)
    } else if levels.i > 0 && levels.ii > 0 {
        Some(ComponentLabel::PartialNoTertiary)
    } else {
        None
    }
}

fn is_at_risk(size: usize, levels: &LevelCounts) -> bool {
    size <= MICRO_COMPONENT_MAX || levels.iii == 0
}
