#![allow(dead_code)]

use scenario_viz::adapters::outbound::{init_noop_logger, RecordingFigureWriter};
use scenario_viz::application::ScenarioView;
use scenario_viz::domains::scenario::{StaticAssignment, StaticScenario};
use scenario_viz::RenderConfig;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

/// Three agents in a chain plus a skip edge, two targets worth 5 and 10.
pub fn three_agent_scenario(nbr: u64) -> StaticScenario {
    StaticScenario::new(
        nbr,
        3,
        vec![(1, 2), (2, 3), (1, 3)],
        BTreeMap::from([
            (1, BTreeSet::from([1])),
            (2, BTreeSet::from([1, 2])),
            (3, BTreeSet::from([2])),
        ]),
        BTreeMap::from([(1, 5.0), (2, 10.0)]),
        StaticAssignment::from_choices(&[Some(1), Some(2), Some(2)], 20.0, 1.0),
    )
}

pub fn view(dir: Option<&Path>) -> (ScenarioView, RecordingFigureWriter) {
    let writer = RecordingFigureWriter::new();
    let mut config = RenderConfig::default();
    if let Some(d) = dir {
        config = config.with_output_dir(d);
    }
    let view = ScenarioView::new(config, Arc::new(writer.clone()), init_noop_logger());
    (view, writer)
}
