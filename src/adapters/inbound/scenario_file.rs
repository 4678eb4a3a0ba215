use crate::common::{RenderError, RenderResult};
use crate::domains::scenario::{
    AgentId, LoadedScenario, ScenarioSnapshot, ScenarioSource, StaticAssignment, StaticScenario, TargetId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory scenario names are resolved against when no base is given.
pub const SCENARIO_DIR_ENV: &str = "SCENARIO_VIZ_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    #[serde(default)]
    pub title: Option<String>,
    pub choices: Vec<Option<TargetId>>,
    pub value: f64,
    /// Derived from the optimal value when absent.
    #[serde(default)]
    pub efficiency: Option<f64>,
}

/// On-disk JSON form of a scenario plus the assignments to compare on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDocument {
    #[serde(default)]
    pub nbr: u64,
    pub agents: u32,
    #[serde(default)]
    pub edges: Vec<(AgentId, AgentId)>,
    #[serde(default)]
    pub action_sets: BTreeMap<AgentId, BTreeSet<TargetId>>,
    pub target_values: BTreeMap<TargetId, f64>,
    pub optimal: AssignmentRecord,
    #[serde(default)]
    pub assignments: Vec<AssignmentRecord>,
}

impl ScenarioDocument {
    pub fn parse(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_loaded(self) -> RenderResult<LoadedScenario> {
        let opt_value = self.optimal.value;
        let record = |r: AssignmentRecord| {
            let efficiency = r.efficiency.unwrap_or(if opt_value != 0.0 { r.value / opt_value } else { 0.0 });
            StaticAssignment::from_choices(&r.choices, r.value, efficiency)
        };

        let titles: Vec<Option<String>> = self.assignments.iter().map(|a| a.title.clone()).collect();
        let titles = if titles.iter().all(Option::is_some) && !titles.is_empty() {
            Some(titles.into_iter().flatten().collect())
        } else {
            None
        };

        let optimal = record(AssignmentRecord { efficiency: Some(1.0), ..self.optimal });
        let scenario = StaticScenario::new(
            self.nbr,
            self.agents,
            self.edges,
            self.action_sets,
            self.target_values,
            optimal,
        );
        let snapshot = ScenarioSnapshot::capture(&scenario)?;
        let assignments: Vec<StaticAssignment> = self.assignments.into_iter().map(record).collect();
        for a in std::iter::once(&scenario.optimal).chain(assignments.iter()) {
            if a.pairs.len() != snapshot.agent_count {
                return Err(RenderError::MalformedScenario(format!(
                    "assignment has {} choices for {} agents",
                    a.pairs.len(),
                    snapshot.agent_count
                )));
            }
            snapshot.assignment_edges(a)?;
        }

        Ok(LoadedScenario { scenario, assignments, titles })
    }
}

/// Reads scenario documents from `<base>/<name>`.
pub struct FilesystemScenarioSource {
    base: PathBuf,
}

impl FilesystemScenarioSource {
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| match env::var(SCENARIO_DIR_ENV) {
            Ok(v) => PathBuf::from(v),
            Err(_) => PathBuf::from("."),
        });
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl ScenarioSource for FilesystemScenarioSource {
    fn load_scenario(&self, name: &str) -> RenderResult<LoadedScenario> {
        let path = self.base.join(name);
        let json = fs::read_to_string(&path)?;
        ScenarioDocument::parse(&json)?.into_loaded()
    }
}
