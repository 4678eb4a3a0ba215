use super::best_worst::{ScoredPair, GRID_COLS};
use crate::common::{RenderError, RenderResult};
use crate::domains::scenario::{Assignment, Scenario};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// The highest- and lowest-efficiency results of a simulation run.
pub struct BestWorst<'a> {
    pub best: Vec<ScoredPair<'a>>,
    pub worst: Vec<ScoredPair<'a>>,
}

/// Pick the five most and five least efficient results. Ties keep input
/// order. NaN efficiencies sort above every number, so they count as best.
pub fn select_best_worst<'a, S, A>(results: &'a [(S, A)]) -> RenderResult<BestWorst<'a>>
where
    S: Scenario + 'a,
    A: Assignment + 'a,
{
    if results.len() < GRID_COLS {
        return Err(RenderError::InvalidInput(format!(
            "need at least {} results, got {}",
            GRID_COLS,
            results.len()
        )));
    }

    let mut order: Vec<usize> = (0..results.len()).collect();
    order.sort_by_key(|&i| Reverse(OrderedFloat(results[i].1.efficiency())));
    let best = order.iter().take(GRID_COLS).map(|&i| pair(&results[i])).collect();

    order.sort_by_key(|&i| OrderedFloat(results[i].1.efficiency()));
    let worst = order.iter().take(GRID_COLS).map(|&i| pair(&results[i])).collect();

    Ok(BestWorst { best, worst })
}

fn pair<'a, S: Scenario + 'a, A: Assignment + 'a>(result: &'a (S, A)) -> ScoredPair<'a> {
    (&result.0, &result.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::scenario::{StaticAssignment, StaticScenario};
    use std::collections::BTreeMap;

    fn results(effs: &[f64]) -> Vec<(StaticScenario, StaticAssignment)> {
        effs.iter()
            .enumerate()
            .map(|(i, e)| {
                let a = StaticAssignment::from_choices(&[Some(1)], *e, *e);
                let s = StaticScenario::new(i as u64, 1, vec![], BTreeMap::new(), BTreeMap::from([(1, 1.0)]), a.clone());
                (s, a)
            })
            .collect()
    }

    fn nbrs(pairs: &[ScoredPair<'_>]) -> Vec<u64> {
        pairs.iter().map(|(s, _)| s.nbr()).collect()
    }

    #[test]
    fn picks_extremes_in_order() {
        let r = results(&[0.5, 0.9, 0.1, 1.0, 0.7, 0.3, 0.8]);
        let bw = select_best_worst(&r).unwrap();
        assert_eq!(nbrs(&bw.best), vec![3, 1, 6, 4, 0]);
        assert_eq!(nbrs(&bw.worst), vec![2, 5, 0, 4, 6]);
    }

    #[test]
    fn ties_keep_input_order() {
        let r = results(&[1.0; 6]);
        let bw = select_best_worst(&r).unwrap();
        assert_eq!(nbrs(&bw.best), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn too_few_results() {
        assert!(select_best_worst(&results(&[1.0, 0.5])).is_err());
    }
}
