use crate::grid::{Cell, Grid, Position};
use crate::runner::RunResult;
use pathfinding::prelude::bfs;
use std::fmt;

/// Fewest steps from start to target when only static walls block movement.
///
/// Used as the yardstick for route efficiency; dynamic walls are ignored.
pub fn reference_steps(grid: &Grid) -> Option<usize> {
    let mut layout = grid.clone();
    layout.clear_dynamic();
    let start = layout.find(Cell::Start)?;
    let target = layout.find(Cell::Target)?;

    bfs(&start, |p: &Position| layout.neighbors(p), |p| *p == target)
        .map(|path| path.len().saturating_sub(1))
}

#[derive(Debug, Clone)]
pub struct Statistics {
    pub explored_count: usize,
    pub path_steps: usize,
    pub reference_steps: Option<usize>,
    pub route_efficiency: f64,
}

impl Statistics {
    pub fn new(result: &RunResult, reference_steps: Option<usize>) -> Self {
        let mut stats = Statistics {
            explored_count: result.explored_count,
            path_steps: result.path_cost_steps,
            reference_steps,
            route_efficiency: 0.0,
        };
        stats.calculate_efficiency();
        stats
    }

    /// Path steps over reference steps; 1.0 means no detour.
    pub fn calculate_efficiency(&mut self) {
        self.route_efficiency = match self.reference_steps {
            Some(reference) if reference > 0 && self.path_steps > 0 => {
                self.path_steps as f64 / reference as f64
            }
            _ => 0.0,
        };
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes Explored: {}", self.explored_count)?;
        writeln!(f, "Path Steps: {}", self.path_steps)?;
        match self.reference_steps {
            Some(reference) => writeln!(f, "Shortest Possible: {reference}")?,
            None => writeln!(f, "Shortest Possible: unreachable")?,
        }
        writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;
        Ok(())
    }
}

/// Prints one row per run, then the best performers.
pub fn print_comparison_results(results: &[RunResult], reference_steps: Option<usize>) {
    println!("\n=== ALGORITHM COMPARISON RESULTS ===");
    println!();
    println!(
        "{:<14} {:<8} {:<8} {:<10} {:<10} {:<12} {:<10} {:<12}",
        "Algorithm", "Success", "Steps", "Cost", "Explored", "Efficiency", "Dyn Walls", "Time"
    );
    println!("{}", "-".repeat(90));

    for result in results {
        let stats = Statistics::new(result, reference_steps);
        let success_str = if result.found() { "✓" } else { "✗" };
        println!(
            "{:<14} {:<8} {:<8} {:<10.3} {:<10} {:<12.3} {:<10} {:<12}",
            result.algorithm.name(),
            success_str,
            result.path_cost_steps,
            result.path_cost,
            result.explored_count,
            stats.route_efficiency,
            result.dynamic_walls_spawned,
            format!("{:.2?}", result.elapsed),
        );
    }
    println!();

    let successful: Vec<_> = results.iter().filter(|r| r.found()).collect();
    if successful.is_empty() {
        println!("No algorithm reached the target.");
        return;
    }

    println!("=== PERFORMANCE ANALYSIS ===");
    if let Some(reference) = reference_steps {
        println!("Shortest possible route: {reference} steps");
    }
    if let Some(best) = successful.iter().min_by(|a, b| a.path_cost.total_cmp(&b.path_cost)) {
        println!("Cheapest route: {} ({:.3})", best.algorithm, best.path_cost);
    }
    if let Some(frugal) = successful.iter().min_by_key(|r| r.explored_count) {
        println!(
            "Fewest nodes explored: {} ({} nodes)",
            frugal.algorithm, frugal.explored_count
        );
    }
    if let Some(fastest) = successful.iter().min_by_key(|r| r.elapsed) {
        println!("Fastest search: {} ({:.2?})", fastest.algorithm, fastest.elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Algorithm;
    use crate::obstacles::ObstacleInjector;
    use crate::runner::SearchRunner;

    #[test]
    fn test_reference_steps_ignores_dynamic_walls() {
        let grid: Grid = "S#..\nX#..\n...T".parse().unwrap();
        assert_eq!(reference_steps(&grid), Some(4));
    }

    #[test]
    fn test_reference_steps_unreachable() {
        let grid: Grid = "S#.\n##.\n..T".parse().unwrap();
        assert_eq!(reference_steps(&grid), None);
    }

    #[test]
    fn test_efficiency_of_optimal_route_is_one() {
        let mut grid: Grid = "S...\n.##.\n...T".parse().unwrap();
        let reference = reference_steps(&grid);
        let result = SearchRunner::new(ObstacleInjector::disabled())
            .run(&mut grid, Algorithm::Bfs)
            .unwrap();

        let stats = Statistics::new(&result, reference);
        assert_eq!(stats.route_efficiency, 1.0);
    }

    #[test]
    fn test_efficiency_zero_without_path() {
        let mut grid: Grid = "S#.\n##.\n..T".parse().unwrap();
        let result = SearchRunner::new(ObstacleInjector::disabled())
            .run(&mut grid, Algorithm::Bfs)
            .unwrap();

        let stats = Statistics::new(&result, reference_steps(&grid));
        assert_eq!(stats.route_efficiency, 0.0);
    }
}
