use crate::model::{Pitcher, Puzzle};

/// Built-in presets, in the order they are offered. The first one is
/// active at startup.
pub fn catalog() -> Vec<Puzzle> {
    vec![
        Puzzle::new(
            "Medium",
            vec![4, 4, 0],
            vec![Pitcher::new(8, 8), Pitcher::new(5, 0), Pitcher::new(3, 0)],
        ),
        Puzzle::new(
            "Tough",
            vec![5, 5, 0],
            vec![Pitcher::new(10, 10), Pitcher::new(7, 0), Pitcher::new(3, 0)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn presets_are_well_formed() {
        for puzzle in catalog() {
            let pitchers = puzzle.get_initial_configuration();
            assert_eq!(puzzle.get_goal().len(), pitchers.len(), "{}", puzzle.get_name());
            let goal_total: u32 = puzzle.get_goal().iter().sum();
            assert_eq!(goal_total, puzzle.new_state().total_volume());
            for (goal, pitcher) in puzzle.get_goal().iter().zip(pitchers) {
                assert!(*goal <= pitcher.get_capacity());
            }
        }
    }

    #[test]
    fn preset_names_are_unique() {
        let puzzles = catalog();
        let names: HashSet<_> = puzzles.iter().map(Puzzle::get_name).collect();
        assert_eq!(names.len(), puzzles.len());
    }

    #[test]
    fn presets_survive_their_text_representation() {
        for puzzle in catalog() {
            assert_eq!(
                Puzzle::new_from_repr(&puzzle.get_text_representation()),
                Ok(puzzle)
            );
        }
    }
}
