use macroquad::prelude::Color;

use crate::error::ParseError;

/// A vessel with a fixed capacity and the volume it currently holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pitcher {
    capacity: u32,
    contents: u32,
}
impl Pitcher {
    /// Trusted constructor for built-in presets. Panics on a zero capacity
    /// or an overfilled pitcher; untrusted input goes through `try_new`.
    pub(crate) fn new(capacity: u32, contents: u32) -> Self {
        assert!(capacity > 0, "pitcher capacity must be positive");
        assert!(contents <= capacity, "pitcher overfilled");
        Self { capacity, contents }
    }

    /// `index` is only used for error reporting.
    pub fn try_new(capacity: u32, contents: u32, index: usize) -> Result<Self, ParseError> {
        if capacity == 0 {
            return Err(ParseError::ZeroCapacity { index });
        }
        if contents > capacity {
            return Err(ParseError::Overfilled {
                index,
                contents,
                capacity,
            });
        }
        Ok(Self { capacity, contents })
    }

    /// Parses `contents/capacity`. `index` is only used for error reporting.
    pub fn new_from_repr(repr: &str, index: usize) -> Result<Self, ParseError> {
        let (contents, capacity) = repr
            .trim()
            .split_once('/')
            .ok_or_else(|| ParseError::InvalidPitcher(repr.to_string()))?;
        Self::try_new(parse_volume(capacity)?, parse_volume(contents)?, index)
    }

    pub fn get_capacity(&self) -> u32 {
        self.capacity
    }

    pub fn get_contents(&self) -> u32 {
        self.contents
    }

    pub fn get_empty_space(&self) -> u32 {
        self.capacity - self.contents
    }

    pub fn get_fill_ratio(&self) -> f32 {
        self.contents as f32 / self.capacity as f32
    }

    pub fn is_empty(&self) -> bool {
        self.contents == 0
    }

    pub fn is_full(&self) -> bool {
        self.contents == self.capacity
    }

    /// Volume a pour from `self` into `other` would move. Either the source
    /// runs dry or the destination fills up, whichever comes first.
    pub fn get_pourable_amount(&self, other: &Pitcher) -> u32 {
        if self.is_empty() || other.is_full() {
            return 0;
        }
        self.contents.min(other.get_empty_space())
    }

    /// Pours as much as fits into `other` and returns the moved volume.
    pub fn pour_into(&mut self, other: &mut Pitcher) -> u32 {
        let amount = self.get_pourable_amount(other);
        self.contents -= amount;
        other.contents += amount;
        amount
    }

    pub fn get_text_representation(&self) -> String {
        format!("{}/{}", self.contents, self.capacity)
    }
}

fn parse_volume(repr: &str) -> Result<u32, ParseError> {
    let repr = repr.trim();
    repr.parse::<u32>()
        .map_err(|_| ParseError::InvalidNumber(repr.to_string()))
}

/// Pure pour from `from` into `to`.
///
/// Returns a new sequence that differs from `pitchers` at most at the two
/// indices. Equal or out-of-range indices, an empty source and a full
/// destination all yield an unchanged copy.
pub fn transfer(pitchers: &[Pitcher], from: usize, to: usize) -> Vec<Pitcher> {
    let mut result = pitchers.to_vec();
    if from == to {
        return result;
    }
    let (Some(&source), Some(&target)) = (pitchers.get(from), pitchers.get(to)) else {
        return result;
    };
    let (mut source, mut target) = (source, target);
    if source.pour_into(&mut target) > 0 {
        result[from] = source;
        result[to] = target;
    }
    result
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransferAction {
    pub from_pitcher: usize,
    pub to_pitcher: usize,
}

/// Live pitchers of the active puzzle. Only contents ever change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PitcherState {
    pitchers: Vec<Pitcher>,
}
impl PitcherState {
    pub fn new(pitchers: Vec<Pitcher>) -> Self {
        Self { pitchers }
    }

    pub fn get_pitchers(&self) -> &[Pitcher] {
        &self.pitchers
    }

    pub fn len(&self) -> usize {
        self.pitchers.len()
    }

    /// Pours in place. Returns `true` if any volume moved.
    pub fn apply_transfer(&mut self, action: &TransferAction) -> bool {
        let next = transfer(&self.pitchers, action.from_pitcher, action.to_pitcher);
        if next == self.pitchers {
            return false;
        }
        self.pitchers = next;
        true
    }

    pub fn total_volume(&self) -> u32 {
        self.pitchers.iter().map(Pitcher::get_contents).sum()
    }

    pub fn max_capacity(&self) -> u32 {
        self.pitchers
            .iter()
            .map(Pitcher::get_capacity)
            .max()
            .unwrap_or(0)
    }

    /// Per-pitcher comparison against `goal`. Pitchers without a goal entry
    /// never match.
    pub fn goal_matches(&self, goal: &[u32]) -> Vec<bool> {
        self.pitchers
            .iter()
            .enumerate()
            .map(|(i, p)| goal.get(i) == Some(&p.get_contents()))
            .collect()
    }

    pub fn is_solved(&self, goal: &[u32]) -> bool {
        goal.len() == self.pitchers.len() && self.goal_matches(goal).iter().all(|&m| m)
    }

    pub fn get_text_representation(&self) -> String {
        self.pitchers
            .iter()
            .map(Pitcher::get_text_representation)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A named preset. Never mutated; every play session works on a copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    name: String,
    goal: Vec<u32>,
    initial_configuration: Vec<Pitcher>,
}
impl Puzzle {
    pub fn new(name: &str, goal: Vec<u32>, initial_configuration: Vec<Pitcher>) -> Self {
        Self {
            name: name.to_string(),
            goal,
            initial_configuration,
        }
    }

    /// Parses `name; c/C c/C ...; g g ...`.
    pub fn new_from_repr(repr: &str) -> Result<Self, ParseError> {
        let repr = repr.trim();
        if repr.is_empty() {
            return Err(ParseError::Empty);
        }
        let mut sections = repr.split(';').map(str::trim);
        let mut next_section = |label| {
            sections
                .next()
                .filter(|s| !s.is_empty())
                .ok_or(ParseError::MissingSection(label))
        };
        let name = next_section("name")?;
        let pitchers = next_section("pitchers")?;
        let goal = next_section("goal")?;

        let initial_configuration = pitchers
            .split_whitespace()
            .enumerate()
            .map(|(index, token)| Pitcher::new_from_repr(token, index))
            .collect::<Result<Vec<_>, _>>()?;
        let goal = goal
            .split_whitespace()
            .map(parse_volume)
            .collect::<Result<Vec<_>, _>>()?;

        if goal.len() != initial_configuration.len() {
            return Err(ParseError::GoalLengthMismatch {
                goal: goal.len(),
                pitchers: initial_configuration.len(),
            });
        }
        for (index, (&goal, pitcher)) in goal.iter().zip(&initial_configuration).enumerate() {
            if goal > pitcher.get_capacity() {
                return Err(ParseError::GoalExceedsCapacity {
                    index,
                    goal,
                    capacity: pitcher.get_capacity(),
                });
            }
        }

        Ok(Self::new(name, goal, initial_configuration))
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_goal(&self) -> &[u32] {
        &self.goal
    }

    #[allow(dead_code)]
    pub fn get_initial_configuration(&self) -> &[Pitcher] {
        &self.initial_configuration
    }

    /// Fresh live state seeded from the initial configuration.
    pub fn new_state(&self) -> PitcherState {
        PitcherState::new(self.initial_configuration.clone())
    }

    pub fn with_name(self, name: String) -> Self {
        Self { name, ..self }
    }

    /// Same name and goal, starting from `state` instead.
    pub fn with_state(&self, state: &PitcherState) -> Self {
        Self {
            name: self.name.clone(),
            goal: self.goal.clone(),
            initial_configuration: state.get_pitchers().to_vec(),
        }
    }

    pub fn get_text_representation(&self) -> String {
        let goal = self
            .goal
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{}; {}; {}",
            self.name,
            PitcherState::new(self.initial_configuration.clone()).get_text_representation(),
            goal
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    SelectPitcher(usize),
    Deselect,
    PourInto(usize, usize),
    SelectPuzzle(usize),
    Reset,
    Undo,
    Redo,
    CopyState,
    PasteState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    label: String,
    action: ControlAction,
    color: Color,
}
impl Button {
    pub fn new(label: &str, action: ControlAction, color: Color) -> Self {
        Self {
            label: label.to_string(),
            action,
            color,
        }
    }
    pub fn get_action(&self) -> ControlAction {
        self.action
    }
    pub fn get_label(&self) -> &str {
        &self.label
    }
    pub fn get_color(&self) -> Color {
        self.color
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitItem {
    Button { action: ControlAction },
    Pitcher { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::rngs::StdRng;
    use ::rand::{Rng, SeedableRng};

    fn pitchers(spec: &[(u32, u32)]) -> Vec<Pitcher> {
        spec.iter().map(|&(cap, contents)| Pitcher::new(cap, contents)).collect()
    }

    fn contents(pitchers: &[Pitcher]) -> Vec<u32> {
        pitchers.iter().map(Pitcher::get_contents).collect()
    }

    #[test]
    fn pour_fills_destination_exactly() {
        let start = pitchers(&[(8, 8), (5, 0), (3, 0)]);
        assert_eq!(contents(&transfer(&start, 0, 1)), vec![3, 5, 0]);
    }

    #[test]
    fn pour_leaves_remainder_in_source() {
        let start = pitchers(&[(8, 3), (5, 5), (3, 0)]);
        assert_eq!(contents(&transfer(&start, 1, 2)), vec![3, 2, 3]);
    }

    #[test]
    fn pour_empties_source_when_destination_has_room() {
        let start = pitchers(&[(8, 3), (5, 2), (3, 0)]);
        assert_eq!(contents(&transfer(&start, 1, 0)), vec![5, 0, 0]);
    }

    #[test]
    fn pour_from_empty_is_noop() {
        let start = pitchers(&[(8, 8), (5, 0), (3, 0)]);
        assert_eq!(transfer(&start, 1, 0), start);
    }

    #[test]
    fn pour_into_full_is_noop() {
        let start = pitchers(&[(8, 0), (5, 5), (3, 3)]);
        assert_eq!(transfer(&start, 1, 2), start);
    }

    #[test]
    fn same_or_invalid_index_is_noop() {
        let start = pitchers(&[(8, 8), (5, 0), (3, 0)]);
        assert_eq!(transfer(&start, 0, 0), start);
        assert_eq!(transfer(&start, 0, 3), start);
        assert_eq!(transfer(&start, 7, 1), start);
    }

    #[test]
    fn transfer_does_not_touch_input() {
        let start = pitchers(&[(8, 8), (5, 0), (3, 0)]);
        let snapshot = start.clone();
        let _ = transfer(&start, 0, 2);
        assert_eq!(start, snapshot);
    }

    #[test]
    fn random_pours_conserve_volume_and_respect_capacity() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..200 {
            let count = rng.random_range(2..=6);
            let mut current: Vec<Pitcher> = (0..count)
                .map(|_| {
                    let capacity = rng.random_range(1..=12);
                    Pitcher::new(capacity, rng.random_range(0..=capacity))
                })
                .collect();
            let total: u32 = contents(&current).iter().sum();
            for _ in 0..30 {
                let from = rng.random_range(0..count);
                let to = rng.random_range(0..count);
                let next = transfer(&current, from, to);
                assert_eq!(contents(&next).iter().sum::<u32>(), total);
                assert_eq!(
                    current[from].get_contents() + current[to].get_contents(),
                    next[from].get_contents() + next[to].get_contents()
                );
                for (i, (before, after)) in current.iter().zip(&next).enumerate() {
                    assert_eq!(before.get_capacity(), after.get_capacity());
                    assert!(after.get_contents() <= after.get_capacity());
                    if i != from && i != to {
                        assert_eq!(before, after);
                    }
                }
                current = next;
            }
        }
    }

    #[test]
    fn apply_transfer_matches_pure_transfer() {
        let start = pitchers(&[(10, 10), (7, 0), (3, 0)]);
        let mut state = PitcherState::new(start.clone());
        let moved = state.apply_transfer(&TransferAction {
            from_pitcher: 0,
            to_pitcher: 1,
        });
        assert!(moved);
        assert_eq!(state.get_pitchers(), transfer(&start, 0, 1).as_slice());
        assert!(!state.apply_transfer(&TransferAction {
            from_pitcher: 2,
            to_pitcher: 2,
        }));
        assert!(!state.apply_transfer(&TransferAction {
            from_pitcher: 0,
            to_pitcher: 9,
        }));
    }

    #[test]
    fn goal_matching() {
        let state = PitcherState::new(pitchers(&[(8, 4), (5, 4), (3, 0)]));
        assert_eq!(state.goal_matches(&[4, 4, 0]), vec![true, true, true]);
        assert!(state.is_solved(&[4, 4, 0]));
        assert_eq!(state.goal_matches(&[4, 3]), vec![true, false, false]);
        assert!(!state.is_solved(&[4, 4]));
        assert_eq!(state.max_capacity(), 8);
        assert_eq!(state.total_volume(), 8);
    }

    #[test]
    fn puzzle_repr_parses() {
        let puzzle = Puzzle::new_from_repr("  Medium ;8/8  0/5 0/3;4 4 0 ").unwrap();
        assert_eq!(puzzle.get_name(), "Medium");
        assert_eq!(puzzle.get_goal(), &[4, 4, 0]);
        assert_eq!(
            puzzle.get_initial_configuration(),
            pitchers(&[(8, 8), (5, 0), (3, 0)]).as_slice()
        );
        assert_eq!(puzzle.get_text_representation(), "Medium; 8/8 0/5 0/3; 4 4 0");
    }

    #[test]
    fn puzzle_repr_rejects_bad_input() {
        assert_eq!(Puzzle::new_from_repr("   "), Err(ParseError::Empty));
        assert_eq!(
            Puzzle::new_from_repr("Medium"),
            Err(ParseError::MissingSection("pitchers"))
        );
        assert_eq!(
            Puzzle::new_from_repr("; 8/8; 8"),
            Err(ParseError::MissingSection("name"))
        );
        assert_eq!(
            Puzzle::new_from_repr("M; 8/8 0/5"),
            Err(ParseError::MissingSection("goal"))
        );
        assert_eq!(
            Puzzle::new_from_repr("M; 8/x; 8"),
            Err(ParseError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            Puzzle::new_from_repr("M; 8; 8"),
            Err(ParseError::InvalidPitcher("8".to_string()))
        );
        assert_eq!(
            Puzzle::new_from_repr("M; 8/8 0/0; 8 0"),
            Err(ParseError::ZeroCapacity { index: 1 })
        );
        assert_eq!(
            Puzzle::new_from_repr("M; 9/8; 8"),
            Err(ParseError::Overfilled {
                index: 0,
                contents: 9,
                capacity: 8
            })
        );
        assert_eq!(
            Puzzle::new_from_repr("M; 8/8 0/5; 4"),
            Err(ParseError::GoalLengthMismatch {
                goal: 1,
                pitchers: 2
            })
        );
        assert_eq!(
            Puzzle::new_from_repr("M; 8/8 0/5; 2 6"),
            Err(ParseError::GoalExceedsCapacity {
                index: 1,
                goal: 6,
                capacity: 5
            })
        );
    }

    #[test]
    fn try_new_checks_capacity() {
        assert_eq!(Pitcher::try_new(5, 5, 0), Ok(Pitcher::new(5, 5)));
        assert_eq!(
            Pitcher::try_new(0, 0, 2),
            Err(ParseError::ZeroCapacity { index: 2 })
        );
        assert_eq!(
            Pitcher::try_new(3, 4, 1),
            Err(ParseError::Overfilled {
                index: 1,
                contents: 4,
                capacity: 3
            })
        );
    }

    #[test]
    #[should_panic(expected = "pitcher capacity must be positive")]
    fn zero_capacity_preset_panics() {
        let _ = Pitcher::new(0, 0);
    }

    #[test]
    #[should_panic(expected = "pitcher overfilled")]
    fn overfilled_preset_panics() {
        let _ = Pitcher::new(3, 4);
    }

    #[test]
    fn new_state_is_a_copy() {
        let puzzle = Puzzle::new("Medium", vec![4, 4, 0], pitchers(&[(8, 8), (5, 0), (3, 0)]));
        let mut state = puzzle.new_state();
        state.apply_transfer(&TransferAction {
            from_pitcher: 0,
            to_pitcher: 1,
        });
        assert_eq!(contents(puzzle.get_initial_configuration()), vec![8, 0, 0]);
        assert_eq!(puzzle.new_state().get_pitchers(), puzzle.get_initial_configuration());
        assert_eq!(
            contents(puzzle.with_state(&state).get_initial_configuration()),
            vec![3, 5, 0]
        );
    }
}
