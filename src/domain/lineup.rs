//! Accepted lineups and the append-only pool they are collected in.

use rust_decimal::Decimal;

use super::catalog::RosterCatalog;

/// One accepted lineup: selected skater and goalie row indices.
///
/// Indices are catalog row positions, kept in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lineup {
    skaters: Vec<usize>,
    goalies: Vec<usize>,
}

impl Lineup {
    /// Create a lineup from row indices. Indices are sorted and deduplicated.
    #[must_use]
    pub fn new(mut skaters: Vec<usize>, mut goalies: Vec<usize>) -> Self {
        skaters.sort_unstable();
        skaters.dedup();
        goalies.sort_unstable();
        goalies.dedup();
        Self { skaters, goalies }
    }

    /// Decode a 0/1 assignment vector laid out as all skaters then all goalies.
    #[must_use]
    pub fn from_assignment(assignment: &[bool], skater_count: usize) -> Self {
        let (skaters, goalies) = assignment.split_at(skater_count.min(assignment.len()));
        Self {
            skaters: selected(skaters),
            goalies: selected(goalies),
        }
    }

    /// Encode as a 0/1 vector of length `skater_count + goalie_count`.
    #[must_use]
    pub fn to_assignment(&self, skater_count: usize, goalie_count: usize) -> Vec<bool> {
        let mut assignment = vec![false; skater_count + goalie_count];
        for &i in &self.skaters {
            assignment[i] = true;
        }
        for &g in &self.goalies {
            assignment[skater_count + g] = true;
        }
        assignment
    }

    #[must_use]
    pub fn skaters(&self) -> &[usize] {
        &self.skaters
    }

    #[must_use]
    pub fn goalies(&self) -> &[usize] {
        &self.goalies
    }

    /// Number of players (skaters and goalies) shared with another lineup.
    #[must_use]
    pub fn shared_with(&self, other: &Lineup) -> usize {
        count_shared(&self.skaters, &other.skaters) + count_shared(&self.goalies, &other.goalies)
    }

    #[must_use]
    pub fn salary(&self, catalog: &RosterCatalog) -> u32 {
        let skaters: u32 = self.skaters.iter().map(|&i| catalog.skaters()[i].salary).sum();
        let goalies: u32 = self.goalies.iter().map(|&g| catalog.goalies()[g].salary).sum();
        skaters + goalies
    }

    #[must_use]
    pub fn projected(&self, catalog: &RosterCatalog) -> Decimal {
        let skaters: Decimal = self.skaters.iter().map(|&i| catalog.skaters()[i].projected).sum();
        let goalies: Decimal = self.goalies.iter().map(|&g| catalog.goalies()[g].projected).sum();
        skaters + goalies
    }
}

fn selected(values: &[bool]) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, &on)| on.then_some(i))
        .collect()
}

/// Count common elements of two ascending index lists.
fn count_shared(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut shared) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    shared
}

/// Ordered, append-only sequence of accepted lineups for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineupPool {
    lineups: Vec<Lineup>,
}

impl LineupPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, lineup: Lineup) {
        self.lineups.push(lineup);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lineups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lineups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lineup> {
        self.lineups.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Lineup] {
        &self.lineups
    }

    /// Largest number of players shared by any two lineups in the pool.
    #[must_use]
    pub fn max_shared(&self) -> usize {
        let mut max = 0;
        for (i, a) in self.lineups.iter().enumerate() {
            for b in &self.lineups[i + 1..] {
                max = max.max(a.shared_with(b));
            }
        }
        max
    }
}

impl<'a> IntoIterator for &'a LineupPool {
    type Item = &'a Lineup;
    type IntoIter = std::slice::Iter<'a, Lineup>;

    fn into_iter(self) -> Self::IntoIter {
        self.lineups.iter()
    }
}
