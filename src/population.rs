//! Population state: chromosome slots, fitness cache, best-seen record.
//!
//! The fitness cache is parallel to the slots (index `i` always scores
//! slot `i`) and is recomputed as a whole every generation. The cache is
//! only committed when every utility is finite, so a failed evaluation
//! pass leaves the previous generation's state intact.

use crate::chromosome::Chromosome;
use crate::error::Error;
use crate::types::{Direction, Objective};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub(crate) struct Population {
    slots: Vec<Chromosome>,
    fitness: Vec<f32>,
    best: Option<(Chromosome, f32)>,
}

impl Population {
    /// Fills `size` slots: one exact copy of the template, the rest
    /// randomized variants of it. The best-seen record is established by
    /// the first `evaluate_all` + `update_best` pass.
    pub(crate) fn initialize<R: Rng>(template: &Chromosome, size: usize, rng: &mut R) -> Self {
        debug_assert!(size >= 1);
        let mut slots = Vec::with_capacity(size);
        slots.push(template.clone());
        for _ in 1..size {
            let mut variant = template.clone();
            variant.randomize(rng);
            slots.push(variant);
        }
        Self {
            fitness: vec![0.0; size],
            slots,
            best: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slots(&self) -> &[Chromosome] {
        &self.slots
    }

    pub(crate) fn fitness(&self) -> &[f32] {
        &self.fitness
    }

    pub(crate) fn best(&self) -> Option<(&Chromosome, f32)> {
        self.best.as_ref().map(|(c, u)| (c, *u))
    }

    /// Recomputes the fitness cache, one objective call per slot.
    ///
    /// All-or-nothing: if any utility is non-finite the cache is left
    /// untouched and [`Error::InvalidUtility`] names the offending slot.
    /// With the `parallel` feature and `parallel = true` the calls fan out
    /// over rayon; slot order never matters since objectives are pure.
    pub(crate) fn evaluate_all<O>(&mut self, objective: &O, parallel: bool) -> Result<(), Error>
    where
        O: Objective + ?Sized,
    {
        self.fitness = score_all(&self.slots, objective, parallel)?;
        Ok(())
    }

    /// Scans the fresh cache and replaces the best-seen record if any slot
    /// strictly improves on it under `direction`. Ties keep the incumbent.
    ///
    /// Returns whether the record changed. This is the only path by which
    /// the record changes; it never regresses.
    pub(crate) fn update_best(&mut self, direction: Direction) -> bool {
        let mut best_idx = None;
        let mut best_utility = self.best.as_ref().map(|(_, u)| *u);

        for (i, &u) in self.fitness.iter().enumerate() {
            let improves = match best_utility {
                Some(incumbent) => direction.improves(u, incumbent),
                None => true,
            };
            if improves {
                best_idx = Some(i);
                best_utility = Some(u);
            }
        }

        match best_idx {
            Some(i) => {
                self.best = Some((self.slots[i].clone(), self.fitness[i]));
                true
            }
            None => false,
        }
    }

    /// Swaps in the next generation. The slot count never changes.
    pub(crate) fn replace(&mut self, next: Vec<Chromosome>) {
        debug_assert_eq!(next.len(), self.slots.len());
        self.slots = next;
    }
}

fn score_one<O>(objective: &O, chromosome: &Chromosome, index: usize) -> Result<f32, Error>
where
    O: Objective + ?Sized,
{
    let utility = objective.utility(chromosome);
    if utility.is_finite() {
        Ok(utility)
    } else {
        Err(Error::InvalidUtility {
            index,
            value: utility,
        })
    }
}

#[cfg(feature = "parallel")]
fn score_all<O>(slots: &[Chromosome], objective: &O, parallel: bool) -> Result<Vec<f32>, Error>
where
    O: Objective + ?Sized,
{
    if parallel {
        slots
            .par_iter()
            .enumerate()
            .map(|(i, c)| score_one(objective, c, i))
            .collect()
    } else {
        slots
            .iter()
            .enumerate()
            .map(|(i, c)| score_one(objective, c, i))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all<O>(slots: &[Chromosome], objective: &O, parallel: bool) -> Result<Vec<f32>, Error>
where
    O: Objective + ?Sized,
{
    let _ = parallel;
    slots
        .iter()
        .enumerate()
        .map(|(i, c)| score_one(objective, c, i))
        .collect()
}
