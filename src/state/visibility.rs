//! Visibility animator.
//!
//! Observes page elements and flags each one as revealed the first time at
//! least `threshold` of it is inside the viewport. A revealed flag is never
//! retracted. One-shot elements stop being observed once revealed; toggle
//! elements keep being observed, so they still produce callbacks on every
//! entry and exit.

use crate::timer::Millis;
use log::*;
use std::collections::BTreeMap;

/// Default fraction of an element that must be visible.
///
pub const REVEAL_THRESHOLD: f32 = 0.2;

/// Duration of the slide-up reveal animation.
///
pub const REVEAL_DURATION_MS: Millis = 500;

/// Groups of observed page elements.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    Certification,
    Project,
    Design,
    WebDesign,
    Tool,
}

impl Group {
    /// Observation policy used for the group's elements.
    ///
    pub fn policy(&self) -> RevealPolicy {
        match self {
            Group::Certification | Group::Project => RevealPolicy::Toggle,
            Group::Design | Group::WebDesign | Group::Tool => RevealPolicy::OneShot,
        }
    }

    /// Extra delay before an element starts animating, staggered by index.
    ///
    pub fn stagger_ms(&self, index: usize) -> Millis {
        let step: Millis = match self {
            Group::Certification => 150,
            Group::Project => 200,
            Group::Design | Group::WebDesign | Group::Tool => 0,
        };
        step.saturating_mul(index as Millis)
    }
}

/// Identifies one observed element on the page.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId {
    pub group: Group,
    pub index: usize,
}

impl ElementId {
    pub fn new(group: Group, index: usize) -> Self {
        ElementId { group, index }
    }
}

/// Specifying how long an element stays observed.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPolicy {
    Toggle,
    OneShot,
}

#[derive(Debug, Clone)]
struct Observation {
    policy: RevealPolicy,
    intersecting: Option<bool>,
}

/// Progress of an element's reveal animation at a point in time.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPhase {
    Hidden,
    Animating(f32),
    Shown,
}

pub struct VisibilityAnimator {
    threshold: f32,
    observed: BTreeMap<ElementId, Observation>,
    revealed: BTreeMap<ElementId, Millis>,
    callbacks: BTreeMap<ElementId, usize>,
}

impl Default for VisibilityAnimator {
    fn default() -> Self {
        VisibilityAnimator::new(REVEAL_THRESHOLD)
    }
}

impl VisibilityAnimator {
    pub fn new(threshold: f32) -> Self {
        VisibilityAnimator {
            threshold,
            observed: BTreeMap::new(),
            revealed: BTreeMap::new(),
            callbacks: BTreeMap::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Start observing an element. Already revealed one-shot elements are not
    /// observed again.
    ///
    pub fn observe(&mut self, id: ElementId, policy: RevealPolicy) {
        if policy == RevealPolicy::OneShot && self.revealed.contains_key(&id) {
            return;
        }
        self.observed.entry(id).or_insert(Observation {
            policy,
            intersecting: None,
        });
    }

    /// Stop observing an element. Returns true if it was observed.
    ///
    pub fn unobserve(&mut self, id: ElementId) -> bool {
        self.observed.remove(&id).is_some()
    }

    /// Release every observation.
    ///
    pub fn disconnect(&mut self) {
        debug!("Disconnecting {} observed elements", self.observed.len());
        self.observed.clear();
    }

    pub fn is_observed(&self, id: ElementId) -> bool {
        self.observed.contains_key(&id)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.revealed.contains_key(&id)
    }

    pub fn revealed_at(&self, id: ElementId) -> Option<Millis> {
        self.revealed.get(&id).copied()
    }

    /// Number of observation callbacks delivered for an element.
    ///
    pub fn callback_count(&self, id: ElementId) -> usize {
        self.callbacks.get(&id).copied().unwrap_or(0)
    }

    /// Re-evaluate every observed element against the current viewport.
    /// `ratio_of` returns the visible fraction of an element, or `None` if it
    /// is not on the page. Returns the elements revealed by this update.
    ///
    pub fn update<F>(&mut self, ratio_of: F, now: Millis) -> Vec<ElementId>
    where
        F: Fn(ElementId) -> Option<f32>,
    {
        let threshold = self.threshold;
        let mut entered = vec![];
        for (id, observation) in self.observed.iter_mut() {
            let intersecting = match ratio_of(*id) {
                Some(ratio) => ratio > 0.0 && ratio >= threshold,
                None => false,
            };
            if observation.intersecting == Some(intersecting) {
                continue;
            }
            observation.intersecting = Some(intersecting);
            *self.callbacks.entry(*id).or_insert(0) += 1;
            if intersecting {
                entered.push((*id, observation.policy));
            }
        }

        let mut newly_revealed = vec![];
        for (id, policy) in entered {
            if !self.revealed.contains_key(&id) {
                self.revealed.insert(id, now);
                newly_revealed.push(id);
                debug!("Revealed {:?} #{}", id.group, id.index);
            }
            if policy == RevealPolicy::OneShot {
                self.observed.remove(&id);
            }
        }
        newly_revealed
    }

    /// Animation phase of an element at `now`.
    ///
    pub fn phase(&self, id: ElementId, now: Millis) -> RevealPhase {
        match self.revealed_at(id) {
            None => RevealPhase::Hidden,
            Some(at) => reveal_phase(at.saturating_add(id.group.stagger_ms(id.index)), now),
        }
    }

    /// Whether any revealed element is still animating at `now`.
    ///
    pub fn is_animating(&self, now: Millis) -> bool {
        self.revealed.keys().any(|id| {
            !matches!(self.phase(*id, now), RevealPhase::Shown)
        })
    }
}

/// Phase of a reveal animation that starts at `start`.
///
pub fn reveal_phase(start: Millis, now: Millis) -> RevealPhase {
    if now < start {
        RevealPhase::Hidden
    } else if now >= start.saturating_add(REVEAL_DURATION_MS) {
        RevealPhase::Shown
    } else {
        RevealPhase::Animating((now - start) as f32 / REVEAL_DURATION_MS as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const DESIGN: ElementId = ElementId {
        group: Group::Design,
        index: 0,
    };
    const CERT: ElementId = ElementId {
        group: Group::Certification,
        index: 1,
    };

    #[test]
    fn one_shot_detaches_after_first_reveal() {
        let mut animator = VisibilityAnimator::default();
        animator.observe(DESIGN, RevealPolicy::OneShot);
        let ratio = Cell::new(0.0_f32);

        animator.update(|_| Some(ratio.get()), 0);
        assert!(!animator.is_revealed(DESIGN));

        ratio.set(0.5);
        assert_eq!(animator.update(|_| Some(ratio.get()), 10), vec![DESIGN]);
        assert!(animator.is_revealed(DESIGN));
        assert!(!animator.is_observed(DESIGN));
        let callbacks = animator.callback_count(DESIGN);

        ratio.set(0.0);
        animator.update(|_| Some(ratio.get()), 20);
        ratio.set(1.0);
        assert!(animator.update(|_| Some(ratio.get()), 30).is_empty());

        assert!(animator.is_revealed(DESIGN));
        assert_eq!(animator.revealed_at(DESIGN), Some(10));
        assert_eq!(animator.callback_count(DESIGN), callbacks);
    }

    #[test]
    fn toggle_keeps_observing_but_never_retracts() {
        let mut animator = VisibilityAnimator::default();
        animator.observe(CERT, RevealPolicy::Toggle);

        animator.update(|_| Some(1.0), 0);
        animator.update(|_| Some(0.0), 10);
        let revealed_again = animator.update(|_| Some(1.0), 20);

        assert!(revealed_again.is_empty());
        assert!(animator.is_revealed(CERT));
        assert!(animator.is_observed(CERT));
        assert_eq!(animator.revealed_at(CERT), Some(0));
        assert_eq!(animator.callback_count(CERT), 3);
    }

    #[test]
    fn threshold_is_twenty_percent() {
        let mut animator = VisibilityAnimator::default();
        animator.observe(DESIGN, RevealPolicy::OneShot);

        animator.update(|_| Some(0.19), 0);
        assert!(!animator.is_revealed(DESIGN));
        animator.update(|_| Some(0.2), 0);
        assert!(animator.is_revealed(DESIGN));
    }

    #[test]
    fn unchanged_status_produces_no_callback() {
        let mut animator = VisibilityAnimator::default();
        animator.observe(CERT, RevealPolicy::Toggle);
        animator.update(|_| Some(0.0), 0);
        animator.update(|_| Some(0.1), 0);
        animator.update(|_| None, 0);
        assert_eq!(animator.callback_count(CERT), 1);
    }

    #[test]
    fn disconnect_releases_all_observations() {
        let mut animator = VisibilityAnimator::default();
        animator.observe(CERT, RevealPolicy::Toggle);
        animator.observe(DESIGN, RevealPolicy::OneShot);
        animator.disconnect();

        assert_eq!(animator.observed_count(), 0);
        assert!(animator.update(|_| Some(1.0), 0).is_empty());
        assert!(!animator.is_revealed(CERT));
    }

    #[test]
    fn revealed_one_shot_is_not_observed_again() {
        let mut animator = VisibilityAnimator::default();
        animator.observe(DESIGN, RevealPolicy::OneShot);
        animator.update(|_| Some(1.0), 0);
        animator.observe(DESIGN, RevealPolicy::OneShot);
        assert!(!animator.is_observed(DESIGN));
    }

    #[test]
    fn staggered_phases() {
        let mut animator = VisibilityAnimator::default();
        animator.observe(CERT, RevealPolicy::Toggle);
        animator.update(|_| Some(1.0), 1000);

        assert_eq!(animator.phase(CERT, 1100), RevealPhase::Hidden);
        assert_eq!(animator.phase(CERT, 1400), RevealPhase::Animating(0.5));
        assert_eq!(animator.phase(CERT, 1650), RevealPhase::Shown);
        assert!(animator.is_animating(1400));
        assert!(!animator.is_animating(1650));
    }

    #[test]
    fn group_policies() {
        assert_eq!(Group::Certification.policy(), RevealPolicy::Toggle);
        assert_eq!(Group::Project.policy(), RevealPolicy::Toggle);
        assert_eq!(Group::Design.policy(), RevealPolicy::OneShot);
        assert_eq!(Group::WebDesign.policy(), RevealPolicy::OneShot);
        assert_eq!(Group::Tool.policy(), RevealPolicy::OneShot);
    }
}
