//! Static content tables: stimuli, remote-viewing targets and theme wording.

pub mod copy;
pub mod stimuli;
pub mod targets;

pub use copy::{Theme, ThemeCopy};
pub use stimuli::{Stimulus, STIMULI};
pub use targets::{RemoteTarget, REMOTE_TARGETS};

/// Stimulus shown for the trial at `trial_index`; wraps around the catalog.
pub fn stimulus_for(catalog: &'static [Stimulus], trial_index: usize) -> &'static Stimulus {
    &catalog[trial_index % catalog.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    static SHORT: [Stimulus; 3] = [
        Stimulus { label: "a", meaning: "", image_source: "" },
        Stimulus { label: "b", meaning: "", image_source: "" },
        Stimulus { label: "c", meaning: "", image_source: "" },
    ];

    #[test]
    fn full_catalog_does_not_wrap_within_a_session() {
        let labels: Vec<_> = (0..24).map(|i| stimulus_for(&STIMULI, i).label).collect();
        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 24);
        assert_eq!(stimulus_for(&STIMULI, 25).label, STIMULI[0].label);
    }

    #[test]
    fn short_catalog_wraps_by_modulo() {
        assert_eq!(stimulus_for(&SHORT, 0).label, "a");
        assert_eq!(stimulus_for(&SHORT, 3).label, "a");
        assert_eq!(stimulus_for(&SHORT, 5).label, "c");
        assert_eq!(stimulus_for(&SHORT, 23).label, "c");
    }
}
