//! Heritable DNA for organisms.
//!
//! A genome is an ordered list of trait colors (`#rrggbb`). Reproduction copies
//! the parent's layers, perturbing some of them and occasionally appending a
//! new one.

pub mod color;
pub mod mutation;

pub use color::{mutate_color, TraitColor, BASELINE_COLOR};
pub use mutation::{mutate_dna, DnaMutator, MutationConfig};

/// A genome, one trait color per layer
pub type Dna = Vec<String>;

/// The genome every organism starts from when none is supplied
pub fn baseline_dna() -> Dna {
    vec![BASELINE_COLOR.to_string()]
}
