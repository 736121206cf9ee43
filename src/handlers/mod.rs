// Two tiers: public (no supplier proof) and protected (supplier gate).
pub mod protected;
pub mod public;
