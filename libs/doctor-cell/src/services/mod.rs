// libs/doctor-cell/src/services/mod.rs
pub mod matching;
pub mod roster;
pub mod search;
