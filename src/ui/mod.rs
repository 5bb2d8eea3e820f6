pub mod panels;
pub mod plot;
pub mod simulation;
pub mod tables;
