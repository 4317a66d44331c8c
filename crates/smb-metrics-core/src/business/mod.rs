pub mod calculator;
pub mod formulas;
pub mod status;
