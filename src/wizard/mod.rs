pub mod step;

pub use step::CalculatorStep;
