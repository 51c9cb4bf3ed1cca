// Shared math and geometry helpers

pub mod math;
