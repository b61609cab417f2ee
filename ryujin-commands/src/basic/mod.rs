pub mod example;
pub mod example_with_params;
