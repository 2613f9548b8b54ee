pub mod engine;
pub mod outcome;

pub use engine::{
    classify, classify_measurement, classify_parameter, classify_reading, missing_priority,
    priority_for,
};
pub use outcome::{Assessment, ClassificationResult, Priority, Status};
