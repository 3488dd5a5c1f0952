pub mod borders;

pub use borders::{BORDER_SAMPLE_RADIUS, BORDER_SAMPLE_STRIDE, generate_borders, sample_borders};
