pub mod easing;
pub mod path;
pub mod ray;
