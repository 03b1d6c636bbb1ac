pub mod ability;
pub mod champion;
pub mod ids;
pub mod text;
