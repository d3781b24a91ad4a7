pub mod core;
pub mod fonts;
