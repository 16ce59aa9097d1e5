pub mod decor;
pub mod particles;
pub mod sections;
pub mod typewriter;
pub mod vector;
