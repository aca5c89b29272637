pub mod constants;
pub mod effects;
pub mod input;
pub mod particles;
pub mod state;
pub mod text;
pub mod trail;
pub mod viz;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use constants::*;
pub use effects::*;
pub use input::*;
pub use particles::*;
pub use state::*;
pub use trail::*;
