//! Vector and matrix primitives used by every stage of the pipeline.

pub mod mat3;
pub mod vec2;
pub mod vec3;
