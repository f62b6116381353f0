pub mod record;

pub use record::{IDENTITY, Mat3, PoseRecord, Vec3};
