pub type Vec3 = [f32; 3];

/// Row-major 3x3 matrix.
pub type Mat3 = [f32; 9];

pub const IDENTITY: Mat3 = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// One pose sample as stored in a log: 12 bytes of position followed by
/// 36 bytes of orientation, all little-endian `f32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseRecord {
    pub position: Vec3,
    pub orientation: Mat3,
}

impl PoseRecord {
    pub const POSITION_SIZE: usize = 3 * size_of::<f32>();
    pub const ORIENTATION_SIZE: usize = 9 * size_of::<f32>();
    pub const SIZE: usize = Self::POSITION_SIZE + Self::ORIENTATION_SIZE;

    pub fn new(position: Vec3, orientation: Mat3) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn identity() -> Self {
        Self::new([0.0; 3], IDENTITY)
    }

    /// Rotation of `angle` radians about the Y axis, placed at `position`.
    pub fn rotation_y(angle: f32, position: Vec3) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let orientation = [
             c,  0.0, s,
             0.0, 1.0, 0.0,
            -s,  0.0, c,
        ];
        Self::new(position, orientation)
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.orientation[row * 3 + col]
    }

    pub fn position_bytes(&self) -> [u8; Self::POSITION_SIZE] {
        let mut out = [0u8; Self::POSITION_SIZE];
        encode_floats(&self.position, &mut out);
        out
    }

    pub fn orientation_bytes(&self) -> [u8; Self::ORIENTATION_SIZE] {
        let mut out = [0u8; Self::ORIENTATION_SIZE];
        encode_floats(&self.orientation, &mut out);
        out
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..Self::POSITION_SIZE].copy_from_slice(&self.position_bytes());
        out[Self::POSITION_SIZE..].copy_from_slice(&self.orientation_bytes());
        out
    }

    pub fn from_parts(
        position: &[u8; Self::POSITION_SIZE],
        orientation: &[u8; Self::ORIENTATION_SIZE],
    ) -> Self {
        let mut pose = Self::new([0.0; 3], [0.0; 9]);
        decode_floats(position, &mut pose.position);
        decode_floats(orientation, &mut pose.orientation);
        pose
    }

    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        let mut pose = Self::new([0.0; 3], [0.0; 9]);
        decode_floats(&bytes[..Self::POSITION_SIZE], &mut pose.position);
        decode_floats(&bytes[Self::POSITION_SIZE..], &mut pose.orientation);
        pose
    }

    /// Bitwise equality, so NaN payloads and signed zeros compare exactly.
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.position
            .iter()
            .chain(&self.orientation)
            .zip(other.position.iter().chain(&other.orientation))
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Default for PoseRecord {
    fn default() -> Self {
        Self::identity()
    }
}

fn encode_floats(values: &[f32], out: &mut [u8]) {
    for (v, chunk) in values.iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&v.to_le_bytes());
    }
}

fn decode_floats(bytes: &[u8], out: &mut [f32]) {
    for (v, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        *v = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}
