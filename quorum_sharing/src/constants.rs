/// Smallest threshold accepted by any scheme. A threshold of one would hand out the secret itself.
pub const MIN_THRESHOLD: usize = 2;
pub const MAX_PARTIES: usize = 1000;

/// Bounds of the security parameter, the bit length of secrets and moduli.
pub const MIN_SECURITY: usize = 64;
pub const MAX_SECURITY: usize = 512;
