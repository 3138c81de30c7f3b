//! Canonical encoding constants.
//!
//! The type tags are part of the wire contract: an independent
//! implementation must agree on every byte here or its digests diverge.

/// Type tag for a null value.
pub const TAG_NULL: u8 = 0x00;

/// Type tag for a boolean value.
pub const TAG_BOOL: u8 = 0x01;

/// Type tag for a signed 64-bit integer.
pub const TAG_INT: u8 = 0x02;

/// Type tag for an IEEE-754 double.
pub const TAG_FLOAT: u8 = 0x03;

/// Type tag for a UTF-8 string.
pub const TAG_STRING: u8 = 0x04;

/// Type tag for an atomic binary blob.
pub const TAG_BYTES: u8 = 0x05;

/// Type tag for an ordered sequence.
pub const TAG_SEQUENCE: u8 = 0x06;

/// Type tag for a string-keyed mapping.
pub const TAG_MAPPING: u8 = 0x07;

/// Required length of tree-build entropy, in bytes.
pub const ENTROPY_LEN: usize = 32;

/// Length of a per-leaf salt, in bytes.
pub const SALT_LEN: usize = 32;

/// Maximum nesting depth accepted by the flattener.
///
/// Owned values cannot contain reference cycles, so nesting depth is the
/// only unbounded dimension of an input document.
pub const MAX_DEPTH: usize = 128;

/// Separator joining path segments into a leaf label.
pub const LABEL_SEPARATOR: &str = ".";
