//! GF(2^128) arithmetic for GCM authentication.
//!
//! The field is defined by x^128 + x^7 + x^2 + x + 1 (NIST SP 800-38D).
//! Elements are blocks of 4 big-endian 32-bit words, most significant word
//! first. Reduction only ever touches the top word, so the reduction
//! polynomial is carried as a single u32.

/// Top-word image of the reduction value R = 0xE1 || 0^120.
const REDUCTION: u32 = 0xE100_0000;

/// A 128-bit field element / GHASH block.
pub type GfBlock = [u32; 4];

/// 4-bit windows across a 128-bit operand.
const TABLE_POSITIONS: usize = 32;
const TABLE_ENTRIES: usize = TABLE_POSITIONS * 16;

/// Reference bit-by-bit multiplication (SP 800-38D algorithm 1).
///
/// Walks the 128 bits of `x` most-significant-first, accumulating the
/// running value of `y`, which is multiplied by x (shifted down) after each
/// bit. Only used while building the windowed table; steady-state hashing
/// goes through [`GhashKey::table_multiply`].
pub fn multiply(x: &GfBlock, y: &GfBlock) -> GfBlock {
    let mut z = [0u32; 4];
    let mut v = *y;
    for i in 0..128 {
        if x[i / 32] & (1u32 << (31 - (i % 32))) != 0 {
            for k in 0..4 {
                z[k] ^= v[k];
            }
        }
        v = mul_by_x(&v);
    }
    z
}

/// Multiply an element by x: shift right one bit across the block, pulling
/// each word's low bit into the top of the next, and fold the dropped bit
/// back in through the reduction value.
pub fn mul_by_x(x: &GfBlock) -> GfBlock {
    let lsb = x[3] & 1;
    let mut out = [0u32; 4];
    for i in (1..4).rev() {
        out[i] = (x[i] >> 1) | ((x[i - 1] & 1) << 31);
    }
    out[0] = x[0] >> 1;
    if lsb == 1 {
        out[0] ^= REDUCTION;
    }
    out
}

/// Precomputed multiplication table against a fixed hash subkey H.
///
/// One flat array indexed by `position * 16 + nibble`: for each of the 32
/// nibble positions of an operand, the 16 possible partial products against
/// H. 4-bit windows; 8-bit tables take more space and are known to have
/// timing problems in table-lookup implementations.
pub struct GhashKey {
    table: Vec<GfBlock>,
}

impl GhashKey {
    /// Build the table for hash subkey `h`.
    ///
    /// The expensive reference multiply runs once per position; within each
    /// 16-entry sub-table only the power-of-two entries are derived by field
    /// doubling and everything else is composed by XOR.
    pub fn new(h: &GfBlock) -> Self {
        let mut table = vec![[0u32; 4]; TABLE_ENTRIES];
        for pos in 0..TABLE_POSITIONS {
            // operand with a single nibble's high bit set at this position
            let mut x = [0u32; 4];
            let shift = (7 - (pos % 8)) * 4;
            x[pos / 8] = 0x8u32 << shift;
            let mid = multiply(&x, h);

            let base = pos * 16;
            table[base + 8] = mid;
            let mut i = 4;
            while i > 0 {
                table[base + i] = mul_by_x(&table[base + 2 * i]);
                i >>= 1;
            }
            let mut i = 2;
            while i < 8 {
                for j in 1..i {
                    let mut e = table[base + i];
                    for k in 0..4 {
                        e[k] ^= table[base + j][k];
                    }
                    table[base + i + j] = e;
                }
                i *= 2;
            }
            // entry 0 stays zero; the top half composes with mid
            for i in 9..16 {
                let mut e = mid;
                for k in 0..4 {
                    e[k] ^= table[base + (i ^ 8)][k];
                }
                table[base + i] = e;
            }
        }
        Self { table }
    }

    /// Table-based multiply of `x` by the hash subkey.
    pub fn table_multiply(&self, x: &GfBlock) -> GfBlock {
        let mut z = [0u32; 4];
        for i in 0..TABLE_POSITIONS {
            let nibble = ((x[i / 8] >> ((7 - (i % 8)) * 4)) & 0xF) as usize;
            let e = &self.table[i * 16 + nibble];
            for k in 0..4 {
                z[k] ^= e[k];
            }
        }
        z
    }

    /// One GHASH step: fold block `x` into the accumulator `y`.
    pub fn ghash(&self, y: &mut GfBlock, x: &GfBlock) {
        for k in 0..4 {
            y[k] ^= x[k];
        }
        *y = self.table_multiply(y);
    }
}

/// Pack up to 16 bytes into a field block, zero-padding the tail.
pub fn block_from_bytes(bytes: &[u8]) -> GfBlock {
    let mut block = [0u32; 4];
    for (i, &b) in bytes.iter().take(16).enumerate() {
        block[i / 4] |= u32::from(b) << (8 * (3 - (i % 4)));
    }
    block
}

/// Unpack a field block into 16 big-endian bytes.
pub fn block_to_bytes(block: &GfBlock) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (i, w) in block.iter().enumerate() {
        out[4 * i..4 * i + 4].copy_from_slice(&w.to_be_bytes());
    }
    out
}
