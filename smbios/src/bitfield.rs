/// Fixed-size little-endian bit span.
///
/// Bit `i` lives in byte `i / 8` at position `i % 8`. Bits past the end of the span read as
/// clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField<const N: usize>([u8; N]);

impl<const N: usize> BitField<N> {
    pub const fn new(bytes: [u8; N]) -> Self {
        BitField(bytes)
    }

    pub fn test(&self, i: u32) -> bool {
        let (idx, offset) = ((i / 8) as usize, i % 8);
        self.0.get(idx).is_some_and(|b| b & (1 << offset) != 0)
    }
}

impl From<u16> for BitField<2> {
    fn from(value: u16) -> Self {
        BitField(value.to_le_bytes())
    }
}
