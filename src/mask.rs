//! Mask compilation: per-position charset slots and combination counting.
//!
//! A mask like `?u?l?l?d` compiles into one [`Slot`] per output position.
//! Each slot owns a deduplicated copy of its symbol set plus a cursor used
//! by the odometer during enumeration.

use bstr::{BStr, BString, ByteSlice};

use crate::charset::{hex_convert, Builtins, Charset};
use crate::error::MaskError;

/// Hard ceiling on the number of mask positions.
pub const MASK_MAX: usize = 256;

/// One compiled mask position: a deduplicated symbol set plus a cursor
/// into it.
///
/// `cursor == symbols.len()` means the position is exhausted and must
/// carry on the next advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    symbols: Vec<u8>,
    pub(crate) cursor: usize,
}

impl Slot {
    /// Install a charset, dropping duplicate bytes while keeping
    /// first-seen order.
    pub(crate) fn install(bytes: &[u8]) -> Self {
        let mut seen = [false; 256];
        let mut symbols = Vec::with_capacity(bytes.len().min(256));

        for &b in bytes {
            if seen[b as usize] {
                continue;
            }
            seen[b as usize] = true;
            symbols.push(b);
        }

        Self { symbols, cursor: 0 }
    }

    /// Install all 256 byte values; already unique, so no dedup pass.
    fn any_byte(bytes: &[u8]) -> Self {
        Self {
            symbols: bytes.to_vec(),
            cursor: 0,
        }
    }

    fn literal(b: u8) -> Self {
        Self {
            symbols: vec![b],
            cursor: 0,
        }
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A compiled mask: the ordered slot sequence for every output position.
#[derive(Debug, Clone)]
pub struct Mask {
    slots: Vec<Slot>,
    source: BString,
}

impl Mask {
    /// Compile a mask string against the built-in and custom charsets.
    ///
    /// `?l ?u ?d ?s ?a ?b` install a built-in class, `?1`-`?4` install a
    /// custom class, `??` installs a literal `?`. Any other byte installs
    /// a single-symbol literal slot, or, in hex mode, is consumed together
    /// with the following byte as a 2-digit hex pair (a trailing odd digit
    /// is dropped).
    pub fn compile(
        mask: &[u8],
        hex_mode: bool,
        builtins: &Builtins,
        custom: &[Option<Charset>; 4],
    ) -> Result<Self, MaskError> {
        let mut slots: Vec<Slot> = Vec::new();
        let mut pos = 0;

        while pos < mask.len() {
            let p0 = mask[pos];

            let slot = if p0 == b'?' {
                pos += 1;
                let Some(&p1) = mask.get(pos) else {
                    return Err(MaskError::MaskSyntax(mask.into()));
                };
                pos += 1;

                match p1 {
                    b'l' => Slot::install(builtins.lower.bytes()),
                    b'u' => Slot::install(builtins.upper.bytes()),
                    b'd' => Slot::install(builtins.digit.bytes()),
                    b's' => Slot::install(builtins.special.bytes()),
                    b'a' => Slot::install(builtins.all.bytes()),
                    b'b' => Slot::any_byte(builtins.any_byte.bytes()),
                    b'1'..=b'4' => {
                        let idx = (p1 - b'1') as usize;
                        match &custom[idx] {
                            Some(cs) => Slot::install(cs.bytes()),
                            None => return Err(MaskError::UndefinedCharset(idx + 1)),
                        }
                    }
                    b'?' => Slot::literal(b'?'),
                    _ => return Err(MaskError::MaskSyntax(mask.into())),
                }
            } else if hex_mode {
                pos += 1;
                let Some(&p1) = mask.get(pos) else {
                    // trailing odd hex digit, dropped
                    break;
                };
                pos += 1;
                Slot::literal((hex_convert(p0) << 4) | hex_convert(p1))
            } else {
                pos += 1;
                Slot::literal(p0)
            };

            if slot.is_empty() {
                return Err(MaskError::EmptyCharset(slots.len() + 1));
            }

            slots.push(slot);
        }

        if slots.is_empty() {
            return Err(MaskError::EmptyMask);
        }
        if slots.len() > MASK_MAX {
            return Err(MaskError::MaskTooLong(slots.len()));
        }

        Ok(Self {
            slots,
            source: mask.into(),
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn source(&self) -> &BStr {
        self.source.as_bstr()
    }

    /// Number of candidates of length `len`: the product of the symbol
    /// counts of the first `len` slots. Wraps silently on overflow.
    pub fn combinations(&self, len: usize) -> u64 {
        self.slots[..len]
            .iter()
            .fold(1u64, |acc, s| acc.wrapping_mul(s.len() as u64))
    }

    /// Total candidate count over an inclusive length range. Wraps
    /// silently on overflow.
    pub fn combinations_range(&self, min: usize, max: usize) -> u64 {
        (min..=max).fold(0u64, |acc, len| acc.wrapping_add(self.combinations(len)))
    }
}
