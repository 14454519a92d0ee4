//! IUPAC nucleotide codes as bitmasked sets of the four literal bases.

use std::fmt;

const BASE_A: u8 = 1;
const BASE_C: u8 = 2;
const BASE_G: u8 = 4;
const BASE_T: u8 = 8;
const BASE_ANY: u8 = BASE_A | BASE_C | BASE_G | BASE_T;

/// The set of literal bases (a subset of `{A, C, G, T}`) allowed at one motif position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct BaseSet(u8);

impl BaseSet {
    pub const EMPTY: Self = Self(0);
    pub const ANY: Self = Self(BASE_ANY);

    /// Look up the base set for an IUPAC symbol, case-insensitively.
    ///
    /// `U` is read as `T`. Returns `None` for anything outside the IUPAC nucleotide alphabet.
    #[inline(always)]
    pub fn from_symbol(symbol: u8) -> Option<Self> {
        let bits = match symbol.to_ascii_uppercase() {
            b'A' => BASE_A,
            b'C' => BASE_C,
            b'G' => BASE_G,
            b'T' | b'U' => BASE_T,
            b'R' => BASE_A | BASE_G,
            b'Y' => BASE_C | BASE_T,
            b'S' => BASE_C | BASE_G,
            b'W' => BASE_A | BASE_T,
            b'K' => BASE_G | BASE_T,
            b'M' => BASE_A | BASE_C,
            b'B' => BASE_C | BASE_G | BASE_T,
            b'D' => BASE_A | BASE_G | BASE_T,
            b'H' => BASE_A | BASE_C | BASE_T,
            b'V' => BASE_A | BASE_C | BASE_G,
            b'N' => BASE_ANY,
            _ => return None,
        };
        Some(Self(bits))
    }

    /// The singleton set of a literal sequence base.
    ///
    /// Ambiguity letters found in a sequence (and any other byte) give the empty set, so they
    /// never match a motif position.
    #[inline(always)]
    pub fn of_base(base: u8) -> Self {
        match base.to_ascii_uppercase() {
            b'A' => Self(BASE_A),
            b'C' => Self(BASE_C),
            b'G' => Self(BASE_G),
            b'T' | b'U' => Self(BASE_T),
            _ => Self::EMPTY,
        }
    }

    #[inline(always)]
    pub fn is_valid_symbol(symbol: u8) -> bool {
        Self::from_symbol(symbol).is_some()
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The single base of a singleton set.
    pub fn literal(self) -> Option<u8> {
        match self.0 {
            BASE_A => Some(b'A'),
            BASE_C => Some(b'C'),
            BASE_G => Some(b'G'),
            BASE_T => Some(b'T'),
            _ => None,
        }
    }

    pub fn to_vec(self) -> Vec<u8> {
        [(BASE_A, b'A'), (BASE_C, b'C'), (BASE_G, b'G'), (BASE_T, b'T')]
            .into_iter()
            .filter(|&(bit, _)| self.0 & bit != 0)
            .map(|(_, base)| base)
            .collect()
    }
}

impl fmt::Display for BaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(base) = self.literal() {
            write!(f, "{}", char::from(base))
        } else {
            write!(f, "[{}]", String::from_utf8_lossy(&self.to_vec()))
        }
    }
}
