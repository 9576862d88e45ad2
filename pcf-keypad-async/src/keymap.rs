//! Scan-code to key translation.
//!
//! Scan codes depend on how a particular keypad is wired to the expander, so
//! they are found empirically: run the driver with `debug` enabled, press each
//! key, and note the decimal value it logs. Those values go in the keymap.

use core::fmt;

use heapless::Vec;

/// Scan byte meaning "no switch closed".
pub const NO_KEY: u8 = 0xFF;

/// Returned for a scan code that is not in the keymap.
pub const UNKNOWN_KEY: char = '?';

/// An immutable, validated mapping from scan code to key character.
///
/// Entries are kept sorted by scan code so lookups are a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap<const N: usize> {
    entries: Vec<(u8, char), N>,
}

impl<const N: usize> Keymap<N> {
    /// Builds a keymap from `(scan code, key)` pairs.
    ///
    /// Codes must be unique and must not be [`NO_KEY`].
    pub fn new(entries: &[(u8, char)]) -> Result<Self, KeymapError> {
        let mut sorted: Vec<(u8, char), N> = Vec::new();
        for &(code, key) in entries {
            if code == NO_KEY {
                return Err(KeymapError::ReservedCode);
            }
            sorted
                .push((code, key))
                .map_err(|_| KeymapError::TooManyKeys { capacity: N })?;
        }

        sorted.sort_unstable_by_key(|&(code, _)| code);
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(KeymapError::DuplicateCode(pair[0].0));
        }

        Ok(Self { entries: sorted })
    }

    /// Builds a keymap from a key list and a scan-code list of equal length,
    /// where `codes[i]` is the scan code of `keys[i]`.
    pub fn from_parallel(keys: &[char], codes: &[u8]) -> Result<Self, KeymapError> {
        if keys.len() != codes.len() {
            return Err(KeymapError::LengthMismatch {
                keys: keys.len(),
                codes: codes.len(),
            });
        }

        let mut pairs: Vec<(u8, char), N> = Vec::new();
        for (&key, &code) in keys.iter().zip(codes) {
            pairs
                .push((code, key))
                .map_err(|_| KeymapError::TooManyKeys { capacity: N })?;
        }
        Self::new(&pairs)
    }

    /// Translates a raw scan byte.
    ///
    /// Returns `None` for [`NO_KEY`], the mapped key when the code is known
    /// and [`UNKNOWN_KEY`] otherwise.
    pub fn resolve(&self, raw: u8) -> Option<char> {
        if raw == NO_KEY {
            return None;
        }
        let key = match self.entries.binary_search_by_key(&raw, |&(code, _)| code) {
            Ok(index) => self.entries[index].1,
            Err(_) => UNKNOWN_KEY,
        };
        Some(key)
    }

    /// Number of mapped keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no key is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(scan code, key)` pairs in ascending scan-code order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, char)> + '_ {
        self.entries.iter().copied()
    }
}

/// Reasons a keymap is rejected at construction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum KeymapError {
    /// Two keys share a scan code.
    DuplicateCode(u8),
    /// A key was assigned [`NO_KEY`].
    ReservedCode,
    /// More entries than the keymap's capacity.
    TooManyKeys { capacity: usize },
    /// Key and code lists differ in length.
    LengthMismatch { keys: usize, codes: usize },
}

impl fmt::Debug for KeymapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCode(code) => write!(f, "DuplicateCode({code})"),
            Self::ReservedCode => write!(f, "ReservedCode"),
            Self::TooManyKeys { capacity } => write!(f, "TooManyKeys({capacity})"),
            Self::LengthMismatch { keys, codes } => write!(f, "LengthMismatch({keys}, {codes})"),
        }
    }
}

impl fmt::Display for KeymapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCode(code) => write!(f, "scan code {code} is mapped more than once"),
            Self::ReservedCode => write!(f, "scan code {NO_KEY} is reserved for \"no key\""),
            Self::TooManyKeys { capacity } => write!(f, "keymap holds at most {capacity} keys"),
            Self::LengthMismatch { keys, codes } => {
                write!(f, "{keys} keys but {codes} scan codes")
            }
        }
    }
}

impl core::error::Error for KeymapError {}
