use std::fmt;

use serde::{Deserialize, Serialize};

/// Exchange-rate quote types tracked by the ledger.
///
/// The set is closed: every ledger row carries exactly one value per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Instrument {
    /// Official wholesale rate
    Oficial,
    /// Parallel ("blue") market rate
    Blue,
    /// Implied rate from bond trades settled locally
    #[serde(rename = "MEP")]
    Mep,
    /// Implied rate from bond trades settled abroad
    #[serde(rename = "CCL")]
    Ccl,
    /// Implied rate from stablecoin markets
    Cripto,
}

impl Instrument {
    /// All instruments, in ledger column order.
    pub const ALL: [Instrument; 5] = [
        Instrument::Oficial,
        Instrument::Blue,
        Instrument::Mep,
        Instrument::Ccl,
        Instrument::Cripto,
    ];

    /// Column header used by the ledger for this instrument.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Oficial => "Oficial",
            Self::Blue => "Blue",
            Self::Mep => "MEP",
            Self::Ccl => "CCL",
            Self::Cripto => "Cripto",
        }
    }

    /// Suffix used for per-instrument environment overrides (`QUOTE_ENDPOINT_<KEY>`).
    pub fn env_key(&self) -> &'static str {
        match self {
            Self::Oficial => "OFICIAL",
            Self::Blue => "BLUE",
            Self::Mep => "MEP",
            Self::Ccl => "CCL",
            Self::Cripto => "CRIPTO",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One value per [`Instrument`].
///
/// Total by construction, so a lookup for any instrument always succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerInstrument<T> {
    pub oficial: T,
    pub blue: T,
    pub mep: T,
    pub ccl: T,
    pub cripto: T,
}

impl<T> PerInstrument<T> {
    /// Builds a value for every instrument from `f`.
    pub fn from_fn(mut f: impl FnMut(Instrument) -> T) -> Self {
        Self {
            oficial: f(Instrument::Oficial),
            blue: f(Instrument::Blue),
            mep: f(Instrument::Mep),
            ccl: f(Instrument::Ccl),
            cripto: f(Instrument::Cripto),
        }
    }

    /// Like [`from_fn`](Self::from_fn) but stops at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(Instrument) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            oficial: f(Instrument::Oficial)?,
            blue: f(Instrument::Blue)?,
            mep: f(Instrument::Mep)?,
            ccl: f(Instrument::Ccl)?,
            cripto: f(Instrument::Cripto)?,
        })
    }

    pub fn get(&self, instrument: Instrument) -> &T {
        match instrument {
            Instrument::Oficial => &self.oficial,
            Instrument::Blue => &self.blue,
            Instrument::Mep => &self.mep,
            Instrument::Ccl => &self.ccl,
            Instrument::Cripto => &self.cripto,
        }
    }

    pub fn get_mut(&mut self, instrument: Instrument) -> &mut T {
        match instrument {
            Instrument::Oficial => &mut self.oficial,
            Instrument::Blue => &mut self.blue,
            Instrument::Mep => &mut self.mep,
            Instrument::Ccl => &mut self.ccl,
            Instrument::Cripto => &mut self.cripto,
        }
    }

    /// Iterates `(instrument, value)` pairs in ledger column order.
    pub fn iter(&self) -> impl Iterator<Item = (Instrument, &T)> + '_ {
        Instrument::ALL.into_iter().map(move |i| (i, self.get(i)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Instrument, &T) -> U) -> PerInstrument<U> {
        PerInstrument::from_fn(|i| f(i, self.get(i)))
    }
}
