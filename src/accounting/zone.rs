//! The two monitored compartments and a fixed-size per-zone container.

use core::fmt;
use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the two monitored compartments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Fridge,
    Freezer,
}

impl Zone {
    /// Both zones, in evaluation order.
    pub const ALL: [Zone; 2] = [Zone::Fridge, Zone::Freezer];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fridge => "fridge",
            Self::Freezer => "freezer",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per zone.  Indexable by [`Zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerZone<T> {
    pub fridge: T,
    pub freezer: T,
}

impl<T> PerZone<T> {
    pub const fn new(fridge: T, freezer: T) -> Self {
        Self { fridge, freezer }
    }

    /// Build each slot from its zone.
    pub fn from_fn(mut f: impl FnMut(Zone) -> T) -> Self {
        Self {
            fridge: f(Zone::Fridge),
            freezer: f(Zone::Freezer),
        }
    }
}

impl<T> Index<Zone> for PerZone<T> {
    type Output = T;

    fn index(&self, zone: Zone) -> &T {
        match zone {
            Zone::Fridge => &self.fridge,
            Zone::Freezer => &self.freezer,
        }
    }
}

impl<T> IndexMut<Zone> for PerZone<T> {
    fn index_mut(&mut self, zone: Zone) -> &mut T {
        match zone {
            Zone::Fridge => &mut self.fridge,
            Zone::Freezer => &mut self.freezer,
        }
    }
}
