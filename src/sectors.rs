//! Sector profiles and randomized readings.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Medical,
    Aerospace,
    Fintech,
    Automotive,
}

impl Sector {
    pub const ALL: [Sector; 4] = [
        Sector::Medical,
        Sector::Aerospace,
        Sector::Fintech,
        Sector::Automotive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Medical => "medical",
            Sector::Aerospace => "aerospace",
            Sector::Fintech => "fintech",
            Sector::Automotive => "automotive",
        }
    }

    /// Card title used by the view.
    pub fn title(&self) -> &'static str {
        match self {
            Sector::Medical => "Medical Manifold",
            Sector::Aerospace => "Aerospace Grid",
            Sector::Fintech => "FinTech Mesh",
            Sector::Automotive => "Automotive Core",
        }
    }

    pub fn profile(&self) -> &'static SectorProfile {
        match self {
            Sector::Medical => &MEDICAL,
            Sector::Aerospace => &AEROSPACE,
            Sector::Fintech => &FINTECH,
            Sector::Automotive => &AUTOMOTIVE,
        }
    }
}

/// Integrity band and activity labels for one sector.
#[derive(Debug)]
pub struct SectorProfile {
    pub base: f64,
    pub spread: f64,
    pub activities: &'static [&'static str],
    pub boot_activity: &'static str,
}

impl SectorProfile {
    /// Half-open band `[base, base + spread)`.
    pub fn contains(&self, integrity: f64) -> bool {
        integrity >= self.base && integrity < self.base + self.spread
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> SectorReading {
        SectorReading {
            integrity: rng.gen_range(self.base..self.base + self.spread),
            activity: self.activities.choose(rng).copied().unwrap_or(self.boot_activity),
        }
    }
}

static MEDICAL: SectorProfile = SectorProfile {
    base: 99.8,
    spread: 0.2,
    activities: &["Neural Audit", "Cell Sync", "Bio Handshake", "Lattice Pulse", "NEA Scan"],
    boot_activity: "Sovereign Diagnostics",
};

static AEROSPACE: SectorProfile = SectorProfile {
    base: 99.7,
    spread: 0.3,
    activities: &["Vector Lock", "Orbital Sync", "Kinetic Mesh", "Thruster Opt", "Zenith Core"],
    boot_activity: "NEA Propulsion Core",
};

static FINTECH: SectorProfile = SectorProfile {
    base: 99.9,
    spread: 0.1,
    activities: &["Ledger Sync", "Token Pulse", "Node 7A active", "Yield Stabilized", "Hash Lock"],
    boot_activity: "Universal Handshake",
};

static AUTOMOTIVE: SectorProfile = SectorProfile {
    base: 99.6,
    spread: 0.4,
    activities: &["Path Alpha", "Flow Routing", "Sensor Fusion", "Drive Logic", "Mesh Grid"],
    boot_activity: "Integrity Routing",
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectorReading {
    pub integrity: f64,
    pub activity: &'static str,
}

/// One reading per sector, indexed in `Sector::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorBoard {
    readings: [SectorReading; 4],
}

impl SectorBoard {
    /// Fixed session-start values; these sit above the tick bands.
    pub fn boot() -> Self {
        Self {
            readings: Sector::ALL.map(|s| SectorReading {
                integrity: 100.0,
                activity: s.profile().boot_activity,
            }),
        }
    }

    /// Fresh independent draw for every sector.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            readings: Sector::ALL.map(|s| s.profile().draw(rng)),
        }
    }

    pub fn get(&self, sector: Sector) -> SectorReading {
        self.readings[sector as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sector, SectorReading)> + '_ {
        Sector::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    pub fn min_integrity(&self) -> f64 {
        self.readings
            .iter()
            .map(|r| r.integrity)
            .fold(f64::INFINITY, f64::min)
    }
}

impl Default for SectorBoard {
    fn default() -> Self {
        Self::boot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draws_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let board = SectorBoard::draw(&mut rng);
            for (sector, reading) in board.iter() {
                let profile = sector.profile();
                assert!(
                    profile.contains(reading.integrity),
                    "{} integrity {} outside band",
                    sector.as_str(),
                    reading.integrity
                );
                assert!(profile.activities.contains(&reading.activity));
            }
        }
    }

    #[test]
    fn test_bands_stay_near_full_integrity() {
        for sector in Sector::ALL {
            let p = sector.profile();
            assert!(p.base >= 99.5);
            assert!(p.base + p.spread <= 100.0 + 1e-9);
            assert_eq!(p.activities.len(), 5);
        }
    }

    #[test]
    fn test_boot_board() {
        let board = SectorBoard::boot();
        assert_eq!(board.get(Sector::Medical).activity, "Sovereign Diagnostics");
        assert_eq!(board.get(Sector::Automotive).activity, "Integrity Routing");
        assert!(board.iter().all(|(_, r)| r.integrity == 100.0));
    }

    #[test]
    fn test_every_label_eventually_drawn() {
        let mut rng = StdRng::seed_from_u64(42);
        let profile = Sector::Fintech.profile();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(profile.draw(&mut rng).activity);
        }
        assert_eq!(seen.len(), profile.activities.len());
    }
}
