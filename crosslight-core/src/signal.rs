//! Signal head colors and the intersection signal configuration.

use crate::phase::Phase;

/// Color of a three-aspect vehicle head.
///
/// A head's state is exactly one variant, so commanding two colors at once
/// is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VehicleColor {
    Red,
    Yellow,
    Green,
}

/// Color of a two-aspect pedestrian head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PedestrianColor {
    Red,
    Green,
}

/// Commanded color for each of the five heads of the intersection.
///
/// Recomputed at every phase entry and on every flash step of the
/// pedestrian phase. The I/O layer applies it per head: the line for the
/// commanded color active, the head's other lines inactive, in the same
/// update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalConfig {
    pub main: VehicleColor,
    pub left_turn: VehicleColor,
    pub side: VehicleColor,
    pub ped_main: PedestrianColor,
    pub ped_side: PedestrianColor,
}

impl SignalConfig {
    /// Every head red.
    pub const fn all_red() -> Self {
        Self {
            main: VehicleColor::Red,
            left_turn: VehicleColor::Red,
            side: VehicleColor::Red,
            ped_main: PedestrianColor::Red,
            ped_side: PedestrianColor::Red,
        }
    }

    /// Vehicles stopped, both crossings commanded to `color`. The flash at
    /// the end of the pedestrian phase alternates this between red and
    /// green.
    pub const fn pedestrian(color: PedestrianColor) -> Self {
        Self {
            ped_main: color,
            ped_side: color,
            ..Self::all_red()
        }
    }

    /// The configuration a phase applies on entry.
    pub const fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::MainGreen => Self {
                main: VehicleColor::Green,
                left_turn: VehicleColor::Green,
                ..Self::all_red()
            },
            Phase::MainYellow => Self {
                main: VehicleColor::Yellow,
                left_turn: VehicleColor::Yellow,
                ..Self::all_red()
            },
            Phase::SideGreen => Self {
                side: VehicleColor::Green,
                ..Self::all_red()
            },
            Phase::SideYellow => Self {
                side: VehicleColor::Yellow,
                ..Self::all_red()
            },
            Phase::PedestrianGreen => Self::pedestrian(PedestrianColor::Green),
        }
    }
}
