//! Infection status effect component

use std::fmt;
use std::str::FromStr;

/// Kind of status effect an infection applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InfectionKind {
    /// Healthy
    #[default]
    NoInfection,
    /// Steering (player input or AI) is ignored
    CannotInput,
    /// Random strong impulses push the body around
    StrongImpulses,
}

impl InfectionKind {
    /// Name as written in configuration files
    pub fn name(self) -> &'static str {
        match self {
            InfectionKind::NoInfection => "NoInfection",
            InfectionKind::CannotInput => "CannotInput",
            InfectionKind::StrongImpulses => "StrongImpulses",
        }
    }
}

impl fmt::Display for InfectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InfectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NoInfection" => Ok(InfectionKind::NoInfection),
            "CannotInput" => Ok(InfectionKind::CannotInput),
            "StrongImpulses" => Ok(InfectionKind::StrongImpulses),
            other => Err(format!("unknown infection kind {other:?}")),
        }
    }
}

/// Infection state of an entity
///
/// States: uninfected (`NoInfection`), infected permanently
/// (`temporary == false`) or infected temporarily with `remaining_time`
/// seconds left. Carriers transmit their infection on contact and are never
/// affected by it themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InfectionComponent {
    /// Current effect
    pub kind: InfectionKind,

    /// Whether the effect wears off
    pub temporary: bool,

    /// Transmits `kind` to uninfected hosts instead of suffering it
    pub carrier: bool,

    /// Time a host infected by this carrier stays infected
    pub duration: f32,

    /// Seconds left before a temporary infection wears off
    pub remaining_time: f32,
}

impl InfectionComponent {
    /// Healthy host that can be infected
    pub fn healthy() -> Self {
        Self::default()
    }

    /// Permanent infection
    pub fn permanent(kind: InfectionKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Infection that wears off after `time` seconds
    pub fn temporary(kind: InfectionKind, time: f32) -> Self {
        Self {
            kind,
            temporary: true,
            carrier: false,
            duration: time.max(0.0),
            remaining_time: time.max(0.0),
        }
    }

    /// Carrier that gives hosts a temporary infection of `duration` seconds
    pub fn carrier(kind: InfectionKind, duration: f32) -> Self {
        Self {
            kind,
            temporary: true,
            carrier: true,
            duration: duration.max(0.0),
            remaining_time: 0.0,
        }
    }

    /// Whether an effect is active
    pub fn is_infected(&self) -> bool {
        self.kind != InfectionKind::NoInfection
    }

    /// Whether steering must be ignored for this entity
    pub fn blocks_input(&self) -> bool {
        !self.carrier && self.kind == InfectionKind::CannotInput
    }

    /// Whether this host can catch an infection from a carrier
    pub fn is_susceptible(&self) -> bool {
        !self.carrier && !self.is_infected()
    }

    /// Take the infection transmitted by `carrier`
    pub fn infect_from(&mut self, carrier: &InfectionComponent) {
        self.kind = carrier.kind;
        self.temporary = carrier.temporary;
        self.duration = carrier.duration;
        self.remaining_time = carrier.duration;
    }

    /// Advance the decay timer.
    ///
    /// Returns true on the frame a temporary infection wears off.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        if !self.temporary || self.carrier {
            return false;
        }

        self.remaining_time -= delta_time;
        if self.remaining_time <= 0.0 {
            self.remaining_time = 0.0;
            self.kind = InfectionKind::NoInfection;
            self.temporary = false;
            return true;
        }
        false
    }
}
