//! Combat strength component

/// Strength used by AI to decide whom to chase and whom to flee
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatComponent {
    /// Strength without growth bonus
    pub base_power: u32,

    /// Effective strength, recomputed every frame
    pub power: u32,
}

impl CombatComponent {
    /// Create with a base power; effective power starts equal to it
    pub fn new(base_power: u32) -> Self {
        Self {
            base_power,
            power: base_power,
        }
    }
}
