//! Growth, food and reproduction components

/// Lets an entity eat [`EatableComponent`] entities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthComponent {
    /// Number of successful meals not yet spent on reproduction
    pub power: u32,
}

impl GrowthComponent {
    /// Create with an initial power
    pub fn new(power: u32) -> Self {
        Self { power }
    }
}

/// Marks an entity as food for [`GrowthComponent`] entities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EatableComponent;

/// Lets a growing entity split off offspring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReproductionComponent {
    /// How many more times this entity may reproduce
    pub remaining: u32,

    /// Set once the entity has reproduced at least once
    pub reproduced: bool,
}

impl ReproductionComponent {
    /// Allow `times` reproductions
    pub fn new(times: u32) -> Self {
        Self {
            remaining: times,
            reproduced: false,
        }
    }
}
