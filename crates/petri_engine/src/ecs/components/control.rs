//! Markers selecting who steers an entity

/// Entity steered by player input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerComponent;

/// Entity steered by the AI system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AiComponent;
