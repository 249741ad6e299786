//! Component kinds and the component sum type
//!
//! Every component record is a variant of [`Component`]. Typed access goes
//! through [`ComponentData`], whose accessors are exhaustive matches, so a
//! record can never be read as the wrong kind.

use crate::ecs::components::{
    AiComponent, CameraComponent, CameraFollowComponent, ColliderComponent, CombatComponent,
    EatableComponent, GrowthComponent, InfectionComponent, ParticleComponent, PlayerComponent,
    ReproductionComponent, SlowingComponent, SpriteComponent,
};
use std::fmt;

/// A concrete component record type
pub trait ComponentData: Sized + Into<Component> {
    /// Kind tag of this record type
    const KIND: ComponentKind;

    /// Borrow the record if `component` is of this kind
    fn from_component(component: &Component) -> Option<&Self>;

    /// Mutably borrow the record if `component` is of this kind
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! components {
    ($($variant:ident => $record:ty, $name:literal;)*) => {
        /// Kind tag identifying a component record type
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ComponentKind {
            $(
                #[doc = concat!("Tag of [`", stringify!($record), "`]")]
                $variant,
            )*
        }

        impl ComponentKind {
            /// Every kind, in declaration order
            pub const ALL: &'static [ComponentKind] = &[$(ComponentKind::$variant,)*];

            /// Human readable name used in logs
            pub fn name(self) -> &'static str {
                match self {
                    $(ComponentKind::$variant => $name,)*
                }
            }
        }

        /// A component record tagged by its kind
        #[derive(Debug, Clone, PartialEq)]
        pub enum Component {
            $(
                #[doc = concat!("A [`", stringify!($record), "`]")]
                $variant($record),
            )*
        }

        impl Component {
            /// Kind of this record; fixed at construction
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $(Component::$variant(_) => ComponentKind::$variant,)*
                }
            }
        }

        $(
            impl From<$record> for Component {
                fn from(record: $record) -> Self {
                    Component::$variant(record)
                }
            }

            impl ComponentData for $record {
                const KIND: ComponentKind = ComponentKind::$variant;

                #[allow(unreachable_patterns)]
                fn from_component(component: &Component) -> Option<&Self> {
                    match component {
                        Component::$variant(record) => Some(record),
                        _ => None,
                    }
                }

                #[allow(unreachable_patterns)]
                fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                    match component {
                        Component::$variant(record) => Some(record),
                        _ => None,
                    }
                }
            }
        )*
    };
}

components! {
    Particle => ParticleComponent, "ParticleComponent";
    Collider => ColliderComponent, "ColliderComponent";
    Growth => GrowthComponent, "GrowthComponent";
    Eatable => EatableComponent, "EatableComponent";
    Infection => InfectionComponent, "InfectionComponent";
    Combat => CombatComponent, "CombatComponent";
    Reproduction => ReproductionComponent, "ReproductionComponent";
    Sprite => SpriteComponent, "SpriteComponent";
    Camera => CameraComponent, "CameraComponent";
    CameraFollow => CameraFollowComponent, "CameraFollowComponent";
    Player => PlayerComponent, "PlayerComponent";
    Ai => AiComponent, "AiComponent";
    Slowing => SlowingComponent, "SlowingComponent";
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
