//! Circle collision detection and resolution
//!
//! Every frame the system takes a snapshot of the collidable entities and
//! tests all unordered pairs. A colliding pair is resolved by the first rule
//! that applies:
//!
//! 1. Eating: a growing entity touching an eatable one gains one power and
//!    the eatable entity is deleted.
//! 2. Areas: a body overlapping a [`SlowingComponent`] area has its velocity
//!    scaled by the area factor.
//! 3. Separation: equal and opposite forces plus an immediate positional
//!    correction of half the overlap each. Before separating, a carrier
//!    transmits its infection to a healthy host.
//!
//! Pairs are resolved one at a time in snapshot order, so with three or more
//! overlapping bodies later pairs see the corrections of earlier ones.

use super::replace_primary_sprite;
use crate::config::{ConfigError, ConfigTable};
use crate::ecs::components::{
    ColliderComponent, EatableComponent, GrowthComponent, InfectionComponent, ParticleComponent,
    SlowingComponent, SpriteComponent,
};
use crate::ecs::{ComponentKind, Entity, EntityManager, System, SystemContext};
use crate::physics::{Circle, Contact};

/// Magnitude of the separation force when none is configured
pub const DEFAULT_SEPARATION_FORCE: f32 = 100.0;

/// O(n²) pairwise collision system
#[derive(Debug, Clone)]
pub struct CollisionSystem {
    separation_force: f32,
    infected_sprite: Option<SpriteComponent>,
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATION_FORCE)
    }
}

impl CollisionSystem {
    /// Name the engine registers this system under
    pub const NAME: &'static str = "CollisionSystem";

    /// Create a system pushing colliding bodies apart with `separation_force`
    pub fn new(separation_force: f32) -> Self {
        Self {
            separation_force,
            infected_sprite: None,
        }
    }

    /// Build from `COLLISION_FORCE` and, if present, `INFECTED_CELL_IMAGE`
    pub fn from_config(config: &ConfigTable) -> Result<Self, ConfigError> {
        let mut system = Self::new(config.get_f32_or("COLLISION_FORCE", DEFAULT_SEPARATION_FORCE)?);
        if config.contains("INFECTED_CELL_IMAGE") {
            let sprite = SpriteComponent::new(config.get_path("INFECTED_CELL_IMAGE")?)
                .with_scale(config.get_f32_or("CELL_IMAGE_SCALE", 1.0)?);
            system = system.with_infected_sprite(sprite);
        }
        Ok(system)
    }

    /// Sprite a host shows once a carrier infects it (builder)
    pub fn with_infected_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.infected_sprite = Some(sprite);
        self
    }

    /// Configured separation force magnitude
    pub fn separation_force(&self) -> f32 {
        self.separation_force
    }

    /// Whether the two entities currently overlap.
    ///
    /// Entities lacking a particle or a collider never collide.
    pub fn is_colliding(entities: &EntityManager, a: Entity, b: Entity) -> bool {
        contact(entities, a, b).is_some()
    }

    /// Resolve one pair if it collides.
    ///
    /// Returns the entity deleted by eating, if any. Callers holding a
    /// snapshot must drop it from their list.
    pub fn resolve_pair(
        &self,
        entities: &mut EntityManager,
        a: Entity,
        b: Entity,
    ) -> Option<Entity> {
        let contact = contact(entities, a, b)?;

        if let Some((eater, prey)) = eat_order(entities, a, b) {
            eat(entities, eater, prey);
            return Some(prey);
        }

        if apply_area(entities, a, b) {
            return None;
        }

        self.transmit_infection(entities, a, b);
        self.transmit_infection(entities, b, a);
        self.separate(entities, a, b, contact);
        None
    }

    fn transmit_infection(&self, entities: &mut EntityManager, carrier: Entity, host: Entity) {
        let Some(source) = entities.get::<InfectionComponent>(carrier).copied() else {
            return;
        };
        if !source.carrier || !source.is_infected() {
            return;
        }
        let Some(target) = entities.get_mut::<InfectionComponent>(host) else {
            return;
        };
        if !target.is_susceptible() {
            return;
        }

        target.infect_from(&source);
        log::debug!("Entity {} infected entity {} with {}", carrier, host, source.kind);

        if let Some(sprite) = &self.infected_sprite {
            replace_primary_sprite(entities, host, sprite.clone());
        }
    }

    fn separate(&self, entities: &mut EntityManager, a: Entity, b: Entity, contact: Contact) {
        log::trace!("Colliding entities {} and {}", a, b);

        let force = contact.normal * self.separation_force;

        // Immovable bodies hand their share of the correction to the other side
        let (share_a, share_b) = match (immovable(entities, a), immovable(entities, b)) {
            (false, false) => (0.5, 0.5),
            (true, false) => (0.0, 1.0),
            (false, true) => (1.0, 0.0),
            (true, true) => (0.0, 0.0),
        };

        if let Some(particle) = entities.get_mut::<ParticleComponent>(a) {
            particle.add_force(-force);
            particle.position -= contact.normal * (contact.depth * share_a);
        }
        if let Some(particle) = entities.get_mut::<ParticleComponent>(b) {
            particle.add_force(force);
            particle.position += contact.normal * (contact.depth * share_b);
        }
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        let mut colliders = ctx.entities.entities_with(ComponentKind::Collider);
        if colliders.len() < 2 {
            return;
        }

        let mut i = 0;
        'outer: while i < colliders.len() {
            let mut j = i + 1;
            while j < colliders.len() {
                if let Some(eaten) = self.resolve_pair(ctx.entities, colliders[i], colliders[j]) {
                    if eaten == colliders[i] {
                        // The next entity slid into slot i; restart its row.
                        colliders.remove(i);
                        continue 'outer;
                    }
                    colliders.remove(j);
                    continue;
                }
                j += 1;
            }
            i += 1;
        }
    }
}

fn circle(entities: &EntityManager, entity: Entity) -> Option<Circle> {
    let particle = entities.get::<ParticleComponent>(entity)?;
    let collider = entities.get::<ColliderComponent>(entity)?;
    Some(Circle::new(particle.position, collider.radius))
}

fn immovable(entities: &EntityManager, entity: Entity) -> bool {
    entities
        .get::<ParticleComponent>(entity)
        .map_or(true, ParticleComponent::is_immovable)
}

fn contact(entities: &EntityManager, a: Entity, b: Entity) -> Option<Contact> {
    circle(entities, a)?.contact(&circle(entities, b)?)
}

fn eat_order(entities: &EntityManager, a: Entity, b: Entity) -> Option<(Entity, Entity)> {
    if entities.has::<GrowthComponent>(a) && entities.has::<EatableComponent>(b) {
        Some((a, b))
    } else if entities.has::<GrowthComponent>(b) && entities.has::<EatableComponent>(a) {
        Some((b, a))
    } else {
        None
    }
}

fn eat(entities: &mut EntityManager, eater: Entity, prey: Entity) {
    if let Some(growth) = entities.get_mut::<GrowthComponent>(eater) {
        growth.power += 1;
    }
    entities.delete_entity(prey);
    log::debug!("Entity {} ate entity {}", eater, prey);
}

/// Scale the velocity of a body inside an area. Returns true if either side is an area.
fn apply_area(entities: &mut EntityManager, a: Entity, b: Entity) -> bool {
    let area_a = entities.get::<SlowingComponent>(a).copied();
    let area_b = entities.get::<SlowingComponent>(b).copied();

    let (body, area) = match (area_a, area_b) {
        (None, None) => return false,
        (Some(_), Some(_)) => return true,
        (Some(area), None) => (b, area),
        (None, Some(area)) => (a, area),
    };

    if let Some(particle) = entities.get_mut::<ParticleComponent>(body) {
        particle.velocity *= area.factor;
    }
    true
}
