//! Physics systems
//!
//! Registration order within a phase is load-bearing: transforms propagate
//! down the hierarchy first, then colliders sync to their transforms, then
//! the narrow phase runs over the fresh world-space vertices. Integration
//! and gravity live in FixedUpdate and are driven by the host's
//! fixed-timestep accumulator.

use glam::Vec2;
use pivot_core::{Color, DebugDraw, Transform2};
use pivot_ecs::{hierarchy, EcsError, Entity, Parent, Phase, Registry};

use crate::collider::{Collider, CollisionEvent, CollisionListener};
use crate::layers::LayerTable;
use crate::rigidbody::RigidBody;
use crate::sat::{polygon_overlap, Contact};
use crate::PhysicsConfig;

/// Register the physics components and systems on a registry.
///
/// Idempotent on the component side; calling it twice would double-register
/// the systems, so call it once per registry. Installs a default
/// [`PhysicsConfig`] resource when none exists. No [`LayerTable`] is
/// installed: with no table configured, every collider pair is tested.
pub fn register(reg: &mut Registry) -> Result<(), EcsError> {
    reg.register::<Transform2>("Transform2")?;
    reg.register::<Collider>("Collider")?;
    reg.register::<RigidBody>("RigidBody")?;
    reg.register::<CollisionListener>("CollisionListener")?;
    hierarchy::register(reg)?;

    if !reg.has_resource::<PhysicsConfig>() {
        reg.insert_resource(PhysicsConfig::default());
    }

    let roots = reg.signature(&["Transform2", "Children"])?;
    let collidable = reg.signature(&["Transform2", "Collider"])?;
    let bodies = reg.signature(&["RigidBody"])?;
    let movable = reg.signature(&["Transform2", "RigidBody"])?;

    reg.add_system(propagate_transforms, Phase::Update, roots);
    reg.add_system(sync_colliders, Phase::Update, collidable);
    reg.add_system(collide, Phase::Update, collidable);
    reg.add_system(apply_gravity, Phase::FixedUpdate, bodies);
    reg.add_system(integrate, Phase::FixedUpdate, movable);

    tracing::debug!("physics components and systems registered");
    Ok(())
}

/// Compose world transforms down the hierarchy, parent before child.
///
/// Runs once per root (entities with children but no parent); nested
/// subtrees are handled by the recursion, so multi-level chains compose in
/// a single pass.
fn propagate_transforms(reg: &mut Registry, entity: Entity) {
    if reg.has::<Parent>(entity) {
        return;
    }
    propagate_children(reg, entity);
}

fn propagate_children(reg: &mut Registry, parent: Entity) {
    let Some(pt) = reg.get::<Transform2>(parent).copied() else {
        return;
    };
    for child in hierarchy::children_of(reg, parent) {
        if let Some(ct) = reg.get_mut::<Transform2>(child) {
            ct.position = pt.position + ct.local_position;
            ct.scale = pt.scale * ct.local_scale;
            ct.rotation = pt.rotation + ct.local_rotation;
        }
        propagate_children(reg, child);
    }
}

/// Rebuild world-space collider vertices from the entity's transform and
/// reset the per-frame overlap flag.
fn sync_colliders(reg: &mut Registry, entity: Entity) {
    let Some(t) = reg.get::<Transform2>(entity).copied() else {
        return;
    };
    let Some(c) = reg.get_mut::<Collider>(entity) else {
        return;
    };
    let (sin, cos) = (t.rotation + c.rotation).sin_cos();
    let translation = t.position + c.offset;
    c.world.resize(c.model.len(), Vec2::ZERO);
    for i in 0..c.model.len() {
        let m = c.model[i];
        c.world[i] = Vec2::new(m.x * cos - m.y * sin, m.x * sin + m.y * cos) + translation;
    }
    c.overlap = false;
}

/// Narrow phase over all unordered pairs: each entity tests against every
/// higher-id entity, so each pair runs exactly once per frame.
fn collide(reg: &mut Registry, entity: Entity) {
    for other in reg.entities() {
        if other <= entity {
            continue;
        }
        // a listener may have despawned or stripped us mid-loop
        let (Some(ta), Some(ca)) = (reg.get::<Transform2>(entity), reg.get::<Collider>(entity))
        else {
            return;
        };
        let (Some(tb), Some(cb)) = (reg.get::<Transform2>(other), reg.get::<Collider>(other))
        else {
            continue;
        };

        if let Some(table) = reg.resource::<LayerTable>() {
            if !table.can_collide(ca.layer, cb.layer) {
                continue;
            }
        }

        let a_center = ta.position;
        let b_center = tb.position;
        let both_solid = ca.solid && cb.solid;
        let Some(contact) = polygon_overlap(&ca.world, a_center, &cb.world, b_center) else {
            continue;
        };

        if let Some(c) = reg.get_mut::<Collider>(entity) {
            c.overlap = true;
        }
        if let Some(c) = reg.get_mut::<Collider>(other) {
            c.overlap = true;
        }

        if both_solid {
            resolve(reg, entity, other, contact);
        }

        // each side perceives the normal pointing away from itself
        let listener_a = reg.get::<CollisionListener>(entity).copied();
        let listener_b = reg.get::<CollisionListener>(other).copied();
        if let Some(listener) = listener_a {
            (listener.on_collision)(
                reg,
                CollisionEvent {
                    entity,
                    other,
                    normal: contact.normal,
                    depth: contact.depth,
                },
            );
        }
        if let Some(listener) = listener_b {
            (listener.on_collision)(
                reg,
                CollisionEvent {
                    entity: other,
                    other: entity,
                    normal: -contact.normal,
                    depth: contact.depth,
                },
            );
        }
    }
}

/// Split the penetration between the two bodies by inverse mass, then kill
/// the approaching velocity with a restitution-free impulse.
fn resolve(reg: &mut Registry, a: Entity, b: Entity, contact: Contact) {
    let inv_a = reg.get::<RigidBody>(a).map_or(0.0, |rb| rb.inv_mass);
    let inv_b = reg.get::<RigidBody>(b).map_or(0.0, |rb| rb.inv_mass);
    let total = inv_a + inv_b;
    if total == 0.0 {
        return;
    }

    let correction = contact.normal * contact.depth;
    if inv_a > 0.0 {
        if let Some(t) = reg.get_mut::<Transform2>(a) {
            t.position -= correction * (inv_a / total);
        }
    }
    if inv_b > 0.0 {
        if let Some(t) = reg.get_mut::<Transform2>(b) {
            t.position += correction * (inv_b / total);
        }
    }

    let va = reg.get::<RigidBody>(a).map_or(Vec2::ZERO, |rb| rb.velocity);
    let vb = reg.get::<RigidBody>(b).map_or(Vec2::ZERO, |rb| rb.velocity);
    let approach = (vb - va).dot(contact.normal);
    if approach > 0.0 {
        // already separating
        return;
    }
    let magnitude = -approach / total;
    if let Some(rb) = reg.get_mut::<RigidBody>(a) {
        let inv = rb.inv_mass;
        rb.velocity -= contact.normal * (magnitude * inv);
    }
    if let Some(rb) = reg.get_mut::<RigidBody>(b) {
        let inv = rb.inv_mass;
        rb.velocity += contact.normal * (magnitude * inv);
    }
}

/// Weigh down dynamic bodies with gravity enabled.
fn apply_gravity(reg: &mut Registry, entity: Entity) {
    let gravity = reg
        .resource::<PhysicsConfig>()
        .map_or_else(|| PhysicsConfig::default().gravity, |c| c.gravity);
    let Some(rb) = reg.get_mut::<RigidBody>(entity) else {
        return;
    };
    if rb.is_dynamic() && rb.gravity {
        let weight = gravity * rb.mass;
        rb.apply_force(weight);
    }
}

/// Semi-implicit Euler step for dynamic bodies. The acceleration
/// accumulator is consumed and cleared, so forces are per-tick.
fn integrate(reg: &mut Registry, entity: Entity) {
    let dt = reg
        .resource::<PhysicsConfig>()
        .map_or(1.0 / 60.0, |c| c.fixed_timestep);
    let velocity = {
        let Some(rb) = reg.get_mut::<RigidBody>(entity) else {
            return;
        };
        if !rb.is_dynamic() {
            return;
        }
        rb.velocity += rb.acceleration * dt;
        rb.acceleration = Vec2::ZERO;
        rb.velocity
    };
    if let Some(t) = reg.get_mut::<Transform2>(entity) {
        t.position += velocity * dt;
    }
    if let Some(rb) = reg.get_mut::<RigidBody>(entity) {
        rb.apply_damping(dt);
    }
}

/// Draw every visible collider's outline through the debug-draw
/// collaborator, tinted by its overlap state.
pub fn debug_draw_colliders(reg: &Registry, draw: &mut dyn DebugDraw) {
    for entity in reg.entities() {
        if !reg.is_visible(entity) {
            continue;
        }
        let Some(collider) = reg.get::<Collider>(entity) else {
            continue;
        };
        let color = if collider.overlap { Color::RED } else { Color::SKY };
        for i in 0..collider.world.len() {
            let from = collider.world[i];
            let to = collider.world[(i + 1) % collider.world.len()];
            draw.line(from, to, 2.0, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_core::draw::RecordingDraw;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Default)]
    struct Hits(Vec<CollisionEvent>);

    fn on_hit(reg: &mut Registry, event: CollisionEvent) {
        reg.resource_mut::<Hits>().unwrap().0.push(event);
    }

    fn world() -> Registry {
        let mut reg = Registry::new();
        register(&mut reg).unwrap();
        reg.insert_resource(Hits::default());
        reg
    }

    fn square_at(reg: &mut Registry, x: f32, y: f32, side: f32) -> Entity {
        let h = side / 2.0;
        let e = reg.spawn().unwrap();
        reg.insert(e, Transform2::from_xy(x, y)).unwrap();
        reg.insert(
            e,
            Collider::polygon(vec![
                Vec2::new(-h, -h),
                Vec2::new(h, -h),
                Vec2::new(h, h),
                Vec2::new(-h, h),
            ]),
        )
        .unwrap();
        e
    }

    #[test]
    fn collider_sync_applies_rotation_and_offset() {
        let mut reg = world();
        let e = reg.spawn().unwrap();
        reg.insert(
            e,
            Transform2::from_xy(3.0, 4.0).with_rotation(std::f32::consts::FRAC_PI_2),
        )
        .unwrap();
        reg.insert(
            e,
            Collider::polygon(vec![
                Vec2::new(1.0, 0.0),
                Vec2::new(-1.0, 1.0),
                Vec2::new(-1.0, -1.0),
            ])
            .with_offset(Vec2::new(0.5, 0.0)),
        )
        .unwrap();

        reg.run_phase(Phase::Update);

        let collider = reg.get::<Collider>(e).unwrap();
        // (1, 0) rotated 90 degrees is (0, 1), plus position and offset
        let expected = Vec2::new(3.5, 5.0);
        assert!((collider.world[0] - expected).length() < 1e-5);
        assert!(!collider.overlap);
    }

    #[test]
    fn overlap_flags_and_events_fire_for_both_sides() {
        let mut reg = world();
        let a = square_at(&mut reg, 0.0, 0.0, 10.0);
        let b = square_at(&mut reg, 5.0, 0.0, 10.0);
        reg.insert(a, CollisionListener::new(on_hit)).unwrap();
        reg.insert(b, CollisionListener::new(on_hit)).unwrap();

        reg.run_phase(Phase::Update);

        assert!(reg.get::<Collider>(a).unwrap().overlap);
        assert!(reg.get::<Collider>(b).unwrap().overlap);

        let hits = &reg.resource::<Hits>().unwrap().0;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, a);
        assert_eq!(hits[0].other, b);
        assert!((hits[0].depth - 5.0).abs() < 1e-4);
        // mirrored normals
        assert!((hits[0].normal + hits[1].normal).length() < 1e-5);
        assert!((hits[0].normal.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn distant_colliders_do_not_interact() {
        let mut reg = world();
        let a = square_at(&mut reg, 0.0, 0.0, 10.0);
        let b = square_at(&mut reg, 20.0, 0.0, 10.0);
        reg.insert(a, CollisionListener::new(on_hit)).unwrap();

        reg.run_phase(Phase::Update);

        assert!(!reg.get::<Collider>(a).unwrap().overlap);
        assert!(!reg.get::<Collider>(b).unwrap().overlap);
        assert!(reg.resource::<Hits>().unwrap().0.is_empty());
    }

    #[test]
    fn dynamic_takes_full_correction_against_static() {
        let mut reg = world();
        let mover = square_at(&mut reg, 0.0, 0.0, 10.0);
        let wall = square_at(&mut reg, 5.0, 0.0, 10.0);
        reg.insert(mover, RigidBody::dynamic(1.0)).unwrap();
        reg.insert(wall, RigidBody::fixed()).unwrap();

        reg.run_phase(Phase::Update);

        let mover_pos = reg.get::<Transform2>(mover).unwrap().position;
        let wall_pos = reg.get::<Transform2>(wall).unwrap().position;
        assert!((mover_pos.x - -5.0).abs() < 1e-4, "mover pushed out fully");
        assert_eq!(wall_pos, Vec2::new(5.0, 0.0), "static never moves");
    }

    #[test]
    fn equal_masses_split_the_correction() {
        let mut reg = world();
        let a = square_at(&mut reg, 0.0, 0.0, 10.0);
        let b = square_at(&mut reg, 6.0, 0.0, 10.0);
        reg.insert(a, RigidBody::dynamic(2.0)).unwrap();
        reg.insert(b, RigidBody::dynamic(2.0)).unwrap();

        reg.run_phase(Phase::Update);

        // depth 4, split half and half
        let ax = reg.get::<Transform2>(a).unwrap().position.x;
        let bx = reg.get::<Transform2>(b).unwrap().position.x;
        assert!((ax - -2.0).abs() < 1e-4);
        assert!((bx - 8.0).abs() < 1e-4);
    }

    #[test]
    fn impulse_cancels_approach_velocity() {
        let mut reg = world();
        let mover = square_at(&mut reg, 0.0, 0.0, 10.0);
        let wall = square_at(&mut reg, 5.0, 0.0, 10.0);
        reg.insert(mover, RigidBody::dynamic(1.0)).unwrap();
        reg.insert(wall, RigidBody::fixed()).unwrap();
        reg.get_mut::<RigidBody>(mover).unwrap().velocity = Vec2::new(3.0, 0.0);

        reg.run_phase(Phase::Update);

        // perfectly inelastic: the approach component is removed, not reversed
        let velocity = reg.get::<RigidBody>(mover).unwrap().velocity;
        assert!(velocity.x.abs() < 1e-4);
    }

    #[test]
    fn separating_bodies_keep_their_velocity() {
        let mut reg = world();
        let mover = square_at(&mut reg, 0.0, 0.0, 10.0);
        let wall = square_at(&mut reg, 5.0, 0.0, 10.0);
        reg.insert(mover, RigidBody::dynamic(1.0)).unwrap();
        reg.insert(wall, RigidBody::fixed()).unwrap();
        reg.get_mut::<RigidBody>(mover).unwrap().velocity = Vec2::new(-3.0, 0.0);

        reg.run_phase(Phase::Update);

        let velocity = reg.get::<RigidBody>(mover).unwrap().velocity;
        assert!((velocity.x - -3.0).abs() < 1e-4);
    }

    #[test]
    fn triggers_report_but_never_resolve() {
        let mut reg = world();
        let sensor = square_at(&mut reg, 0.0, 0.0, 10.0);
        let body = square_at(&mut reg, 5.0, 0.0, 10.0);
        reg.get_mut::<Collider>(sensor).unwrap().solid = false;
        reg.insert(body, RigidBody::dynamic(1.0)).unwrap();
        reg.insert(sensor, CollisionListener::new(on_hit)).unwrap();

        reg.run_phase(Phase::Update);

        assert!(reg.get::<Collider>(sensor).unwrap().overlap);
        assert_eq!(reg.resource::<Hits>().unwrap().0.len(), 1);
        // no displacement happened
        assert_eq!(reg.get::<Transform2>(body).unwrap().position, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn disabled_layers_suppress_the_pair() {
        let mut reg = world();
        let mut table = LayerTable::new();
        let ground = table.add_layer("ground");
        let ghost = table.add_layer("ghost");
        table.disable(ground, ghost);
        reg.insert_resource(table);

        let a = square_at(&mut reg, 0.0, 0.0, 10.0);
        let b = square_at(&mut reg, 5.0, 0.0, 10.0);
        reg.get_mut::<Collider>(a).unwrap().layer = ground;
        reg.get_mut::<Collider>(b).unwrap().layer = ghost;
        reg.insert(a, CollisionListener::new(on_hit)).unwrap();

        reg.run_phase(Phase::Update);
        assert!(!reg.get::<Collider>(a).unwrap().overlap);
        assert!(reg.resource::<Hits>().unwrap().0.is_empty());

        // same shapes on the same layer do collide
        reg.get_mut::<Collider>(b).unwrap().layer = ground;
        reg.run_phase(Phase::Update);
        assert!(reg.get::<Collider>(a).unwrap().overlap);
        assert_eq!(reg.resource::<Hits>().unwrap().0.len(), 1);
    }

    #[test]
    fn integration_matches_closed_form() {
        let mut reg = world();
        let e = reg.spawn().unwrap();
        reg.insert(e, Transform2::default()).unwrap();
        reg.insert(e, RigidBody::dynamic(2.0).with_gravity(false)).unwrap();

        let force = Vec2::new(10.0, 0.0);
        let ticks = 10;
        for _ in 0..ticks {
            reg.get_mut::<RigidBody>(e).unwrap().apply_force(force);
            reg.run_phase(Phase::FixedUpdate);
        }

        let expected_v = force.x / 2.0 * ticks as f32 * DT;
        let velocity = reg.get::<RigidBody>(e).unwrap().velocity;
        assert!((velocity.x - expected_v).abs() < 1e-4);

        // closed-form semi-implicit Euler position
        let mut v = 0.0f32;
        let mut x = 0.0f32;
        for _ in 0..ticks {
            v += force.x / 2.0 * DT;
            x += v * DT;
        }
        let position = reg.get::<Transform2>(e).unwrap().position;
        assert!((position.x - x).abs() < 1e-4);
    }

    #[test]
    fn gravity_only_pulls_dynamic_bodies() {
        let mut reg = world();
        let falling = reg.spawn().unwrap();
        reg.insert(falling, Transform2::default()).unwrap();
        reg.insert(falling, RigidBody::dynamic(3.0)).unwrap();

        let anchored = reg.spawn().unwrap();
        reg.insert(anchored, Transform2::default()).unwrap();
        reg.insert(anchored, RigidBody::fixed()).unwrap();

        let floating = reg.spawn().unwrap();
        reg.insert(floating, Transform2::default()).unwrap();
        reg.insert(floating, RigidBody::dynamic(3.0).with_gravity(false)).unwrap();

        reg.run_phase(Phase::FixedUpdate);

        let g = reg.resource::<PhysicsConfig>().unwrap().gravity.y;
        let vy = reg.get::<RigidBody>(falling).unwrap().velocity.y;
        assert!((vy - g * DT).abs() < 1e-5, "mass cancels out of gravity");
        assert_eq!(reg.get::<RigidBody>(anchored).unwrap().velocity, Vec2::ZERO);
        assert_eq!(reg.get::<RigidBody>(floating).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn inactive_entities_are_skipped_by_physics() {
        let mut reg = world();
        let a = square_at(&mut reg, 0.0, 0.0, 10.0);
        let b = square_at(&mut reg, 5.0, 0.0, 10.0);
        reg.set_active(a, false);

        reg.run_phase(Phase::Update);

        // a's collide pass never ran; b tested only higher ids
        assert!(!reg.get::<Collider>(b).unwrap().overlap);
    }

    #[test]
    fn hierarchy_transforms_compose_over_two_levels() {
        let mut reg = world();
        let root = reg.spawn().unwrap();
        let child = reg.spawn().unwrap();
        let leaf = reg.spawn().unwrap();
        reg.insert(root, Transform2::from_xy(10.0, 0.0)).unwrap();
        reg.insert(
            child,
            Transform2::default().with_local(Vec2::new(0.0, 5.0), Vec2::new(2.0, 2.0), 0.0),
        )
        .unwrap();
        reg.insert(
            leaf,
            Transform2::default().with_local(Vec2::new(1.0, 0.0), Vec2::ONE, 0.0),
        )
        .unwrap();
        hierarchy::attach(&mut reg, root, child).unwrap();
        hierarchy::attach(&mut reg, child, leaf).unwrap();

        reg.run_phase(Phase::Update);

        let child_t = reg.get::<Transform2>(child).unwrap();
        assert_eq!(child_t.position, Vec2::new(10.0, 5.0));
        assert_eq!(child_t.scale, Vec2::new(2.0, 2.0));

        let leaf_t = reg.get::<Transform2>(leaf).unwrap();
        assert_eq!(leaf_t.position, Vec2::new(11.0, 5.0));
        assert_eq!(leaf_t.scale, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn debug_draw_emits_one_segment_per_edge() {
        let mut reg = world();
        let visible = square_at(&mut reg, 0.0, 0.0, 2.0);
        let hidden = square_at(&mut reg, 20.0, 0.0, 2.0);
        reg.set_visible(hidden, false);
        reg.run_phase(Phase::Update);

        let mut draw = RecordingDraw::default();
        debug_draw_colliders(&reg, &mut draw);
        assert_eq!(draw.segments.len(), 4, "only the visible square draws");
        assert_eq!(draw.segments[0].2, Color::SKY);

        // overlapping colliders are tinted
        let _ = square_at(&mut reg, 0.5, 0.0, 2.0);
        reg.run_phase(Phase::Update);
        let mut draw = RecordingDraw::default();
        debug_draw_colliders(&reg, &mut draw);
        assert!(draw.segments.iter().any(|s| s.2 == Color::RED));
        assert!(reg.get::<Collider>(visible).unwrap().overlap);
    }
}
