use aqua2d::{Boundary, FluidPlugin, FluidState, ForceZone, SimParams};
use bevy::prelude::*;
use rand::Rng;

const BLOBS_X: usize = 18;
const BLOBS_Y: usize = 14;
const BLOB_SPACING: f32 = 0.35;
const PIXELS_PER_UNIT: f32 = 40.0;

#[derive(Component)]
struct ParticleVisual {
    index: usize,
}

fn world_position(position: Vec2) -> Vec3 {
    Vec3::new(position.x * PIXELS_PER_UNIT, position.y * PIXELS_PER_UNIT, 0.0)
}

/// Jittered blob grid, the initial layout the display hands to the core.
fn initial_layout() -> Vec<Vec2> {
    let mut rand = rand::rng();
    let mut layout = Vec::with_capacity(BLOBS_X * BLOBS_Y);
    for i in 0..BLOBS_X {
        for j in 0..BLOBS_Y {
            layout.push(Vec2::new(
                (i as f32 - BLOBS_X as f32 / 2.0) * BLOB_SPACING
                    + rand.random::<f32>() * BLOB_SPACING / 2.0,
                j as f32 * BLOB_SPACING + 2.0,
            ));
        }
    }
    layout
}

fn init(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2d);

    // An open vessel with a ledge, plus the fan blowing spill-over to the
    // right along the floor.
    let vessel = Boundary::new(vec![
        Vec2::new(-6.0, 6.0),
        Vec2::new(-6.0, 0.5),
        Vec2::new(6.0, 0.5),
        Vec2::new(6.0, 6.0),
    ]);
    let ledge = Boundary::new(vec![Vec2::new(6.0, 2.5), Vec2::new(10.0, 2.0)]);
    let fan = ForceZone::new(Vec2::new(6.0, 0.0), Vec2::new(14.0, 2.0), Vec2::new(1.0, 0.0));

    let layout = initial_layout();
    let circle = meshes.add(Circle::new(0.16 * PIXELS_PER_UNIT));
    let water = materials.add(Color::hsl(205.0, 0.9, 0.55));

    for (index, &position) in layout.iter().enumerate() {
        commands.spawn((
            ParticleVisual { index },
            Mesh2d(circle.clone()),
            MeshMaterial2d(water.clone()),
            Transform::from_translation(world_position(position)),
        ));
    }

    let params = SimParams::default()
        .with_pressure(0.8, 1.6, 3.5)
        .with_domain(Vec2::new(16.0, 9.0));
    commands.insert_resource(FluidState::new(
        params,
        &layout,
        vec![vessel, ledge],
        vec![fan],
    ));
}

fn sync_particle_transforms(
    state: Res<FluidState>,
    query: Query<(&mut Transform, &ParticleVisual)>,
) {
    let positions = state.positions();
    for (mut transform, visual) in query {
        if let Some(&position) = positions.get(visual.index) {
            transform.translation = world_position(position);
        }
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(FluidPlugin)
        .add_systems(Startup, init)
        .add_systems(Update, sync_particle_transforms)
        .run();
}
