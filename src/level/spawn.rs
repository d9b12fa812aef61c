//! Level domain: test room geometry, crates and the player.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::level::PlayerSpawn;
use crate::movement::{
    AnimationFlags, GameLayer, Ground, Player, PlayerBody, PlayerState, Pushable, Wall,
};

const CRATE_SIZE: f32 = 40.0;

/// Spawn the player at the configured spawn point.
pub(crate) fn spawn_player(mut commands: Commands, spawn: Res<PlayerSpawn>) {
    let body = PlayerBody::default();

    info!("Spawning player at {:?}", spawn.position);

    commands.spawn((
        // Identity & Movement
        (
            Player,
            PlayerState::spawn_at(spawn.position),
            body,
            AnimationFlags {
                facing_right: true,
                ..default()
            },
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(body.size),
            ..default()
        },
        Transform::from_translation(spawn.position.extend(0.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(body.size.x, body.size.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(1.0),
            Friction::new(0.0),
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Pushable],
            ),
        ),
    ));
}

#[derive(Clone, Copy)]
enum Surface {
    Ground,
    Wall,
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    // Floor
    spawn_solid(
        &mut commands,
        Surface::Ground,
        ground_color,
        Vec2::new(1200.0, 40.0),
        Vec2::new(0.0, -200.0),
    );

    // Outer walls, tall enough to slide down
    for x in [-620.0, 620.0] {
        spawn_solid(
            &mut commands,
            Surface::Wall,
            wall_color,
            Vec2::new(40.0, 700.0),
            Vec2::new(x, 130.0),
        );
    }

    // High ledge: dropping off it is a hard landing
    spawn_solid(
        &mut commands,
        Surface::Ground,
        platform_color,
        Vec2::new(160.0, 20.0),
        Vec2::new(-420.0, 160.0),
    );

    // Low platform
    spawn_solid(
        &mut commands,
        Surface::Ground,
        platform_color,
        Vec2::new(150.0, 20.0),
        Vec2::new(250.0, 0.0),
    );

    // Wall-jump shaft
    spawn_solid(
        &mut commands,
        Surface::Wall,
        wall_color,
        Vec2::new(30.0, 320.0),
        Vec2::new(-140.0, -20.0),
    );
    spawn_solid(
        &mut commands,
        Surface::Wall,
        wall_color,
        Vec2::new(30.0, 320.0),
        Vec2::new(-20.0, 60.0),
    );

    // Crates resting on the floor
    for x in [120.0, 380.0] {
        spawn_crate(&mut commands, Vec2::new(x, -180.0 + CRATE_SIZE * 0.5));
    }
}

fn spawn_solid(commands: &mut Commands, surface: Surface, color: Color, size: Vec2, at: Vec2) {
    let layer = match surface {
        Surface::Ground => GameLayer::Ground,
        Surface::Wall => GameLayer::Wall,
    };
    let mut entity = commands.spawn((
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(at.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(layer, [GameLayer::Player, GameLayer::Pushable]),
    ));
    match surface {
        Surface::Ground => entity.insert(Ground),
        Surface::Wall => entity.insert(Wall),
    };
}

fn spawn_crate(commands: &mut Commands, at: Vec2) {
    commands.spawn((
        Pushable,
        Sprite {
            color: Color::srgb(0.6, 0.45, 0.25),
            custom_size: Some(Vec2::splat(CRATE_SIZE)),
            ..default()
        },
        Transform::from_translation(at.extend(0.0)),
        RigidBody::Dynamic,
        Collider::rectangle(CRATE_SIZE, CRATE_SIZE),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::default(),
        Friction::new(0.6),
        CollisionLayers::new(
            GameLayer::Pushable,
            [
                GameLayer::Ground,
                GameLayer::Wall,
                GameLayer::Player,
                GameLayer::Pushable,
            ],
        ),
    ));
}
