//! Application initialization and configuration

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::winit::WinitSettings;

use crate::core::cli::CliArgs;
use crate::core::errors::{BlockoutResult, Context};
use crate::core::settings::ToolkitSettings;
use crate::feedback::{FeedbackPlugin, FeedbackVisualsPlugin};
use crate::pointer::{HandAnchor, InputBindings, PointerPlugin, ResolvedBindings};
use crate::scene::spawn::PlacementContainer;
use crate::scene::{SceneCategory, SceneCollider};
use crate::theme::{BACKGROUND_COLOR, GROUND_COLOR};
use crate::tools::ToolsPlugin;
use crate::ui::ToolbarUiPlugin;

/// Creates a fully configured Bevy GUI application ready to run
pub fn create_app(cli_args: CliArgs) -> BlockoutResult<App> {
    cli_args.validate()?;

    let mut app = App::new();
    configure_app_settings(&mut app, cli_args)?;
    add_all_plugins(&mut app);
    Ok(app)
}

/// Sets up application resources and configuration
fn configure_app_settings(app: &mut App, cli_args: CliArgs) -> BlockoutResult<()> {
    let settings = ToolkitSettings::default().with_cli_overrides(&cli_args);

    let bindings = match &cli_args.bindings_path {
        Some(path) => InputBindings::load(path)
            .and_then(|raw| raw.resolve())
            .context("loading input bindings")?,
        None => ResolvedBindings::default(),
    };

    app.insert_resource(cli_args)
        .insert_resource(settings)
        .insert_resource(bindings)
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(WinitSettings::desktop_app());
    Ok(())
}

/// Adds all plugins to the application in logical groups
fn add_all_plugins(app: &mut App) {
    let hand_ray = app
        .world()
        .get_resource::<CliArgs>()
        .is_some_and(|cli| cli.hand_ray);

    // The custom logger owns the tracing subscriber
    app.add_plugins(DefaultPlugins.build().disable::<LogPlugin>());

    app.add_plugins((
        PointerPlugin { hand_ray },
        FeedbackPlugin,
        FeedbackVisualsPlugin,
        ToolsPlugin,
        ToolbarUiPlugin,
    ));

    app.add_systems(Startup, setup_scene);
}

/// Camera, light, ground and a couple of starter blocks.
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut container: ResMut<PlacementContainer>,
    cli_args: Res<CliArgs>,
) {
    let camera = commands
        .spawn((
            Camera3d::default(),
            Transform::from_xyz(6.0, 6.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();
    if cli_args.hand_ray {
        // Stand-in anchor until a tracking backend drives it
        let anchor = commands
            .spawn((HandAnchor, Transform::default(), GlobalTransform::default()))
            .id();
        commands.entity(camera).add_child(anchor);
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ground slab with its top face at y = 0
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(100.0, 0.1, 100.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOR,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.05, 0.0),
        SceneCategory::Ground,
        SceneCollider::Cuboid {
            half_extents: Vec3::new(50.0, 0.05, 50.0),
        },
    ));

    // Everything placed at runtime is grouped under one container
    let placed = commands
        .spawn((Transform::default(), Visibility::default(), Name::new("Placed")))
        .id();
    container.0 = Some(placed);

    // A few starter blocks so selection has something to pick
    for (x, z) in [(-2.0, -1.0), (1.5, 2.0)] {
        crate::scene::spawn::spawn_primitive(
            &mut commands,
            &mut meshes,
            &mut materials,
            crate::scene::PrimitiveShape::Cube,
            Vec3::new(x, 0.5, z),
            Quat::IDENTITY,
            Vec3::ONE,
            Some(placed),
        );
    }
}
