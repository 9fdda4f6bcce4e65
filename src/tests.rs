//! Headless scenario tests
//!
//! These drive the full tool stack in a windowless app: pointer state is
//! written directly, ticks run through the real schedules, and
//! assertions read the resulting ECS state.

use bevy::asset::AssetPlugin;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::transform::TransformPlugin;

use crate::core::settings::{ToolkitSettings, VerticalMove};
use crate::feedback::guide_ray::GuideRayVisual;
use crate::feedback::{FeedbackPlugin, GhostMaterial, Highlighter, OutlineTarget, RestorationLedger};
use crate::pointer::PointerState;
use crate::scene::{GhostPreview, PrimitiveShape, SceneCategory, SceneCollider};
use crate::theme::HIGHLIGHT_COLOR;
use crate::tools::{
    ActiveTool, DeleteConfirmed, DeleteState, PlacementState, Selection, ToolMode, ToolRequest,
    ToolsPlugin, TransformState,
};

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin, AssetPlugin::default()));
    app.init_asset::<Mesh>();
    app.init_asset::<StandardMaterial>();
    app.init_resource::<ToolkitSettings>();
    app.init_resource::<PointerState>();
    app.add_plugins((FeedbackPlugin, ToolsPlugin));
    // run Startup so the ghost material exists
    app.update();
    app
}

fn spawn_ground(app: &mut App) -> Entity {
    let mesh = app
        .world_mut()
        .resource_mut::<Assets<Mesh>>()
        .add(Cuboid::new(100.0, 0.1, 100.0));
    let material = app
        .world_mut()
        .resource_mut::<Assets<StandardMaterial>>()
        .add(StandardMaterial::default());
    let transform = Transform::from_xyz(0.0, -0.05, 0.0);
    app.world_mut()
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            transform,
            GlobalTransform::from(transform),
            SceneCategory::Ground,
            SceneCollider::Cuboid {
                half_extents: Vec3::new(50.0, 0.05, 50.0),
            },
        ))
        .id()
}

fn spawn_cube(app: &mut App, position: Vec3) -> Entity {
    let mesh = app
        .world_mut()
        .resource_mut::<Assets<Mesh>>()
        .add(Cuboid::new(1.0, 1.0, 1.0));
    let material = app
        .world_mut()
        .resource_mut::<Assets<StandardMaterial>>()
        .add(StandardMaterial {
            base_color: Color::srgb(0.5, 0.5, 0.5),
            ..default()
        });
    let transform = Transform::from_translation(position);
    app.world_mut()
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            transform,
            GlobalTransform::from(transform),
            SceneCategory::Placeable,
            SceneCollider::Cuboid {
                half_extents: Vec3::splat(0.5),
            },
        ))
        .id()
}

fn material_of(app: &App, entity: Entity) -> Handle<StandardMaterial> {
    app.world()
        .get::<MeshMaterial3d<StandardMaterial>>(entity)
        .expect("entity should have a material")
        .0
        .clone()
}

fn ray_down(x: f32, z: f32) -> Option<Ray3d> {
    Some(Ray3d::new(Vec3::new(x, 5.0, z), Dir3::NEG_Y))
}

fn ghost_count(app: &mut App) -> usize {
    let mut ghosts = app
        .world_mut()
        .query_filtered::<(), With<GhostPreview>>();
    ghosts.iter(app.world()).count()
}

/// Set the pointer snapshot for exactly one tick and run it.
fn drive(app: &mut App, pointer: PointerState) {
    *app.world_mut().resource_mut::<PointerState>() = pointer;
    app.update();
}

/// Send a tool request on an idle pointer and run one tick.
fn request(app: &mut App, request: ToolRequest) {
    *app.world_mut().resource_mut::<PointerState>() = PointerState::default();
    app.world_mut().send_event(request);
    app.update();
}

fn active_mode(app: &App) -> ToolMode {
    app.world().resource::<ActiveTool>().0
}

mod mode_switching {
    use super::*;

    #[test]
    fn requests_install_the_mode_and_exit_returns_to_idle() {
        let mut app = test_app();
        assert_eq!(active_mode(&app), ToolMode::Idle);

        request(&mut app, ToolRequest::Select);
        assert_eq!(active_mode(&app), ToolMode::Selecting);

        request(&mut app, ToolRequest::Delete);
        assert_eq!(active_mode(&app), ToolMode::Deleting);

        request(&mut app, ToolRequest::Exit);
        assert_eq!(active_mode(&app), ToolMode::Idle);
    }

    #[test]
    fn switching_out_of_delete_restores_marked_objects() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));
        let original = material_of(&app, cube);

        request(&mut app, ToolRequest::Delete);
        drive(
            &mut app,
            PointerState {
                select_pressed: true,
                any_pressed: true,
                ray: ray_down(0.0, 0.0),
                ..default()
            },
        );
        assert!(app.world().resource::<DeleteState>().marked.contains(&cube));
        assert_ne!(material_of(&app, cube), original);

        // A mode switch is as good as cancel for anything still marked
        request(&mut app, ToolRequest::Select);
        assert_eq!(active_mode(&app), ToolMode::Selecting);
        assert_eq!(material_of(&app, cube), original);
        assert!(app.world().resource::<RestorationLedger>().is_empty());
        assert!(app.world().resource::<DeleteState>().marked.is_empty());
    }

    #[test]
    fn repicking_a_placement_shape_replaces_the_ghost() {
        let mut app = test_app();
        spawn_ground(&mut app);

        request(&mut app, ToolRequest::Place(PrimitiveShape::Cube));
        request(&mut app, ToolRequest::Place(PrimitiveShape::Sphere));
        app.update();

        assert_eq!(ghost_count(&mut app), 1);
        assert_eq!(
            app.world().resource::<PlacementState>().shape,
            Some(PrimitiveShape::Sphere)
        );
        assert_eq!(active_mode(&app), ToolMode::Placing);
    }
}

mod selection {
    use super::*;

    #[test]
    fn clicking_an_object_selects_and_highlights_it() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let cube = spawn_cube(&mut app, Vec3::new(1.0, 0.5, -2.0));
        let original = material_of(&app, cube);

        request(&mut app, ToolRequest::Select);
        assert!(app.world().resource::<GuideRayVisual>().0);

        drive(
            &mut app,
            PointerState {
                select_pressed: true,
                any_pressed: true,
                ray: ray_down(1.0, -2.0),
                ..default()
            },
        );

        assert_eq!(app.world().resource::<Selection>().current, Some(cube));
        assert_eq!(app.world().resource::<OutlineTarget>().0, Some(cube));
        assert_eq!(app.world().resource::<RestorationLedger>().len(), 1);
        assert_ne!(material_of(&app, cube), original);
        // picking hides the guide ray by default
        assert!(!app.world().resource::<GuideRayVisual>().0);
    }

    #[test]
    fn reselecting_the_same_object_keeps_one_ledger_entry() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));
        let original = material_of(&app, cube);

        request(&mut app, ToolRequest::Select);
        for _ in 0..2 {
            drive(
                &mut app,
                PointerState {
                    select_pressed: true,
                    any_pressed: true,
                    ray: ray_down(0.0, 0.0),
                    ..default()
                },
            );
        }
        assert_eq!(app.world().resource::<RestorationLedger>().len(), 1);

        // cancel restores the recorded appearance exactly
        drive(
            &mut app,
            PointerState {
                cancel_pressed: true,
                any_pressed: true,
                ray: ray_down(0.0, 0.0),
                ..default()
            },
        );
        assert_eq!(app.world().resource::<Selection>().current, None);
        assert_eq!(material_of(&app, cube), original);
        assert!(app.world().resource::<RestorationLedger>().is_empty());
    }

    #[test]
    fn clicking_the_ground_clears_the_selection() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));

        request(&mut app, ToolRequest::Select);
        drive(
            &mut app,
            PointerState {
                select_pressed: true,
                any_pressed: true,
                ray: ray_down(0.0, 0.0),
                ..default()
            },
        );
        assert_eq!(app.world().resource::<Selection>().current, Some(cube));

        drive(
            &mut app,
            PointerState {
                select_pressed: true,
                any_pressed: true,
                ray: ray_down(10.0, 10.0),
                ..default()
            },
        );
        assert_eq!(app.world().resource::<Selection>().current, None);
        assert!(app.world().resource::<RestorationLedger>().is_empty());
    }

    #[test]
    fn picking_a_part_selects_its_owner() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let owner = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));
        // a sub-part with its own collider resolves hits to the owner
        let part = spawn_cube(&mut app, Vec3::new(0.0, 1.5, 0.0));
        app.world_mut()
            .entity_mut(part)
            .insert(crate::scene::PartOwner(owner));
        app.world_mut().entity_mut(owner).add_child(part);

        request(&mut app, ToolRequest::Select);
        drive(
            &mut app,
            PointerState {
                select_pressed: true,
                any_pressed: true,
                ray: ray_down(0.0, 0.0),
                ..default()
            },
        );

        assert_eq!(app.world().resource::<Selection>().current, Some(owner));
        // both the owner's and the part's surfaces are marked
        assert_eq!(app.world().resource::<RestorationLedger>().len(), 2);
    }

    #[test]
    fn selection_survives_switching_between_armed_modes() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));

        request(&mut app, ToolRequest::Select);
        drive(
            &mut app,
            PointerState {
                select_pressed: true,
                any_pressed: true,
                ray: ray_down(0.0, 0.0),
                ..default()
            },
        );
        request(&mut app, ToolRequest::Rotate);
        assert_eq!(app.world().resource::<Selection>().current, Some(cube));

        // leaving the armed family drops it
        request(&mut app, ToolRequest::Place(PrimitiveShape::Cube));
        assert_eq!(app.world().resource::<Selection>().current, None);
        assert!(app.world().resource::<RestorationLedger>().is_empty());
    }
}

mod deletion {
    use super::*;

    fn mark(app: &mut App, x: f32, z: f32) {
        drive(
            app,
            PointerState {
                select_pressed: true,
                any_pressed: true,
                ray: ray_down(x, z),
                ..default()
            },
        );
    }

    #[test]
    fn marking_toggles_and_cancel_restores_everything() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let a = spawn_cube(&mut app, Vec3::new(-2.0, 0.5, 0.0));
        let b = spawn_cube(&mut app, Vec3::new(2.0, 0.5, 0.0));
        let original_a = material_of(&app, a);
        let original_b = material_of(&app, b);

        request(&mut app, ToolRequest::Delete);
        mark(&mut app, -2.0, 0.0);
        mark(&mut app, 2.0, 0.0);
        assert_eq!(app.world().resource::<DeleteState>().marked.len(), 2);

        // marking the same object again unmarks it
        mark(&mut app, 2.0, 0.0);
        assert_eq!(app.world().resource::<DeleteState>().marked.len(), 1);
        assert_eq!(material_of(&app, b), original_b);

        drive(
            &mut app,
            PointerState {
                cancel_pressed: true,
                any_pressed: true,
                ..default()
            },
        );
        app.update();

        assert_eq!(active_mode(&app), ToolMode::Idle);
        assert_eq!(material_of(&app, a), original_a);
        assert!(app.world().resource::<RestorationLedger>().is_empty());
        assert!(app.world().get_entity(a).is_ok());
        assert!(app.world().get_entity(b).is_ok());
    }

    #[test]
    fn confirming_destroys_the_marked_set() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let a = spawn_cube(&mut app, Vec3::new(-2.0, 0.5, 0.0));
        let b = spawn_cube(&mut app, Vec3::new(2.0, 0.5, 0.0));
        let survivor = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 5.0));

        request(&mut app, ToolRequest::Delete);
        mark(&mut app, -2.0, 0.0);
        mark(&mut app, 2.0, 0.0);

        *app.world_mut().resource_mut::<PointerState>() = PointerState::default();
        app.world_mut().send_event(DeleteConfirmed);
        app.update();
        app.update();

        assert!(app.world().get_entity(a).is_err());
        assert!(app.world().get_entity(b).is_err());
        assert!(app.world().get_entity(survivor).is_ok());
        assert_eq!(active_mode(&app), ToolMode::Idle);
        assert!(app.world().resource::<RestorationLedger>().is_empty());
        assert!(app.world().resource::<DeleteState>().marked.is_empty());
    }
}

mod placement {
    use super::*;

    #[test]
    fn ghost_bottom_aligns_and_snaps_on_the_ground() {
        let mut app = test_app();
        spawn_ground(&mut app);

        request(&mut app, ToolRequest::Place(PrimitiveShape::Cube));
        drive(
            &mut app,
            PointerState {
                ray: ray_down(0.29, 0.0),
                ..default()
            },
        );

        let preview = app.world().resource::<PlacementState>().preview.unwrap();
        let transform = app.world().get::<Transform>(preview).unwrap();
        // x snaps to the 0.2 grid, the cube rests half a unit above the
        // ground plus the hover offset, y is never snapped
        assert!((transform.translation.x - 0.2).abs() < 1e-5);
        assert!((transform.translation.y - 0.51).abs() < 1e-5);
        assert!((transform.translation.z - 0.0).abs() < 1e-5);
        assert_eq!(
            *app.world().get::<Visibility>(preview).unwrap(),
            Visibility::Visible
        );
        assert!(app.world().resource::<PlacementState>().has_valid_pose);
    }

    #[test]
    fn ghost_is_painted_with_the_shared_translucent_material() {
        let mut app = test_app();
        spawn_ground(&mut app);

        request(&mut app, ToolRequest::Place(PrimitiveShape::Cube));
        // the feedback pass paints the freshly spawned preview
        app.update();

        let preview = app.world().resource::<PlacementState>().preview.unwrap();
        let ghost = app.world().resource::<GhostMaterial>().0.clone();
        assert_eq!(material_of(&app, preview), ghost);
        // preview painting never goes through the ledger
        assert!(app.world().resource::<RestorationLedger>().is_empty());
    }

    #[test]
    fn ghost_hides_when_the_ray_misses() {
        let mut app = test_app();
        // no ground at all
        request(&mut app, ToolRequest::Place(PrimitiveShape::Cube));
        drive(
            &mut app,
            PointerState {
                ray: ray_down(0.0, 0.0),
                ..default()
            },
        );

        let preview = app.world().resource::<PlacementState>().preview.unwrap();
        assert_eq!(
            *app.world().get::<Visibility>(preview).unwrap(),
            Visibility::Hidden
        );
        assert!(!app.world().resource::<PlacementState>().has_valid_pose);
    }

    #[test]
    fn ghost_stacks_on_top_of_an_existing_object() {
        let mut app = test_app();
        spawn_ground(&mut app);
        spawn_cube(&mut app, Vec3::new(1.0, 0.5, 1.0));

        request(&mut app, ToolRequest::Place(PrimitiveShape::Cube));
        drive(
            &mut app,
            PointerState {
                ray: ray_down(1.05, 1.05),
                ..default()
            },
        );

        let preview = app.world().resource::<PlacementState>().preview.unwrap();
        let transform = app.world().get::<Transform>(preview).unwrap();
        // rests on the cube's top (y = 1) plus half height plus hover
        assert!((transform.translation.y - 1.51).abs() < 1e-5);
        assert!((transform.translation.x - 1.0).abs() < 1e-5);
        assert!((transform.translation.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn confirm_spawns_the_object_at_the_preview_pose() {
        let mut app = test_app();
        spawn_ground(&mut app);

        request(&mut app, ToolRequest::Place(PrimitiveShape::Cube));
        drive(
            &mut app,
            PointerState {
                ray: ray_down(2.0, -1.0),
                ..default()
            },
        );
        drive(
            &mut app,
            PointerState {
                confirm_pressed: true,
                any_pressed: true,
                ray: ray_down(2.0, -1.0),
                ..default()
            },
        );
        app.update();

        assert_eq!(active_mode(&app), ToolMode::Idle);
        assert_eq!(app.world().resource::<PlacementState>().preview, None);
        assert_eq!(ghost_count(&mut app), 0);

        let mut placed = app
            .world_mut()
            .query_filtered::<&Transform, (With<SceneCollider>, Without<GhostPreview>)>();
        let spawned: Vec<_> = placed
            .iter(app.world())
            .filter(|t| (t.translation.y - 0.51).abs() < 1e-5)
            .collect();
        assert_eq!(spawned.len(), 1);
        assert!((spawned[0].translation.x - 2.0).abs() < 1e-5);
        assert!((spawned[0].translation.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn cancel_leaves_nothing_behind() {
        let mut app = test_app();
        spawn_ground(&mut app);

        request(&mut app, ToolRequest::Place(PrimitiveShape::Sphere));
        drive(
            &mut app,
            PointerState {
                cancel_pressed: true,
                any_pressed: true,
                ray: ray_down(0.0, 0.0),
                ..default()
            },
        );
        app.update();

        assert_eq!(active_mode(&app), ToolMode::Idle);
        assert_eq!(ghost_count(&mut app), 0);
    }
}

mod movement {
    use super::*;

    fn pick_and_enter_move(app: &mut App, cube_x: f32) {
        request(app, ToolRequest::Select);
        drive(
            app,
            PointerState {
                select_pressed: true,
                any_pressed: true,
                ray: ray_down(cube_x, 0.0),
                ..default()
            },
        );
        request(app, ToolRequest::Move);
    }

    #[test]
    fn selected_object_follows_the_ground_hit_at_fixed_height() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));
        pick_and_enter_move(&mut app, 0.0);

        drive(
            &mut app,
            PointerState {
                ray: ray_down(3.0, 0.33),
                ..default()
            },
        );

        let translation = app.world().get::<Transform>(cube).unwrap().translation;
        assert!((translation.x - 3.0).abs() < 1e-5);
        // vertical coordinate stays where the object started
        assert!((translation.y - 0.5).abs() < 1e-5);
        // z snaps to the 0.2 grid
        assert!((translation.z - 0.4).abs() < 1e-5);
    }

    #[test]
    fn confirm_finishes_the_move_and_clears_the_selection() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));
        pick_and_enter_move(&mut app, 0.0);

        // one tick with everything released arms the confirm edge
        drive(
            &mut app,
            PointerState {
                ray: ray_down(4.0, 0.0),
                ..default()
            },
        );
        drive(
            &mut app,
            PointerState {
                confirm_pressed: true,
                any_pressed: true,
                ray: ray_down(4.0, 0.0),
                ..default()
            },
        );
        app.update();

        assert_eq!(active_mode(&app), ToolMode::Idle);
        assert_eq!(app.world().resource::<Selection>().current, None);
        assert!(app.world().resource::<RestorationLedger>().is_empty());
        let translation = app.world().get::<Transform>(cube).unwrap().translation;
        assert!((translation.x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn stick_policy_raises_the_height_within_clamp_and_snaps_the_object() {
        let mut app = test_app();
        // a rate high enough that any real tick pushes past the clamp
        app.world_mut()
            .resource_mut::<ToolkitSettings>()
            .vertical_move = VerticalMove::Stick {
            rate: 1.0e8,
            clamp: Some([0.0, 1.7]),
            step: Some(0.5),
        };
        spawn_ground(&mut app);
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));
        pick_and_enter_move(&mut app, 0.0);

        for _ in 0..2 {
            drive(
                &mut app,
                PointerState {
                    stick: Vec2::new(0.0, 1.0),
                    ray: ray_down(1.0, 0.0),
                    ..default()
                },
            );
        }

        // the accumulator rides the clamp, the object snaps to the step
        let state = app.world().resource::<TransformState>();
        assert!((state.tracked_height - 1.7).abs() < 1e-5);
        let translation = app.world().get::<Transform>(cube).unwrap().translation;
        assert!((translation.y - 1.5).abs() < 1e-5);
        assert!((translation.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn cancel_stops_following_without_destroying_anything() {
        let mut app = test_app();
        spawn_ground(&mut app);
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));
        pick_and_enter_move(&mut app, 0.0);

        drive(
            &mut app,
            PointerState {
                cancel_pressed: true,
                any_pressed: true,
                ray: ray_down(2.0, 0.0),
                ..default()
            },
        );
        app.update();

        assert_eq!(active_mode(&app), ToolMode::Idle);
        assert_eq!(app.world().resource::<Selection>().current, None);
        assert!(app.world().get_entity(cube).is_ok());
    }
}

mod feedback {
    use super::*;

    #[test]
    fn preview_bypasses_the_ledger() {
        let mut app = test_app();
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));
        let ghost = app.world().resource::<GhostMaterial>().0.clone();

        let applied = ghost.clone();
        app.world_mut()
            .run_system_once(move |mut highlighter: Highlighter| {
                highlighter.preview(cube, applied.clone());
            })
            .unwrap();

        assert_eq!(material_of(&app, cube), ghost);
        assert!(app.world().resource::<RestorationLedger>().is_empty());
    }

    #[test]
    fn mark_then_restore_is_an_exact_round_trip() {
        let mut app = test_app();
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));
        let original = material_of(&app, cube);

        app.world_mut()
            .run_system_once(move |mut highlighter: Highlighter| {
                highlighter.mark(cube, HIGHLIGHT_COLOR, 0.25);
                highlighter.mark(cube, HIGHLIGHT_COLOR, 0.25);
            })
            .unwrap();
        assert_eq!(app.world().resource::<RestorationLedger>().len(), 1);
        assert_ne!(material_of(&app, cube), original);

        app.world_mut()
            .run_system_once(move |mut highlighter: Highlighter| {
                highlighter.restore(cube);
            })
            .unwrap();
        assert_eq!(material_of(&app, cube), original);
        assert!(app.world().resource::<RestorationLedger>().is_empty());
    }

    #[test]
    fn stale_ledger_entries_are_purged_without_restoration() {
        let mut app = test_app();
        let cube = spawn_cube(&mut app, Vec3::new(0.0, 0.5, 0.0));

        app.world_mut()
            .run_system_once(move |mut highlighter: Highlighter| {
                highlighter.mark(cube, HIGHLIGHT_COLOR, 0.25);
            })
            .unwrap();
        assert_eq!(app.world().resource::<RestorationLedger>().len(), 1);

        app.world_mut().entity_mut(cube).despawn();
        app.update();
        assert!(app.world().resource::<RestorationLedger>().is_empty());
    }
}
