use glam::{Mat4, Vec3};
use crate::camera::{Camera, Frustum, Lens};
use crate::config::Config;
use crate::resource::MaterialHandle;
use crate::scene::{OctreeSceneIndex, Sphere, AABB};
use super::*;

fn origin_camera() -> Camera {
    Camera::new(Mat4::IDENTITY, Lens::perspective(90.0, 1.0, 0.1, 100.0)).unwrap()
}

fn add_sphere(scene: &mut Scene, center: Vec3, radius: f32) -> DrawableKey {
    scene
        .create_drawable(Mat4::from_translation(center), MaterialHandle::default(), Sphere::new(Vec3::ZERO, radius))
        .unwrap()
}

/// Scene of `count` spheres spread along x, roughly half of them in view
fn spread_scene(count: usize) -> Scene {
    let mut scene = Scene::new();
    for i in 0..count {
        let x = (i as f32 * 0.37).sin() * 40.0;
        let z = -((i % 150) as f32) - 1.0;
        add_sphere(&mut scene, Vec3::new(x, 0.0, z), 0.5);
    }
    scene
}

// ============================================================================
// cull_visible
// ============================================================================

#[test]
fn test_culling_preserves_order() {
    let mut scene = Scene::new();
    let a = add_sphere(&mut scene, Vec3::new(0.0, 0.0, -10.0), 1.0);
    let _b = add_sphere(&mut scene, Vec3::new(0.0, 0.0, 10.0), 1.0);
    let c = add_sphere(&mut scene, Vec3::new(2.0, 0.0, -20.0), 1.0);

    let visible = cull_visible(origin_camera().frustum(), scene.iter());
    assert_eq!(visible.keys(), &[a, c]);
    assert_eq!(visible.len(), 2);
}

#[test]
fn test_origin_camera_scenario() {
    let mut scene = Scene::new();
    let near = add_sphere(&mut scene, Vec3::new(0.0, 0.0, -10.0), 1.0);
    let far = add_sphere(&mut scene, Vec3::new(0.0, 0.0, -200.0), 1.0);
    let behind = add_sphere(&mut scene, Vec3::new(0.0, 0.0, 5.0), 1.0);

    let visible = cull_visible(origin_camera().frustum(), scene.iter());
    assert!(visible.contains(near));
    assert!(!visible.contains(far));
    assert!(!visible.contains(behind));
}

#[test]
fn test_inclusive_sphere_boundary() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY).unwrap();
    let mut scene = Scene::new();
    let touching = add_sphere(&mut scene, Vec3::new(-3.0, 0.0, 0.5), 2.0);

    assert_eq!(cull_visible(&frustum, scene.iter()).keys(), &[touching]);
}

#[test]
fn test_aabb_drawables_use_world_bounds() {
    let mut scene = Scene::new();
    let local = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let moved_in = scene
        .create_drawable(Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0)), MaterialHandle::default(), local)
        .unwrap();
    let _at_origin_behind = scene
        .create_drawable(Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)), MaterialHandle::default(), local)
        .unwrap();

    let visible = cull_visible(origin_camera().frustum(), scene.iter());
    assert_eq!(visible.into_keys(), vec![moved_in]);
}

#[test]
fn test_empty_input() {
    let scene = Scene::new();
    assert!(cull_visible(origin_camera().frustum(), scene.iter()).is_empty());
}

// ============================================================================
// Cullers
// ============================================================================

#[test]
fn test_brute_force_returns_everything() {
    let scene = spread_scene(20);
    let view = BruteForceCuller::new().cull(&scene, &origin_camera());
    assert_eq!(view.visible_drawables(), scene.draw_order());
}

#[test]
fn test_frustum_culler_matches_cull_visible() {
    let scene = spread_scene(300);
    let camera = origin_camera();

    let view = FrustumCuller::new().cull(&scene, &camera);
    let expected = cull_visible(camera.frustum(), scene.iter());

    assert_eq!(view.visible_drawables(), expected.keys());
    assert!(view.visible_count() > 0 && view.visible_count() < scene.len());
    assert_eq!(view.camera(), &camera);
}

#[test]
fn test_parallel_culler_matches_sequential_order() {
    let scene = spread_scene(5000);
    let camera = origin_camera();
    let sequential = FrustumCuller::new().cull(&scene, &camera);

    for chunk_size in [1, 7, 256, 10_000] {
        let mut culler = ParallelFrustumCuller::new(0, chunk_size);
        let parallel = culler.cull(&scene, &camera);
        assert_eq!(parallel.visible_drawables(), sequential.visible_drawables());
    }
}

#[test]
fn test_parallel_culler_below_threshold() {
    let scene = spread_scene(10);
    let camera = origin_camera();
    let mut culler = ParallelFrustumCuller::new(1000, 4);

    let view = culler.cull(&scene, &camera);
    assert_eq!(view.visible_drawables(), FrustumCuller::new().cull(&scene, &camera).visible_drawables());
}

#[test]
fn test_parallel_culler_from_config() {
    let config = Config { parallel_cull_threshold: 64, cull_chunk_size: 0, ..Config::default() };
    let culler = ParallelFrustumCuller::from_config(&config);

    assert_eq!(culler.threshold(), 64);
    assert_eq!(culler.chunk_size(), 1);
}

// ============================================================================
// Indexed culling
// ============================================================================

/// Octree smaller than the spread scene, so some drawables overflow it
fn attach_octree(scene: &mut Scene) {
    let bounds = AABB::new(Vec3::new(-32.0, -32.0, -128.0), Vec3::new(32.0, 32.0, 0.0));
    scene.set_index(Box::new(OctreeSceneIndex::new(bounds, 4).unwrap()));
}

#[test]
fn test_indexed_culler_matches_linear_order() {
    let camera = origin_camera();
    let linear = FrustumCuller::new().cull(&spread_scene(600), &camera);

    let mut scene = spread_scene(600);
    attach_octree(&mut scene);
    let indexed = FrustumCuller::new().cull(&scene, &camera);

    assert!(indexed.visible_count() > 0);
    assert_eq!(indexed.visible_drawables(), linear.visible_drawables());
}

#[test]
fn test_indexed_culler_after_scene_changes() {
    let mut scene = spread_scene(200);
    attach_octree(&mut scene);
    let camera = origin_camera();
    let mut culler = FrustumCuller::new();

    let keys = scene.draw_order().to_vec();
    scene.remove(keys[3]);
    scene.set_transform(keys[10], Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0))).unwrap();
    scene.set_transform(keys[11], Mat4::from_translation(Vec3::new(0.0, 0.0, 50.0))).unwrap();
    let late = add_sphere(&mut scene, Vec3::new(0.0, 0.0, -2.0), 0.5);

    // Culled twice to exercise the reused candidate buffer
    for _ in 0..2 {
        let indexed = culler.cull(&scene, &camera);
        let linear = cull_visible(camera.frustum(), scene.iter());
        assert_eq!(indexed.visible_drawables(), linear.keys());
        assert!(indexed.visible_drawables().contains(&keys[10]));
        assert!(!indexed.visible_drawables().contains(&keys[11]));
        assert_eq!(indexed.visible_drawables().last(), Some(&late));
    }
}

#[test]
fn test_indexed_culler_sees_drawables_outside_octree() {
    let mut scene = Scene::new();
    attach_octree(&mut scene);
    // Straddles the near face of the octree region
    let straddling = add_sphere(&mut scene, Vec3::new(0.0, 0.0, -0.5), 1.0);
    let beyond = add_sphere(&mut scene, Vec3::new(0.0, 0.0, -99.0), 40.0);
    let inside = add_sphere(&mut scene, Vec3::new(1.0, 1.0, -10.0), 0.5);

    let view = FrustumCuller::new().cull(&scene, &origin_camera());
    assert_eq!(view.visible_drawables(), &[straddling, beyond, inside]);
}
