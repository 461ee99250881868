use glam::{Mat4, Vec3, Vec4};
use crate::binding::BindGroupLayoutRegistry;
use crate::binding::schema::*;
use crate::error::Error;
use super::*;

fn sample_camera() -> Camera {
    Camera::look_at(
        Vec3::new(2.0, 3.0, 10.0),
        Vec3::ZERO,
        Vec3::Y,
        Lens::perspective(60.0, 16.0 / 9.0, 0.1, 100.0),
    ).unwrap()
}

fn vec4_at(bytes: &[u8], offset: usize) -> Vec4 {
    bytemuck::pod_read_unaligned::<Vec4>(&bytes[offset..offset + 16])
}

#[test]
fn test_layout_matches_schema() {
    assert!(CameraUniform::assert_layout().is_ok());
    assert_eq!(std::mem::size_of::<CameraUniform>(), CAMERA_UNIFORM_SIZE);
}

#[test]
fn test_uniform_fields_follow_camera() {
    let camera = sample_camera();
    let uniform = camera.uniform();

    assert_eq!(uniform.position, camera.position().extend(1.0));
    assert_eq!(uniform.world, *camera.world_matrix());
    assert_eq!(uniform.view, *camera.view_matrix());
    assert_eq!(uniform.projection, *camera.projection_matrix());
    assert_eq!(&uniform.frustum, camera.frustum().planes());
}

#[test]
fn test_bytes_land_at_shader_offsets() {
    let uniform = sample_camera().uniform();
    let bytes = uniform.as_bytes();

    assert_eq!(bytes.len(), CAMERA_UNIFORM_SIZE);
    assert_eq!(vec4_at(bytes, CAMERA_POSITION_OFFSET), uniform.position);
    assert_eq!(vec4_at(bytes, CAMERA_WORLD_OFFSET), uniform.world.x_axis);
    assert_eq!(vec4_at(bytes, CAMERA_VIEW_OFFSET + 48), uniform.view.w_axis);
    assert_eq!(vec4_at(bytes, CAMERA_PROJECTION_OFFSET + 32), uniform.projection.z_axis);
    for plane in 0..FRUSTUM_PLANE_COUNT {
        assert_eq!(vec4_at(bytes, CAMERA_FRUSTUM_OFFSET + plane * 16), uniform.frustum[plane]);
    }
}

#[test]
fn test_builder_against_standard_layouts() {
    let builder = CameraUniformBuilder::new(&BindGroupLayoutRegistry::standard()).unwrap();
    assert_eq!(builder.group(), GROUP_CAMERA);
    assert_eq!(builder.binding(), BINDING_CAMERA);

    let camera = sample_camera();
    assert_eq!(builder.build(&camera), camera.uniform());

    let from_parts = builder.build_from(*camera.world_matrix(), camera.lens()).unwrap();
    assert_eq!(from_parts, camera.uniform());
}

#[test]
fn test_build_frame_camera() {
    let lens = Lens::perspective(90.0, 1.0, 0.1, 100.0);
    let uniform = build_frame_camera(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), &lens).unwrap();

    assert_eq!(uniform.position, Vec4::new(1.0, 2.0, 3.0, 1.0));
    assert_eq!(uniform.projection, lens.projection_matrix().unwrap());
    for plane in &uniform.frustum {
        assert!((plane.truncate().length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn test_build_frame_camera_rejects_degenerate_input() {
    let lens = Lens::default();
    assert!(matches!(
        build_frame_camera(Mat4::ZERO, &lens),
        Err(Error::DegenerateCamera(_))
    ));
    assert!(matches!(
        build_frame_camera(Mat4::IDENTITY, &Lens::perspective(60.0, 1.0, 5.0, 1.0)),
        Err(Error::DegenerateCamera(_))
    ));
}
