use super::*;

#[test]
fn test_group_numbers_are_distinct_and_ordered() {
    assert_eq!(GROUP_CAMERA, 0);
    assert_eq!(GROUP_OBJECT, 1);
    assert_eq!(GROUP_MATERIAL, 2);
}

#[test]
fn test_camera_offsets_follow_field_sizes() {
    assert_eq!(CAMERA_WORLD_OFFSET, CAMERA_POSITION_OFFSET + 16);
    assert_eq!(CAMERA_VIEW_OFFSET, CAMERA_WORLD_OFFSET + 64);
    assert_eq!(CAMERA_PROJECTION_OFFSET, CAMERA_VIEW_OFFSET + 64);
    assert_eq!(CAMERA_FRUSTUM_OFFSET, CAMERA_PROJECTION_OFFSET + 64);
}

#[test]
fn test_object_uniform_bytes_are_column_major() {
    let model = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
    let uniform = ObjectUniform::new(model);
    let floats: &[f32] = bytemuck::cast_slice(uniform.as_bytes());

    assert_eq!(floats.len(), 16);
    // Translation lives in the fourth column
    assert_eq!(&floats[12..15], &[1.0, 2.0, 3.0]);
}

#[test]
fn test_color_uniform_bytes() {
    let uniform = ColorUniform::new(Vec4::new(0.25, 0.5, 0.75, 1.0));
    let floats: &[f32] = bytemuck::cast_slice(uniform.as_bytes());
    assert_eq!(floats, &[0.25, 0.5, 0.75, 1.0]);
}
