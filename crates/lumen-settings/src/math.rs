//! Row-major rotation helpers for the direction gizmo
//!
//! `lin_alg::f32::Mat4` stores a flat `[f32; 16]` array; these helpers treat
//! it as row-major (`data[row * 4 + col]`), the same convention used when
//! building view matrices for the editor.

use lin_alg::f32::{Mat4, Vec3};

/// Rotate a direction by the upper-left 3x3 of a row-major matrix
///
/// Translation is ignored, so this maps directions rather than points.
pub fn rotate_dir(m: &Mat4, v: &Vec3) -> Vec3 {
    Vec3::new(
        m.data[0] * v.x + m.data[1] * v.y + m.data[2] * v.z,
        m.data[4] * v.x + m.data[5] * v.y + m.data[6] * v.z,
        m.data[8] * v.x + m.data[9] * v.y + m.data[10] * v.z,
    )
}

/// Transpose of the rotation part, with the rest left as identity
///
/// For an orthonormal view matrix this is the inverse rotation, which maps
/// view-space directions back into world space.
pub fn transpose_rotation(m: &Mat4) -> Mat4 {
    let mut out = Mat4::new_identity();
    for row in 0..3 {
        for col in 0..3 {
            out.data[row * 4 + col] = m.data[col * 4 + row];
        }
    }
    out
}

/// Rotation about an arbitrary unit axis (Rodrigues), row-major
fn axis_rotation(axis: &Vec3, angle: f32) -> Mat4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    let x = axis.x;
    let y = axis.y;
    let z = axis.z;

    let mut out = Mat4::new_identity();
    out.data[0] = t * x * x + c;
    out.data[1] = t * x * y - s * z;
    out.data[2] = t * x * z + s * y;
    out.data[4] = t * x * y + s * z;
    out.data[5] = t * y * y + c;
    out.data[6] = t * y * z - s * x;
    out.data[8] = t * x * z - s * y;
    out.data[9] = t * y * z + s * x;
    out.data[10] = t * z * z + c;
    out
}

/// Multiply two row-major matrices: result = left * right
fn mul_mat4(left: &Mat4, right: &Mat4) -> Mat4 {
    let l = &left.data;
    let r = &right.data;
    let mut out = [0.0f32; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = l[row * 4] * r[col]
                + l[row * 4 + 1] * r[4 + col]
                + l[row * 4 + 2] * r[8 + col]
                + l[row * 4 + 3] * r[12 + col];
        }
    }
    Mat4 { data: out }
}

/// Small-angle rotation from a cursor drag: pitch about X, then yaw about Y
pub fn euler_rotation(pitch: f32, yaw: f32) -> Mat4 {
    let rx = axis_rotation(&Vec3::new(1.0, 0.0, 0.0), pitch);
    let ry = axis_rotation(&Vec3::new(0.0, 1.0, 0.0), yaw);
    mul_mat4(&ry, &rx)
}

/// Normalize a vector, rejecting near-zero input
pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
    let mag = v.magnitude();
    if mag < 1.0e-6 {
        return None;
    }
    Some(Vec3::new(v.x / mag, v.y / mag, v.z / mag))
}
