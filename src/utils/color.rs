use nalgebra::Vector3;

/// Splits a `0xRRGGBB` integer into normalized RGB channels.
pub fn hex_to_rgb(hex: u32) -> Vector3<f32> {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    Vector3::new(r, g, b)
}

pub fn rgb_to_hex(rgb: &Vector3<f32>) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(rgb.x) << 16) | (channel(rgb.y) << 8) | channel(rgb.z)
}
