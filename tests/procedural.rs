use texfx::procedural::{create_checkerboard, create_clouds, fill_checkerboard};
use texfx::{post, Color, TextureHandle};

#[test]
fn checkerboard_8x8_has_2x2_blocks_starting_white() {
    let tex = create_checkerboard(8, 8, 2, Color::WHITE, Color::BLACK).unwrap();
    let pixels = tex.snapshot().unwrap();
    for y in 0..8 {
        for x in 0..8 {
            let expected = if (x / 2 + y / 2) % 2 == 0 { Color::WHITE } else { Color::BLACK };
            assert_eq!(Color::from_argb(pixels[y * 8 + x]), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn zero_sized_textures_are_not_created() {
    assert!(create_checkerboard(0, 8, 2, Color::WHITE, Color::BLACK).is_none());
    assert!(create_clouds(8, 0, 4.0, 4).is_none());
}

#[test]
fn checkerboard_respects_pitch() {
    let tex = TextureHandle::with_pitch(4, 2, 16).unwrap();
    assert!(fill_checkerboard(&tex, 1, Color::RED, Color::BLUE));
    let rows = tex.read(|p| (p.row(0).to_vec(), p.row(1).to_vec())).unwrap();
    let (r, b) = (Color::RED.to_argb(), Color::BLUE.to_argb());
    assert_eq!(rows.0, vec![r, b, r, b]);
    assert_eq!(rows.1, vec![b, r, b, r]);
}

#[test]
fn identity_kernel_leaves_generated_texture_unchanged() {
    let tex = create_clouds(33, 17, 3.0, 5).unwrap();
    let before = tex.snapshot().unwrap();
    let identity = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
    assert!(post::apply_kernel(&tex, &identity, 3, 1.0));
    assert_eq!(tex.snapshot().unwrap(), before);
}
