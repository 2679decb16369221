//! Board scene drawn into terminal cells.
//!
//! Every cell casts one ray through the live camera and takes the colour of
//! what it hits, compositing translucent meshes (cursor, movement options)
//! over whatever lies behind them. Pieces also get a glyph.

use board_core::{CanvasRect, NodeId, NodeKind, PieceColor, PointerEvent, Ray, Scene, Viewport};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::presentation::theme::{Theme, rgb};

/// Terminal cells are about twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

const PIECE_PREFIX: &str = "piece:";

/// The canvas the viewport sees for a board drawn into `area`.
pub fn cell_canvas(area: Rect) -> CanvasRect {
    CanvasRect::new(
        f32::from(area.x),
        f32::from(area.y) * CELL_ASPECT,
        f32::from(area.width),
        f32::from(area.height) * CELL_ASPECT,
    )
}

/// Pointer at the centre of a terminal cell.
pub fn cell_pointer(column: u16, row: u16) -> PointerEvent {
    PointerEvent::new(
        f32::from(column) + 0.5,
        (f32::from(row) + 0.5) * CELL_ASPECT,
    )
}

pub struct BoardView<'a> {
    viewport: &'a Viewport,
    theme: &'a Theme,
}

impl<'a> BoardView<'a> {
    pub fn new(viewport: &'a Viewport, theme: &'a Theme) -> Self {
        Self { viewport, theme }
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let canvas = cell_canvas(area);
        let scene = self.viewport.scene();
        let camera = self.viewport.camera();

        for row in area.top()..area.bottom() {
            for column in area.left()..area.right() {
                let Some(ndc) = canvas.normalize(cell_pointer(column, row)) else {
                    continue;
                };
                let pixel = shade(scene, &camera.ray_from_ndc(ndc), self.theme.background);
                if let Some(cell) = buf.cell_mut((column, row)) {
                    cell.set_char(pixel.glyph)
                        .set_bg(rgb(pixel.color))
                        .set_fg(contrast(pixel.color));
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Shade {
    color: u32,
    glyph: char,
}

/// Front-to-back compositing of every mesh along `ray`.
fn shade(scene: &Scene, ray: &Ray, background: u32) -> Shade {
    let mut color = [0.0_f32; 3];
    let mut remaining = 1.0_f32;
    let mut glyph = None;

    for hit in scene.raycast(ray) {
        let Some(node) = scene.node(hit.node) else {
            continue;
        };
        let NodeKind::Mesh { material, .. } = node.kind else {
            continue;
        };

        let opacity = material.opacity.clamp(0.0, 1.0);
        for (channel, value) in color.iter_mut().zip(channels(material.color)) {
            *channel += value * opacity * remaining;
        }
        remaining *= 1.0 - opacity;

        if glyph.is_none() && opacity >= 1.0 {
            glyph = Some(piece_glyph(scene, hit.node).unwrap_or(' '));
        }
        if remaining <= 0.01 {
            break;
        }
    }

    for (channel, value) in color.iter_mut().zip(channels(background)) {
        *channel += value * remaining;
    }

    Shade {
        color: pack(color),
        glyph: glyph.unwrap_or(' '),
    }
}

/// First letter of the role, upper case for white.
fn piece_glyph(scene: &Scene, mut id: NodeId) -> Option<char> {
    loop {
        let node = scene.node(id)?;
        if let Some(piece) = node.name.strip_prefix(PIECE_PREFIX) {
            let (role, color) = piece.rsplit_once('-')?;
            let letter = role.chars().next()?;
            return Some(if color == PieceColor::White.to_string() {
                letter.to_ascii_uppercase()
            } else {
                letter.to_ascii_lowercase()
            });
        }
        id = node.parent()?;
    }
}

fn channels(color: u32) -> [f32; 3] {
    let [_, r, g, b] = color.to_be_bytes();
    [f32::from(r), f32::from(g), f32::from(b)]
}

fn pack(color: [f32; 3]) -> u32 {
    let [r, g, b] = color.map(|value| value.round().clamp(0.0, 255.0) as u32);
    (r << 16) | (g << 8) | b
}

fn contrast(color: u32) -> Color {
    let [r, g, b] = channels(color);
    if 0.299 * r + 0.587 * g + 0.114 * b > 128.0 {
        Color::Black
    } else {
        Color::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::{Material, Model};
    use glam::Vec3;

    #[test]
    fn cell_pointers_stay_inside_the_canvas() {
        let area = Rect::new(2, 1, 40, 20);
        let canvas = cell_canvas(area);
        assert_eq!(canvas.aspect(), 1.0);

        let top_left = canvas.normalize(cell_pointer(2, 1)).unwrap();
        let bottom_right = canvas.normalize(cell_pointer(41, 20)).unwrap();
        assert!(top_left.x > -1.0 && top_left.y < 1.0);
        assert!(bottom_right.x < 1.0 && bottom_right.y > -1.0);
    }

    #[test]
    fn translucent_meshes_blend_over_what_is_behind() {
        let mut scene = Scene::new();
        let root = scene.root();
        let red = Material::translucent(0xff0000, 0.5);
        let front = Model::new(NodeKind::cuboid(1.0, 1.0, 1.0, red));
        scene.instantiate(root, "front", &front, Vec3::new(0.0, 0.0, 2.0));
        let back = Model::new(NodeKind::cuboid(1.0, 1.0, 1.0, Material::opaque(0x0000ff)));
        scene.instantiate(root, "back", &back, Vec3::new(0.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let blended = shade(&scene, &ray, 0x000000);
        assert_eq!(blended.color, 0x800080);
        assert_eq!(blended.glyph, ' ');

        let miss = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(shade(&scene, &miss, 0x123456).color, 0x123456);
    }

    #[test]
    fn pieces_are_lettered_by_role_and_colour() {
        let mut scene = Scene::new();
        let root = scene.root();
        let body = Model::new(NodeKind::cuboid(0.5, 0.5, 0.5, Material::opaque(0xf0f0f0)));
        let piece = Model::new(NodeKind::Group).with_child("body", body);
        let white = scene.instantiate(root, "piece:shah-white", &piece, Vec3::new(0.0, 0.0, 0.0));
        let black = scene.instantiate(root, "piece:piyade-black", &piece, Vec3::new(3.0, 0.0, 0.0));

        assert_eq!(piece_glyph(&scene, scene.children(white)[0]), Some('S'));
        assert_eq!(piece_glyph(&scene, scene.children(black)[0]), Some('p'));
        assert_eq!(piece_glyph(&scene, root), None);
    }
}
