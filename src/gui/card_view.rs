use std::{
    collections::HashSet,
    fmt,
    time::Instant,
};

use eframe::egui::{
    self,
    epaint::Vertex,
    load::{
        SizeHint,
        TexturePoll,
    },
    pos2,
    vec2,
    Color32,
    Id,
    Mesh,
    Pos2,
    Rect,
    Shape,
    Stroke,
    TextureId,
    TextureOptions,
    Vec2,
};
use tracing::warn;

use super::theme::Theme;
use crate::core::{
    CardAnimation,
    CardPose,
};

const PERSPECTIVE: f32 = 1500.0;
const TILT_X_DEG: f32 = 30.0;
const CARD_ASPECT: f32 = 0.7;
const SHADOW_OFFSET: Vec2 = vec2(0.0, 10.0);

/// Visual transform of one card: a fixed backward tilt plus the
/// rotation and scale coming from its pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub perspective: f32,
    pub tilt_x: f32,
    pub rotate_y: f32,
    pub rotate_z: f32,
    pub scale: f32,
}

impl CardTransform {
    pub fn new(rot: f32, scale: f32) -> Self {
        Self {
            perspective: PERSPECTIVE,
            tilt_x: TILT_X_DEG,
            rotate_y: rot / 10.0,
            rotate_z: rot,
            scale,
        }
    }

    /// Maps a point given relative to the card center into screen space.
    ///
    /// Applied in order: scale, Z rotation, Y rotation, X tilt, perspective.
    /// Screen y grows downward and z grows toward the viewer.
    pub fn project(&self, point: Vec2) -> Vec2 {
        let (x, y) = (point.x * self.scale, point.y * self.scale);

        let (sin_z, cos_z) = self.rotate_z.to_radians().sin_cos();
        let (x, y) = (x * cos_z - y * sin_z, x * sin_z + y * cos_z);

        let (sin_y, cos_y) = self.rotate_y.to_radians().sin_cos();
        let (x, z) = (x * cos_y, -x * sin_y);

        let (sin_x, cos_x) = self.tilt_x.to_radians().sin_cos();
        let (y, z) = (y * cos_x - z * sin_x, y * sin_x + z * cos_x);

        let w = self.perspective / (self.perspective - z).max(1.0);
        vec2(x * w, y * w)
    }

    /// Top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self, size: Vec2) -> [Vec2; 4] {
        let half = size / 2.0;
        [
            self.project(vec2(-half.x, -half.y)),
            self.project(vec2(half.x, -half.y)),
            self.project(vec2(half.x, half.y)),
            self.project(vec2(-half.x, half.y)),
        ]
    }
}

impl fmt::Display for CardTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "perspective({}px) rotateX({}deg) rotateY({}deg) rotateZ({}deg) scale({})",
            self.perspective, self.tilt_x, self.rotate_y, self.rotate_z, self.scale
        )
    }
}

pub fn card_id(index: usize) -> Id {
    Id::new("flickdeck_card").with(index)
}

/// Where the stack sits on screen and how big an unscaled card is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckLayout {
    pub center: Pos2,
    pub card_size: Vec2,
}

impl DeckLayout {
    pub fn new(area: Rect) -> Self {
        Self { center: area.center(), card_size: card_size(area.size()) }
    }
}

/// Card size that fits the available area.
pub fn card_size(available: Vec2) -> Vec2 {
    let height = (available.y * 0.6).clamp(160.0, 480.0);
    vec2(height * CARD_ASPECT, height)
}

/// UV rect that crops a texture to cover a card without stretching.
pub fn cover_uv(texture_size: Vec2, card_size: Vec2) -> Rect {
    if texture_size.x <= 0.0 || texture_size.y <= 0.0 || card_size.y <= 0.0 {
        return Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    }

    let texture_aspect = texture_size.x / texture_size.y;
    let card_aspect = card_size.x / card_size.y;
    if texture_aspect > card_aspect {
        let w = card_aspect / texture_aspect;
        Rect::from_min_max(pos2((1.0 - w) / 2.0, 0.0), pos2((1.0 + w) / 2.0, 1.0))
    } else {
        let h = texture_aspect / card_aspect;
        Rect::from_min_max(pos2(0.0, (1.0 - h) / 2.0), pos2(1.0, (1.0 + h) / 2.0))
    }
}

/// Drives the UI animator toward each card's current target.
pub fn animate_pose(
    ctx: &egui::Context,
    index: usize,
    animation: &CardAnimation,
    now: Instant,
) -> CardPose {
    let target = animation.pose_at(now);
    let secs = animation.spring.settle_time();
    let id = card_id(index);
    CardPose {
        x: ctx.animate_value_with_time(id.with("x"), target.x, secs),
        y: ctx.animate_value_with_time(id.with("y"), target.y, secs),
        rot: ctx.animate_value_with_time(id.with("rot"), target.rot, secs),
        scale: ctx.animate_value_with_time(id.with("scale"), target.scale, secs),
    }
}

/// Pins the animator to `pose` so the first animation starts there.
pub fn seed_pose(ctx: &egui::Context, index: usize, pose: CardPose) {
    let id = card_id(index);
    ctx.animate_value_with_time(id.with("x"), pose.x, 0.0);
    ctx.animate_value_with_time(id.with("y"), pose.y, 0.0);
    ctx.animate_value_with_time(id.with("rot"), pose.rot, 0.0);
    ctx.animate_value_with_time(id.with("scale"), pose.scale, 0.0);
}

/// Paints cards as textured, perspective-projected quads.
#[derive(Default)]
pub struct CardPainter {
    failed_images: HashSet<String>,
}

impl CardPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints card `index` at `pose` relative to the deck center and returns its screen bounds.
    pub fn paint(
        &mut self,
        ui: &egui::Ui,
        theme: &Theme,
        layout: DeckLayout,
        index: usize,
        image: Option<&str>,
        pose: CardPose,
    ) -> Rect {
        let ctx = ui.ctx();
        let painter = ui.painter();
        let size = layout.card_size;
        let transform = CardTransform::new(pose.rot, pose.scale);
        let center = layout.center + vec2(pose.x, pose.y);
        let points: Vec<Pos2> = transform.corners(size).iter().map(|c| center + *c).collect();

        let mut shadow = Mesh::default();
        for p in &points {
            shadow.colored_vertex(*p + SHADOW_OFFSET, theme.card_shadow(ctx));
        }
        shadow.add_triangle(0, 1, 2);
        shadow.add_triangle(0, 2, 3);
        painter.add(Shape::mesh(shadow));

        let mut face = match image.and_then(|uri| self.texture(ctx, uri)) {
            Some((texture_id, texture_size)) => {
                let uv = cover_uv(texture_size, size);
                let uvs = [uv.left_top(), uv.right_top(), uv.right_bottom(), uv.left_bottom()];
                let mut mesh = Mesh::with_texture(texture_id);
                for (pos, uv) in points.iter().zip(uvs) {
                    mesh.vertices.push(Vertex { pos: *pos, uv, color: Color32::WHITE });
                }
                mesh
            }
            None => {
                let mut mesh = Mesh::default();
                for p in &points {
                    mesh.colored_vertex(*p, theme.card_fill(ctx, index));
                }
                mesh
            }
        };

        face.add_triangle(0, 1, 2);
        face.add_triangle(0, 2, 3);
        painter.add(Shape::mesh(face));
        painter.add(Shape::closed_line(points.clone(), Stroke::new(2.0, theme.card_border(ctx))));

        Rect::from_points(&points)
    }

    fn texture(&mut self, ctx: &egui::Context, uri: &str) -> Option<(TextureId, Vec2)> {
        if self.failed_images.contains(uri) {
            return None;
        }

        match ctx.try_load_texture(uri, TextureOptions::LINEAR, SizeHint::default()) {
            Ok(TexturePoll::Ready { texture }) => Some((texture.id, texture.size)),
            Ok(TexturePoll::Pending { .. }) => None,
            Err(e) => {
                warn!(uri, error = %e, "Card image failed to load, using plain card");
                self.failed_images.insert(uri.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(a: Vec2, b: Vec2) -> f32 {
        (b - a).length()
    }

    #[test]
    fn test_transform_descriptor_from_rotation() {
        let transform = CardTransform::new(20.0, 1.1);
        assert_eq!(transform.rotate_y, 2.0);
        assert_eq!(transform.rotate_z, 20.0);
        assert_eq!(transform.tilt_x, 30.0);
        assert_eq!(
            transform.to_string(),
            "perspective(1500px) rotateX(30deg) rotateY(2deg) rotateZ(20deg) scale(1.1)"
        );
    }

    #[test]
    fn test_tilt_pushes_top_edge_away() {
        let [tl, tr, br, bl] = CardTransform::new(0.0, 1.0).corners(vec2(200.0, 300.0));

        assert!(width(tl, tr) < width(bl, br));
        assert!(width(bl, br) > 200.0);
        assert!(tl.y < 0.0 && bl.y > 0.0);
        assert!((tl.x + tr.x).abs() < 1e-3, "untwisted card stays symmetric");
    }

    #[test]
    fn test_center_is_fixed_point() {
        let projected = CardTransform::new(37.0, 1.5).project(Vec2::ZERO);
        assert!(projected.length() < 1e-4);
    }

    #[test]
    fn test_scale_grows_card() {
        let size = vec2(200.0, 300.0);
        let [tl, tr, ..] = CardTransform::new(0.0, 1.0).corners(size);
        let [tl_big, tr_big, ..] = CardTransform::new(0.0, 1.1).corners(size);
        assert!(width(tl_big, tr_big) > width(tl, tr));
    }

    #[test]
    fn test_z_rotation_turns_card_clockwise() {
        let right = CardTransform::new(90.0, 1.0).project(vec2(100.0, 0.0));
        assert!(right.y > 0.0, "positive rotation moves the right edge downward: {right:?}");
    }

    #[test]
    fn test_cover_uv_crops_wide_texture() {
        let uv = cover_uv(vec2(1400.0, 1000.0), vec2(70.0, 100.0));
        assert!((uv.width() - 0.5).abs() < 1e-6);
        assert_eq!(uv.height(), 1.0);
        assert!((uv.center().x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cover_uv_crops_tall_texture() {
        let uv = cover_uv(vec2(700.0, 2000.0), vec2(70.0, 100.0));
        assert_eq!(uv.width(), 1.0);
        assert!((uv.height() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_card_size_keeps_aspect() {
        let size = card_size(vec2(1200.0, 800.0));
        assert_eq!(size.y, 480.0);
        assert!((size.x / size.y - CARD_ASPECT).abs() < 1e-6);
        assert_eq!(card_size(vec2(100.0, 50.0)).y, 160.0);
    }
}
