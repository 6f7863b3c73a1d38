//! Collision detection for the rectangular playfield
//!
//! Overlap tests plus the wall bounce. Brick damage, scoring and paddle
//! deflection are applied by the tick.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Which boundary of the playfield a ball touched this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    /// Left wall (horizontal velocity must point right)
    Left,
    /// Right wall (horizontal velocity must point left)
    Right,
    /// Top of the playfield (vertical velocity must point down)
    Ceiling,
    /// Bottom of the playfield (life lost)
    Floor,
}

/// Check a ball against the playfield bounds
///
/// Returns every boundary touched; a ball in a corner touches two.
pub fn ball_wall_contacts(ball_pos: Vec2, ball_radius: f32) -> Vec<WallContact> {
    let mut contacts = Vec::new();
    if ball_pos.x - ball_radius < 0.0 {
        contacts.push(WallContact::Left);
    } else if ball_pos.x + ball_radius > PLAYFIELD_WIDTH {
        contacts.push(WallContact::Right);
    }
    if ball_pos.y - ball_radius < 0.0 {
        contacts.push(WallContact::Ceiling);
    }
    if ball_pos.y + ball_radius > PLAYFIELD_HEIGHT {
        contacts.push(WallContact::Floor);
    }
    contacts
}

/// Box-vs-circle overlap using the ball's bounding square
///
/// The ball centre plus/minus its radius must intersect the rectangle on both
/// axes. Touching edges do not count.
pub fn ball_rect_overlap(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> bool {
    ball_pos.x + ball_radius > rect.left()
        && ball_pos.x - ball_radius < rect.right()
        && ball_pos.y + ball_radius > rect.top()
        && ball_pos.y - ball_radius < rect.bottom()
}

/// Paddle contact: the ball's lower edge is below the paddle top and its
/// centre lies strictly within the paddle's horizontal span
pub fn ball_paddle_contact(ball_pos: Vec2, ball_radius: f32, paddle: &Rect) -> bool {
    ball_pos.y + ball_radius > paddle.top() && paddle.spans_x(ball_pos.x)
}

/// Pickup contact: the pickup box overlaps the paddle box (touching edges do
/// not count)
pub fn pickup_paddle_contact(pickup: &Rect, paddle: &Rect) -> bool {
    pickup.bottom() > paddle.top()
        && pickup.top() < paddle.bottom()
        && pickup.right() > paddle.left()
        && pickup.left() < paddle.right()
}

/// Laser contact: the shot's anchor point (its top-left corner) is inside the brick
pub fn laser_brick_contact(shot: &Rect, brick: &Rect) -> bool {
    brick.contains_point(shot.pos)
}

/// Reflect a velocity off a playfield wall so it points back inside
///
/// Reflection is directional rather than a plain sign flip: a ball that is
/// still overlapping a wall on the next tick cannot be turned back into it.
pub fn bounce_off_wall(velocity: Vec2, wall: WallContact) -> Vec2 {
    match wall {
        WallContact::Left => Vec2::new(velocity.x.abs(), velocity.y),
        WallContact::Right => Vec2::new(-velocity.x.abs(), velocity.y),
        WallContact::Ceiling => Vec2::new(velocity.x, velocity.y.abs()),
        WallContact::Floor => velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;

    #[test]
    fn test_wall_contacts() {
        assert!(ball_wall_contacts(Vec2::new(400.0, 300.0), BALL_RADIUS).is_empty());
        assert_eq!(
            ball_wall_contacts(Vec2::new(795.0, 300.0), BALL_RADIUS),
            vec![WallContact::Right]
        );
        assert_eq!(
            ball_wall_contacts(Vec2::new(3.0, 300.0), BALL_RADIUS),
            vec![WallContact::Left]
        );
        assert_eq!(
            ball_wall_contacts(Vec2::new(400.0, 4.0), BALL_RADIUS),
            vec![WallContact::Ceiling]
        );
        assert_eq!(
            ball_wall_contacts(Vec2::new(400.0, 595.0), BALL_RADIUS),
            vec![WallContact::Floor]
        );
        // Corner touches both
        assert_eq!(
            ball_wall_contacts(Vec2::new(2.0, 2.0), BALL_RADIUS),
            vec![WallContact::Left, WallContact::Ceiling]
        );
    }

    #[test]
    fn test_ball_rect_overlap() {
        let brick = Rect::new(100.0, 100.0, 50.0, 20.0);
        // Centre inside
        assert!(ball_rect_overlap(Vec2::new(120.0, 110.0), 8.0, &brick));
        // Just below, within radius
        assert!(ball_rect_overlap(Vec2::new(120.0, 127.0), 8.0, &brick));
        // Exactly touching the bottom edge does not count
        assert!(!ball_rect_overlap(Vec2::new(120.0, 128.0), 8.0, &brick));
        // Off to the side
        assert!(!ball_rect_overlap(Vec2::new(170.0, 110.0), 8.0, &brick));
    }

    #[test]
    fn test_ball_paddle_contact() {
        let paddle = Rect::new(350.0, 570.0, 100.0, 20.0);
        assert!(ball_paddle_contact(Vec2::new(400.0, 565.0), 8.0, &paddle));
        // Above the paddle
        assert!(!ball_paddle_contact(Vec2::new(400.0, 560.0), 8.0, &paddle));
        // Outside the span
        assert!(!ball_paddle_contact(Vec2::new(340.0, 575.0), 8.0, &paddle));
        assert!(!ball_paddle_contact(Vec2::new(350.0, 575.0), 8.0, &paddle));
    }

    #[test]
    fn test_pickup_paddle_contact() {
        let paddle = Rect::new(350.0, 570.0, 100.0, 20.0);
        let at = |x: f32, y: f32| Rect::new(x, y, 20.0, 20.0);
        // Straddling either end of the paddle
        assert!(pickup_paddle_contact(&at(345.0, 552.0), &paddle));
        assert!(pickup_paddle_contact(&at(435.0, 552.0), &paddle));
        // Edge to edge is not an overlap
        assert!(!pickup_paddle_contact(&at(330.0, 560.0), &paddle));
        assert!(!pickup_paddle_contact(&at(450.0, 560.0), &paddle));
        // Still above, or already below
        assert!(!pickup_paddle_contact(&at(400.0, 550.0), &paddle));
        assert!(!pickup_paddle_contact(&at(400.0, 590.0), &paddle));
    }

    #[test]
    fn test_bounce_off_wall() {
        let v = Vec2::new(-3.0, -4.0);
        assert_eq!(bounce_off_wall(v, WallContact::Left), Vec2::new(3.0, -4.0));
        assert_eq!(bounce_off_wall(v, WallContact::Right), Vec2::new(-3.0, -4.0));
        assert_eq!(bounce_off_wall(v, WallContact::Ceiling), Vec2::new(-3.0, 4.0));
        assert_eq!(bounce_off_wall(v, WallContact::Floor), v);
    }

    #[test]
    fn test_laser_brick_contact() {
        let brick = Rect::new(100.0, 100.0, 50.0, 20.0);
        let inside = Rect::new(120.0, 110.0, 4.0, 10.0);
        let beside = Rect::new(160.0, 110.0, 4.0, 10.0);
        assert!(laser_brick_contact(&inside, &brick));
        assert!(!laser_brick_contact(&beside, &brick));
    }
}
