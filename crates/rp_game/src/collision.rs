//! Player-versus-platform resolution.
//!
//! Discrete AABB resolution with the shallow-penetration rule: when the player
//! overlaps a platform, push it out along whichever axis has the smaller
//! overlap, assuming that is the side it came in through. The velocity
//! component on that axis is zeroed and a push out through the platform's
//! top marks the player grounded.
//!
//! Platforms are resolved one at a time in list order. A player overlapping
//! two platforms at once is pushed by the first, then tested against the
//! second from its new position, so the result depends on platform order.

use crate::entity::{Platform, Player, Rect};

/// Which face of the platform the player was pushed out through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Pushed out to the platform's left (player was moving right into it).
    Left,
    Right,
    /// Pushed out above the platform: a landing.
    Top,
    /// Pushed out below the platform: head bump.
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactState {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl ContactState {
    fn record(&mut self, contact: Contact) {
        match contact {
            Contact::Left => self.left = true,
            Contact::Right => self.right = true,
            Contact::Top => self.top = true,
            Contact::Bottom => self.bottom = true,
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Penetration depth of `player` into `platform` measured from each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlaps {
    /// Distance the player must move left to clear the platform.
    pub left: f32,
    pub right: f32,
    /// Distance the player must move up to clear the platform.
    pub top: f32,
    pub bottom: f32,
}

impl Overlaps {
    /// `None` when the rectangles do not intersect.
    pub fn between(player: &Rect, platform: &Rect) -> Option<Self> {
        if !player.intersects(platform) {
            return None;
        }
        Some(Self {
            left: player.right() - platform.x,
            right: platform.right() - player.x,
            top: player.bottom() - platform.y,
            bottom: platform.bottom() - player.y,
        })
    }

    /// Pick the exit side. Ties favour the vertical axis, then the
    /// right/bottom side within an axis.
    pub fn exit_side(&self) -> Contact {
        let min_x = self.left.min(self.right);
        let min_y = self.top.min(self.bottom);
        if min_x < min_y {
            if self.left < self.right {
                Contact::Left
            } else {
                Contact::Right
            }
        } else if self.top < self.bottom {
            Contact::Top
        } else {
            Contact::Bottom
        }
    }
}

/// Resolve the player against one platform. Returns the exit side when the
/// two overlapped.
pub fn resolve(player: &mut Player, platform: &Platform) -> Option<Contact> {
    let overlaps = Overlaps::between(&player.bounds(), &platform.bounds())?;
    let contact = overlaps.exit_side();
    match contact {
        Contact::Left => {
            player.position.x -= overlaps.left;
            player.velocity.x = 0.0;
        }
        Contact::Right => {
            player.position.x += overlaps.right;
            player.velocity.x = 0.0;
        }
        Contact::Top => {
            player.position.y -= overlaps.top;
            player.velocity.y = 0.0;
            player.grounded = true;
        }
        Contact::Bottom => {
            player.position.y += overlaps.bottom;
            player.velocity.y = 0.0;
        }
    }
    Some(contact)
}

/// Resolve against every platform in order. The caller clears `grounded`
/// beforehand; this only ever sets it.
pub fn resolve_all(player: &mut Player, platforms: &[Platform]) -> ContactState {
    let mut contacts = ContactState::default();
    for platform in platforms {
        if let Some(contact) = resolve(player, platform) {
            contacts.record(contact);
        }
    }
    contacts
}
