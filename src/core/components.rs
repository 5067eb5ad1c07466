use bevy::prelude::*;

/// Marker for the ship root entity (owns transform, children hold the meshes).
#[derive(Component)]
pub struct Ship;

/// Pick sphere radius used by tap hit testing.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct ShipRadius(pub f32);

/// Material shared by every mesh child of the ship; tinted while highlighted.
#[derive(Component, Debug, Clone)]
pub struct ShipMaterial(pub Handle<StandardMaterial>);

/// Camera used for pointer rays.
#[derive(Component)]
pub struct MainCamera;

/// Linear approach from the spawn point to the camera target.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ShipFlight {
    pub start: Vec3,
    pub target: Vec3,
    pub elapsed: f32,
    pub duration: f32,
}

impl ShipFlight {
    pub fn new(start: Vec3, target: Vec3, duration: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration,
        }
    }

    /// 0 at spawn, 1 on arrival. Non-positive durations count as already arrived.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn position(&self) -> Vec3 {
        self.start.lerp(self.target, self.progress())
    }

    pub fn finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Step forward; returns true once the target is reached.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        self.finished()
    }
}

/// Tap feedback running on the ship; the hit counts when the timer ends.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct Highlight(pub Timer);

impl Highlight {
    pub fn from_seconds(secs: f32) -> Self {
        Self(Timer::from_seconds(secs.max(0.0), TimerMode::Once))
    }
}
