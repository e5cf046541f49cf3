//! Pointer input as delivered by the host toolkit.

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Single-pointer event in the wheel's local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    /// Monotonic event time in milliseconds, used for velocity tracking.
    pub uptime_ms: u64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f32, y: f32, uptime_ms: u64) -> Self {
        Self {
            kind,
            x,
            y,
            uptime_ms,
        }
    }

    pub fn down(y: f32, uptime_ms: u64) -> Self {
        Self::new(PointerEventKind::Down, 0.0, y, uptime_ms)
    }

    pub fn moved(y: f32, uptime_ms: u64) -> Self {
        Self::new(PointerEventKind::Move, 0.0, y, uptime_ms)
    }

    pub fn up(y: f32, uptime_ms: u64) -> Self {
        Self::new(PointerEventKind::Up, 0.0, y, uptime_ms)
    }

    pub fn cancel(y: f32, uptime_ms: u64) -> Self {
        Self::new(PointerEventKind::Cancel, 0.0, y, uptime_ms)
    }
}
