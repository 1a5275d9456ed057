use regex::Regex;
use std::sync::LazyLock;

use super::{has_extension, NamingRule};

static FRAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<weapon>[A-Z0-9_]+)-(?P<num>[0-9]+)$").expect("frame pattern is valid")
});
static ICON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_]+-ICON$").expect("icon pattern is valid")
});

/// Weapon sprite frames: `RIFLE-1.png` becomes `RIFLE-PICKUP.png`,
/// `RIFLE-2.png` becomes `RIFLE-IDLE.png`, and `RIFLE-N.png` for N >= 3
/// becomes `RIFLE-SHOOT-(N-2).png`. Icons are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponFrameRule;

impl NamingRule for WeaponFrameRule {
    type State = ();

    fn is_eligible(&self, file_name: &str) -> bool {
        has_extension(file_name, "png")
    }

    fn destination(&self, stem: &str, _state: &mut ()) -> Option<String> {
        frame_name(stem).map(|name| format!("{name}.png"))
    }
}

/// Canonical stem for a numbered frame stem, without extension.
pub fn frame_name(stem: &str) -> Option<String> {
    if ICON_RE.is_match(stem) {
        return None;
    }

    let caps = FRAME_RE.captures(stem)?;
    let weapon = &caps["weapon"];
    // Numbers too large for u64 are not frames we know how to place.
    let num: u64 = caps["num"].parse().ok()?;

    match num {
        0 => None,
        1 => Some(format!("{weapon}-PICKUP")),
        2 => Some(format!("{weapon}-IDLE")),
        n => Some(format!("{weapon}-SHOOT-{}", n - 2)),
    }
}
