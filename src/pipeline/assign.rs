use tracing::debug;

use crate::color::Color;
use crate::error::ExtractError;

pub const SLOT_COUNT: usize = 16;

/// Slot names in ANSI order (darkest to brightest).
pub const SLOT_NAMES: [&str; SLOT_COUNT] = [
    "background",
    "color1",
    "color2",
    "color3",
    "color4",
    "color5",
    "color6",
    "color7",
    "color8",
    "color9",
    "color10",
    "color11",
    "color12",
    "color13",
    "color14",
    "foreground",
];

/// The finished 16-color palette.
///
/// Slots are stored in ANSI order: background, `color1`..`color14`,
/// foreground. Positions 1-8 form the normal half and 9-16 the bright half,
/// so background doubles as ANSI black and foreground as bright white.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    slots: [Color; SLOT_COUNT],
}

impl Palette {
    pub fn from_slots(slots: [Color; SLOT_COUNT]) -> Self {
        Self { slots }
    }

    pub fn background(&self) -> Color {
        self.slots[0]
    }

    pub fn foreground(&self) -> Color {
        self.slots[SLOT_COUNT - 1]
    }

    /// Named slot `color{n}`, `n` in 1..=14.
    pub fn color(&self, n: usize) -> Option<Color> {
        (1..SLOT_COUNT - 1).contains(&n).then(|| self.slots[n])
    }

    /// 1-based ANSI position, `position` in 1..=16.
    pub fn ansi(&self, position: usize) -> Option<Color> {
        position
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .copied()
    }

    /// Look up a slot by name (`background`, `foreground`, `color1`..`color14`).
    pub fn get(&self, name: &str) -> Option<Color> {
        SLOT_NAMES
            .iter()
            .position(|slot| *slot == name)
            .map(|i| self.slots[i])
    }

    pub fn slots(&self) -> &[Color; SLOT_COUNT] {
        &self.slots
    }

    pub fn normal(&self) -> &[Color] {
        &self.slots[..8]
    }

    pub fn bright(&self) -> &[Color] {
        &self.slots[8..]
    }

    /// A copy with every slot's saturation scaled by `factor`.
    pub fn with_saturation(&self, factor: f32) -> Palette {
        Palette {
            slots: self.slots.map(|c| c.with_saturation(factor)),
        }
    }
}

/// Map candidate colors onto the 16 palette slots.
///
/// Exact duplicates are collapsed, the rest sorted by luminance (stable) and
/// capped at 16. The darkest becomes background and the brightest
/// foreground; `color1..color14` take the sorted run starting at the second
/// darkest. With fewer than 16 candidates that run wraps from brightest back
/// to darkest until every slot is filled.
pub fn assemble(candidates: &[Color]) -> Result<Palette, ExtractError> {
    let mut sorted: Vec<Color> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !sorted.iter().any(|c| c.pixel() == candidate.pixel()) {
            sorted.push(*candidate);
        }
    }
    if sorted.is_empty() {
        return Err(ExtractError::NoCandidates);
    }
    sorted.sort_by(|a, b| a.luminance().total_cmp(&b.luminance()));
    sorted.truncate(SLOT_COUNT);

    let n = sorted.len();
    let mut slots = [sorted[0]; SLOT_COUNT];
    for (i, slot) in slots.iter_mut().enumerate().take(SLOT_COUNT - 1).skip(1) {
        *slot = sorted[i % n];
    }
    slots[SLOT_COUNT - 1] = sorted[n - 1];

    debug!(
        candidates = candidates.len(),
        distinct = n,
        background = %slots[0],
        foreground = %slots[SLOT_COUNT - 1],
        "assembled palette"
    );

    Ok(Palette { slots })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grays(n: u8) -> Vec<Color> {
        (0..n).map(|i| Color::new(i * 10, i * 10, i * 10)).collect()
    }

    #[test]
    fn empty_candidates_fail() {
        assert_eq!(assemble(&[]), Err(ExtractError::NoCandidates));
    }

    #[test]
    fn full_set_is_sorted_by_luminance() {
        let mut candidates = grays(16);
        candidates.reverse();
        let palette = assemble(&candidates).unwrap();

        assert_eq!(palette.background(), Color::new(0, 0, 0));
        assert_eq!(palette.foreground(), Color::new(150, 150, 150));
        for pair in palette.slots().windows(2) {
            assert!(pair[0].luminance() <= pair[1].luminance());
        }
        assert_eq!(palette.color(1), Some(Color::new(10, 10, 10)));
        assert_eq!(palette.color(14), Some(Color::new(140, 140, 140)));
    }

    #[test]
    fn red_and_blue_alternate() {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        let palette = assemble(&[red, blue]).unwrap();

        assert_eq!(palette.background(), blue);
        assert_eq!(palette.foreground(), red);
        for n in 1..=14 {
            let expected = if n % 2 == 1 { red } else { blue };
            assert_eq!(palette.color(n), Some(expected), "color{n}");
        }
    }

    #[test]
    fn single_candidate_fills_everything() {
        let c = Color::new(12, 99, 200);
        let palette = assemble(&[c]).unwrap();
        assert!(palette.slots().iter().all(|s| *s == c));
    }

    #[test]
    fn shortfall_wraps_cyclically() {
        let candidates = grays(5);
        let palette = assemble(&candidates).unwrap();
        let expected: Vec<Color> = (1..15).map(|i| candidates[i % 5]).collect();
        assert_eq!(&palette.slots()[1..15], expected.as_slice());
        assert_eq!(palette.background(), candidates[0]);
        assert_eq!(palette.foreground(), candidates[4]);
    }

    #[test]
    fn duplicates_collapse() {
        let a = Color::new(10, 10, 10);
        let b = Color::new(200, 200, 200);
        let palette = assemble(&[a, a, a, b, b]).unwrap();
        assert_eq!(palette, assemble(&[a, b]).unwrap());
    }

    #[test]
    fn surplus_keeps_darkest_sixteen() {
        let palette = assemble(&grays(20)).unwrap();
        assert_eq!(palette.foreground(), Color::new(150, 150, 150));
    }

    #[test]
    fn named_and_ansi_lookup_agree() {
        let palette = assemble(&grays(16)).unwrap();
        assert_eq!(palette.get("background"), palette.ansi(1));
        assert_eq!(palette.get("foreground"), palette.ansi(16));
        for n in 1..=14 {
            assert_eq!(palette.get(&format!("color{n}")), palette.ansi(n + 1));
        }
        assert_eq!(palette.ansi(0), None);
        assert_eq!(palette.ansi(17), None);
        assert_eq!(palette.color(0), None);
        assert_eq!(palette.color(15), None);
        assert_eq!(palette.get("color15"), None);
    }

    #[test]
    fn halves_split_at_eight() {
        let palette = assemble(&grays(16)).unwrap();
        assert_eq!(palette.normal().len(), 8);
        assert_eq!(palette.bright()[0], palette.ansi(9).unwrap());
    }

    #[test]
    fn saturation_returns_new_palette() {
        let palette = assemble(&[Color::new(200, 40, 40), Color::new(40, 40, 200)]).unwrap();
        let washed = palette.with_saturation(0.0);
        assert_ne!(palette, washed);
        assert!(washed.slots().iter().all(|c| c.r == c.g && c.g == c.b));
    }
}
