use crate::color::{Color, Pixel};
use crate::pipeline::extract::ChannelSums;

pub const BUCKET_COUNT: usize = 16;

const HUE_SECTORS: usize = 8;
const SECTOR_WIDTH: f32 = 360.0 / HUE_SECTORS as f32;

/// HSL chroma below which a color's hue is noise.
const ACHROMATIC_CHROMA: f32 = 0.08;

/// Which accumulator a sample falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// `band * 8 + sector`: eight 45° hue sectors centred on 0°, 45°, … 315°,
    /// with band 0/1 splitting HSL lightness at 0.5.
    Hue(usize),
    /// Sixteen lightness bands for colors with no usable hue.
    Gray(usize),
}

/// Bucket for one sample.
pub fn bucket_of(pixel: Pixel) -> Bucket {
    let hsl = Color::from_pixel(pixel).to_hsl();
    let chroma = hsl.saturation * (1.0 - (2.0 * hsl.lightness - 1.0).abs());
    if chroma < ACHROMATIC_CHROMA {
        let band = (hsl.lightness * BUCKET_COUNT as f32) as usize;
        return Bucket::Gray(band.min(BUCKET_COUNT - 1));
    }

    let hue = hsl.hue.into_positive_degrees();
    let sector = ((hue + SECTOR_WIDTH / 2.0) / SECTOR_WIDTH) as usize % HUE_SECTORS;
    let band = usize::from(hsl.lightness >= 0.5);
    Bucket::Hue(band * HUE_SECTORS + sector)
}

/// Mean color of every non-empty bucket, at most [`BUCKET_COUNT`] of them.
///
/// Hue and gray samples never share a mean. Each index yields its hue mean,
/// or its gray mean when no hue sample landed there. Gray means displaced
/// by a hue mean are appended afterwards while room remains.
pub fn ansi_buckets(samples: &[Pixel]) -> Vec<Color> {
    let mut hues = [ChannelSums::default(); BUCKET_COUNT];
    let mut grays = [ChannelSums::default(); BUCKET_COUNT];
    for pixel in samples {
        match bucket_of(*pixel) {
            Bucket::Hue(i) => hues[i].add(*pixel),
            Bucket::Gray(i) => grays[i].add(*pixel),
        }
    }

    let mut candidates = Vec::with_capacity(BUCKET_COUNT);
    let mut displaced = Vec::new();
    for (hue, gray) in hues.iter().zip(&grays) {
        match (hue.mean(), gray.mean()) {
            (Some(h), Some(g)) => {
                candidates.push(Color::from_pixel(h));
                displaced.push(Color::from_pixel(g));
            }
            (Some(c), None) | (None, Some(c)) => candidates.push(Color::from_pixel(c)),
            (None, None) => {}
        }
    }
    let room = BUCKET_COUNT - candidates.len();
    candidates.extend(displaced.into_iter().take(room));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues_land_in_expected_sectors() {
        assert_eq!(bucket_of(Pixel::new(160, 0, 0)), Bucket::Hue(0));
        assert_eq!(bucket_of(Pixel::new(0, 160, 0)), Bucket::Hue(3));
        assert_eq!(bucket_of(Pixel::new(0, 0, 160)), Bucket::Hue(5));
        // 60° sits nearer the 45° sector centre than 90°
        assert_eq!(bucket_of(Pixel::new(160, 160, 0)), Bucket::Hue(1));
    }

    #[test]
    fn lightness_selects_bright_band() {
        assert_eq!(bucket_of(Pixel::new(120, 0, 0)), Bucket::Hue(0));
        assert_eq!(bucket_of(Pixel::new(255, 140, 140)), Bucket::Hue(8));
    }

    #[test]
    fn hue_wraps_around_zero() {
        // hue ~350°, belongs with red
        assert_eq!(bucket_of(Pixel::new(170, 0, 30)), Bucket::Hue(0));
    }

    #[test]
    fn grayscale_degrades_to_lightness_ramp() {
        let ramp: Vec<Pixel> = (0..=255u8).map(|v| Pixel::new(v, v, v)).collect();
        let candidates = ansi_buckets(&ramp);

        assert_eq!(candidates.len(), BUCKET_COUNT);
        for c in &candidates {
            assert!(c.r == c.g && c.g == c.b, "gray expected, got {c}");
        }
        for pair in candidates.windows(2) {
            assert!(pair[0].luminance() < pair[1].luminance());
        }
    }

    #[test]
    fn empty_buckets_are_omitted() {
        let samples = vec![Pixel::new(200, 20, 20); 10];
        let candidates = ansi_buckets(&samples);
        assert_eq!(candidates, vec![Color::new(200, 20, 20)]);
    }

    #[test]
    fn bucket_average_blends_members() {
        let samples = [Pixel::new(150, 0, 0), Pixel::new(170, 20, 0)];
        assert_eq!(bucket_of(samples[0]), bucket_of(samples[1]));
        assert_eq!(ansi_buckets(&samples), vec![Color::new(160, 10, 0)]);
    }

    #[test]
    fn grays_and_hues_sharing_an_index_stay_apart() {
        let gray = Pixel::new(77, 77, 77);
        let teal = Pixel::new(0, 100, 100);
        assert_eq!(bucket_of(gray), Bucket::Gray(4));
        assert_eq!(bucket_of(teal), Bucket::Hue(4));
        assert_eq!(
            ansi_buckets(&[gray, teal]),
            vec![Color::from_pixel(teal), Color::from_pixel(gray)]
        );

        let near_black = Pixel::new(5, 5, 5);
        let dark_red = Pixel::new(120, 0, 0);
        let candidates = ansi_buckets(&[near_black, dark_red]);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.contains(&Color::from_pixel(near_black)));
        assert!(candidates.contains(&Color::from_pixel(dark_red)));
    }

    #[test]
    fn displaced_grays_yield_to_full_hue_set() {
        let mut samples: Vec<Pixel> = (0..HUE_SECTORS)
            .flat_map(|s| {
                [0.3, 0.7].map(|l| {
                    let hue = s as f32 * SECTOR_WIDTH;
                    Color::from_hsl(palette::Hsl::new(hue, 1.0, l)).pixel()
                })
            })
            .collect();
        let gray = Pixel::new(128, 128, 128);
        samples.push(gray);

        let candidates = ansi_buckets(&samples);
        assert_eq!(candidates.len(), BUCKET_COUNT);
        assert!(!candidates.contains(&Color::from_pixel(gray)));
    }
}
