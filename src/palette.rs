use std::{fmt, str::FromStr};

use anyhow::{anyhow, ensure};

/// The ten ordinal brightness levels, lightest first. `500` is the anchor.
pub const STEPS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

const LIGHTEN: [f64; 5] = [0.9, 0.8, 0.6, 0.4, 0.2];
const DARKEN: [f64; 4] = [0.1, 0.2, 0.3, 0.4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or(anyhow!("Color {s} does not start with '#'"))?;

        ensure!(
            hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
            anyhow!("Color {s} is not of the form #RRGGBB")
        );

        Ok(Rgb {
            r: u8::from_str_radix(&hex[0..2], 16)?,
            g: u8::from_str_radix(&hex[2..4], 16)?,
            b: u8::from_str_radix(&hex[4..6], 16)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Rgb {
    fn map(self, f: impl Fn(u8) -> u8) -> Rgb {
        Rgb {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }
}

/// Tint/shade ramp derived from one base color, keyed by [`STEPS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette([Rgb; 10]);

impl Palette {
    /// Blends steps `50..=400` toward white, keeps the base at `500` and
    /// scales `600..=900` toward black. Rounds to the nearest channel value.
    #[must_use]
    pub fn derive(base: Rgb) -> Palette {
        let lighten = |pct: f64| {
            base.map(|v| {
                let blended = f64::from(v) + (255.0 - f64::from(v)) * pct;
                blended.round().min(255.0) as u8
            })
        };
        let darken = |pct: f64| base.map(|v| (f64::from(v) * (1.0 - pct)).round() as u8);

        let mut steps = [base; 10];
        for (slot, pct) in steps[0..5].iter_mut().zip(LIGHTEN) {
            *slot = lighten(pct);
        }
        for (slot, pct) in steps[6..10].iter_mut().zip(DARKEN) {
            *slot = darken(pct);
        }

        Palette(steps)
    }

    #[must_use]
    pub fn step(&self, step: u16) -> Option<Rgb> {
        STEPS.iter().position(|&s| s == step).map(|i| self.0[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, Rgb)> + '_ {
        STEPS.into_iter().zip(self.0.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let color: Rgb = "#4CAF50".parse().unwrap();
        assert_eq!(color, Rgb { r: 76, g: 175, b: 80 });
        assert_eq!(color.to_string(), "#4caf50");
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!("4CAF50".parse::<Rgb>().is_err());
        assert!("#4CAF5".parse::<Rgb>().is_err());
        assert!("#4CAF50F".parse::<Rgb>().is_err());
        assert!("#4CAFZZ".parse::<Rgb>().is_err());
    }

    #[test]
    fn anchor_is_the_base_color() {
        let base: Rgb = "#4CAF50".parse().unwrap();
        assert_eq!(Palette::derive(base).step(500), Some(base));
    }

    #[test]
    fn known_ramp_values() {
        let palette = Palette::derive("#4CAF50".parse().unwrap());

        assert_eq!(palette.step(50).unwrap().to_string(), "#edf7ee");
        assert_eq!(palette.step(600).unwrap().to_string(), "#449e48");
        assert_eq!(palette.step(900).unwrap().to_string(), "#2e6930");
        assert_eq!(palette.step(450), None);
    }

    #[test]
    fn channels_decrease_from_light_to_dark() {
        let palette = Palette::derive("#4CAF50".parse().unwrap());

        for pair in STEPS.windows(2) {
            let lighter = palette.step(pair[0]).unwrap();
            let darker = palette.step(pair[1]).unwrap();

            assert!(lighter.r >= darker.r, "red not monotonic at {}", pair[1]);
            assert!(lighter.g >= darker.g, "green not monotonic at {}", pair[1]);
            assert!(lighter.b >= darker.b, "blue not monotonic at {}", pair[1]);
        }
    }
}
