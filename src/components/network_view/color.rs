//! Node color sampling between two fixed greens.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

/// An opaque 8-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

/// Darkest node green.
pub const COLOR_FROM: Rgb = Rgb { r: 32, g: 79, b: 25 };
/// Lightest node green.
pub const COLOR_TO: Rgb = Rgb {
	r: 180,
	g: 255,
	b: 158,
};

impl Rgb {
	/// Channel-wise `floor(self + (to - self) * t)`.
	pub fn lerp(self, to: Rgb, t: f64) -> Rgb {
		let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).floor() as u8;
		Rgb {
			r: mix(self.r, to.r),
			g: mix(self.g, to.g),
			b: mix(self.b, to.b),
		}
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgb({},{},{})", self.r, self.g, self.b)
	}
}

/// A CSS `rgb(..)` color somewhere between [`COLOR_FROM`] and [`COLOR_TO`].
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
	COLOR_FROM.lerp(COLOR_TO, rng.r#gen::<f64>()).to_string()
}

/// Uniform pick; `None` for an empty slice.
pub fn choice<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
	items.choose(rng)
}
