use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Style variant of an icon, declared in preference order.
///
/// The derived ordering is the preference order, so ordered maps keyed by
/// `Variant` iterate from most to least preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Filled,
    Solid,
    Stroke,
    DuoSolid,
    DuoStroke,
    Contrast,
    Bold,
}

/// Recognized name suffixes. Duo variants also accept a hyphenated spelling.
const SUFFIXES: &[(&str, Variant)] = &[
    ("filled", Variant::Filled),
    ("solid", Variant::Solid),
    ("stroke", Variant::Stroke),
    ("duo_solid", Variant::DuoSolid),
    ("duo-solid", Variant::DuoSolid),
    ("duo_stroke", Variant::DuoStroke),
    ("duo-stroke", Variant::DuoStroke),
    ("contrast", Variant::Contrast),
    ("bold", Variant::Bold),
];

impl Variant {
    pub const ALL: [Variant; 7] = [
        Variant::Filled,
        Variant::Solid,
        Variant::Stroke,
        Variant::DuoSolid,
        Variant::DuoStroke,
        Variant::Contrast,
        Variant::Bold,
    ];

    /// Variant assumed for names without a recognized suffix, and preferred above all others.
    pub const DEFAULT: Variant = Variant::Filled;

    /// Canonical tag, as used in file names and requests.
    pub fn tag(self) -> &'static str {
        match self {
            Variant::Filled => "filled",
            Variant::Solid => "solid",
            Variant::Stroke => "stroke",
            Variant::DuoSolid => "duo_solid",
            Variant::DuoStroke => "duo_stroke",
            Variant::Contrast => "contrast",
            Variant::Bold => "bold",
        }
    }

    /// Human-readable label for variant selectors.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Filled => "Filled",
            Variant::Solid => "Solid",
            Variant::Stroke => "Stroke",
            Variant::DuoSolid => "Duo Solid",
            Variant::DuoStroke => "Duo Stroke",
            Variant::Contrast => "Contrast",
            Variant::Bold => "Bold",
        }
    }

    /// Position in the preference order (0 is most preferred).
    pub fn priority(self) -> usize {
        self as usize
    }

    /// Whether `self` should replace `current` as a group's representative.
    ///
    /// The default variant always wins; otherwise the earlier variant wins and ties keep `current`.
    pub fn preferred_over(self, current: Variant) -> bool {
        if self == Variant::DEFAULT {
            return true;
        }
        if current == Variant::DEFAULT {
            return false;
        }
        self.priority() < current.priority()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SUFFIXES
            .iter()
            .find(|(tag, _)| *tag == s)
            .map(|(_, variant)| *variant)
            .ok_or_else(|| format!("unknown variant: {}", s))
    }
}

/// Split an asset name (without extension) into its base name and variant.
///
/// The longest recognized `-<variant>` suffix is stripped; names without one are
/// the default variant of their full name.
pub fn parse_name(name: &str) -> (&str, Variant) {
    let best = SUFFIXES
        .iter()
        .filter(|(tag, _)| {
            name.len() > tag.len()
                && name.ends_with(tag)
                && name.as_bytes()[name.len() - tag.len() - 1] == b'-'
        })
        .max_by_key(|(tag, _)| tag.len());

    match best {
        Some((tag, variant)) => (&name[..name.len() - tag.len() - 1], *variant),
        None => (name, Variant::DEFAULT),
    }
}
