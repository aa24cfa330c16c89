//! Price categories and the per-category report rules.
//!
//! The three sections of the upstream feed share one extraction and
//! formatting pipeline; what differs between them is data held in a
//! [`CategoryProfile`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named top-level section of the upstream price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gold,
    Currency,
    Cryptocurrency,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Gold, Self::Currency, Self::Cryptocurrency];

    /// Key of the section in the upstream JSON body.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Currency => "currency",
            Self::Cryptocurrency => "cryptocurrency",
        }
    }

    pub const fn profile(self) -> &'static CategoryProfile {
        match self {
            Self::Gold => &GOLD,
            Self::Currency => &CURRENCY,
            Self::Cryptocurrency => &CRYPTOCURRENCY,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gold" => Ok(Self::Gold),
            "currency" => Ok(Self::Currency),
            "cryptocurrency" | "crypto" => Ok(Self::Cryptocurrency),
            other => Err(ConfigError::Invalid {
                name: "category",
                value: other.to_owned(),
                expected: "one of gold, currency, cryptocurrency",
            }),
        }
    }
}

/// How a category renders its price values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceStyle {
    /// Whole numbers with thousands separators.
    Integer,
    /// Shortest decimal representation with thousands separators.
    Decimal,
}

/// Data-driven formatting rules for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProfile {
    pub category: Category,
    /// First line of the report header (HTML).
    pub title: &'static str,
    pub price_style: PriceStyle,
    /// Display-only renames applied to entry names.
    pub renames: &'static [(&'static str, &'static str)],
    /// Entry names never rendered.
    pub excluded: &'static [&'static str],
    /// A blank line is inserted before the entry with this name.
    pub section_break_before: Option<&'static str>,
    pub footer: Option<&'static str>,
}

impl CategoryProfile {
    pub fn display_name<'a>(&self, name: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|(from, _)| *from == name)
            .map_or(name, |&(_, to)| to)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(&name)
    }

    pub fn breaks_before(&self, name: &str) -> bool {
        self.section_break_before == Some(name)
    }
}

/// Sentinel entry separating bullion from coin listings.
pub const ONE_GRAM_COIN: &str = "سکه یک گرمی";

static GOLD: CategoryProfile = CategoryProfile {
    category: Category::Gold,
    title: "<b>\u{1F7E1} قیمت طلا و سکه</b>",
    price_style: PriceStyle::Integer,
    renames: &[],
    excluded: &[],
    section_break_before: Some(ONE_GRAM_COIN),
    footer: None,
};

static CURRENCY: CategoryProfile = CategoryProfile {
    category: Category::Currency,
    title: "\u{1F7E2} <b> نرخ ارز </b>",
    price_style: PriceStyle::Integer,
    renames: &[("دلار تتر", "تتر")],
    excluded: &[],
    section_break_before: None,
    footer: Some("\n (<b>قیمت‌ها به تومان است</b>)"),
};

static CRYPTOCURRENCY: CategoryProfile = CategoryProfile {
    category: Category::Cryptocurrency,
    title: "\u{1F7E0} <b>آخرین قیمت‌های بازار کریپتو:</b>",
    price_style: PriceStyle::Decimal,
    renames: &[],
    excluded: &["تتر", "استلار"],
    section_break_before: None,
    footer: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_names_case_insensitively() {
        assert_eq!("GOLD".parse::<Category>(), Ok(Category::Gold));
        assert_eq!(" crypto ".parse::<Category>(), Ok(Category::Cryptocurrency));
        assert!("silver".parse::<Category>().is_err());
    }

    #[test]
    fn currency_profile_renames_tether_only() {
        let profile = Category::Currency.profile();
        assert_eq!(profile.display_name("دلار تتر"), "تتر");
        assert_eq!(profile.display_name("یورو"), "یورو");
    }

    #[test]
    fn crypto_profile_excludes_pegged_entries() {
        let profile = Category::Cryptocurrency.profile();
        assert!(profile.is_excluded("تتر"));
        assert!(profile.is_excluded("استلار"));
        assert!(!profile.is_excluded("بیت کوین"));
    }

    #[test]
    fn every_profile_points_back_to_its_category() {
        for category in Category::ALL {
            assert_eq!(category.profile().category, category);
        }
    }
}
