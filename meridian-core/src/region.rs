use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionId {
    EastAsia,
    SoutheastAsia,
    Oceania,
    NorthAmerica,
    Europe,
}

impl RegionId {
    pub const ALL: [RegionId; 5] = [
        RegionId::EastAsia,
        RegionId::SoutheastAsia,
        RegionId::Oceania,
        RegionId::NorthAmerica,
        RegionId::Europe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionId::EastAsia => "east_asia",
            RegionId::SoutheastAsia => "southeast_asia",
            RegionId::Oceania => "oceania",
            RegionId::NorthAmerica => "north_america",
            RegionId::Europe => "europe",
        }
    }
}

impl FromStr for RegionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "east_asia" => Ok(RegionId::EastAsia),
            "southeast_asia" => Ok(RegionId::SoutheastAsia),
            "oceania" => Ok(RegionId::Oceania),
            "north_america" => Ok(RegionId::NorthAmerica),
            "europe" => Ok(RegionId::Europe),
            _ => Err(format!("unknown region: {}", s)),
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A country shown on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, upper case.
    pub code: &'static str,
    pub name: &'static str,
    pub name_local: &'static str,
}

/// A group of countries sharing one legend color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    pub label: &'static str,
    pub label_local: &'static str,
    /// Hex color, e.g. `#ef4444`.
    pub color: &'static str,
    /// Single character used for the region in text output.
    pub marker: char,
    pub countries: &'static [Country],
}

const fn entry(code: &'static str, name: &'static str, name_local: &'static str) -> Country {
    Country {
        code,
        name,
        name_local,
    }
}

pub static REGIONS: &[Region] = &[
    Region {
        id: RegionId::EastAsia,
        label: "East Asia",
        label_local: "동아시아",
        color: "#ef4444",
        marker: 'A',
        countries: &[
            entry("KR", "South Korea", "한국"),
            entry("JP", "Japan", "일본"),
            entry("TW", "Taiwan", "대만"),
            entry("CN", "China", "중국"),
            entry("HK", "Hong Kong", "홍콩"),
        ],
    },
    Region {
        id: RegionId::SoutheastAsia,
        label: "Southeast Asia",
        label_local: "동남아시아",
        color: "#f59e0b",
        marker: 'S',
        countries: &[
            entry("TH", "Thailand", "태국"),
            entry("MY", "Malaysia", "말레이시아"),
            entry("SG", "Singapore", "싱가포르"),
            entry("PH", "Philippines", "필리핀"),
            entry("ID", "Indonesia", "인도네시아"),
            entry("VN", "Vietnam", "베트남"),
        ],
    },
    Region {
        id: RegionId::Oceania,
        label: "Oceania",
        label_local: "오세아니아",
        color: "#06b6d4",
        marker: 'O',
        countries: &[
            entry("AU", "Australia", "오스트레일리아"),
            entry("NZ", "New Zealand", "뉴질랜드"),
        ],
    },
    Region {
        id: RegionId::NorthAmerica,
        label: "North America",
        label_local: "북미",
        color: "#3b82f6",
        marker: 'N',
        countries: &[
            entry("US", "United States", "미국"),
            entry("CA", "Canada", "캐나다"),
            entry("MX", "Mexico", "멕시코"),
        ],
    },
    Region {
        id: RegionId::Europe,
        label: "Europe",
        label_local: "유럽",
        color: "#22c55e",
        marker: 'E',
        countries: &[
            entry("GB", "United Kingdom", "영국"),
            entry("FR", "France", "프랑스"),
            entry("DE", "Germany", "독일"),
            entry("ES", "Spain", "스페인"),
            entry("IT", "Italy", "이탈리아"),
            entry("NL", "Netherlands", "네덜란드"),
            entry("PL", "Poland", "폴란드"),
            entry("RU", "Russia", "러시아"),
        ],
    },
];

/// All regions in legend order.
pub fn regions() -> &'static [Region] {
    REGIONS
}

pub fn region(id: RegionId) -> &'static Region {
    // REGIONS is laid out in RegionId declaration order.
    &REGIONS[id as usize]
}

/// Looks up a country and its owning region by ISO code (case-insensitive).
pub fn country(code: &str) -> Option<(&'static Region, &'static Country)> {
    REGIONS.iter().find_map(|r| {
        r.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .map(|c| (r, c))
    })
}

/// Country codes of the given regions, in registry order.
pub fn country_codes(ids: &[RegionId]) -> Vec<&'static str> {
    REGIONS
        .iter()
        .filter(|r| ids.contains(&r.id))
        .flat_map(|r| r.countries.iter().map(|c| c.code))
        .collect()
}
