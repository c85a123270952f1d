//! Province display names and their administrative codes
//!
//! The registry only knows provincial-level divisions. Anything below that
//! (cities, districts) is absent, and an absent name means "no further
//! drill-down" whether it was unknown or simply a leaf.

use serde::Serialize;

/// A drillable region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    pub name: &'static str,
    pub code: u32,
}

const fn region(name: &'static str, code: u32) -> Region {
    Region { name, code }
}

/// All 34 provincial-level divisions
pub const PROVINCES: &[Region] = &[
    region("北京市", 110000),
    region("天津市", 120000),
    region("河北省", 130000),
    region("山西省", 140000),
    region("内蒙古自治区", 150000),
    region("辽宁省", 210000),
    region("吉林省", 220000),
    region("黑龙江省", 230000),
    region("上海市", 310000),
    region("江苏省", 320000),
    region("浙江省", 330000),
    region("安徽省", 340000),
    region("福建省", 350000),
    region("江西省", 360000),
    region("山东省", 370000),
    region("河南省", 410000),
    region("湖北省", 420000),
    region("湖南省", 430000),
    region("广东省", 440000),
    region("广西壮族自治区", 450000),
    region("海南省", 460000),
    region("重庆市", 500000),
    region("四川省", 510000),
    region("贵州省", 520000),
    region("云南省", 530000),
    region("西藏自治区", 540000),
    region("陕西省", 610000),
    region("甘肃省", 620000),
    region("青海省", 630000),
    region("宁夏回族自治区", 640000),
    region("新疆维吾尔自治区", 650000),
    region("台湾省", 710000),
    region("香港特别行政区", 810000),
    region("澳门特别行政区", 820000),
];

/// Fixed lookup table from display name to administrative code
#[derive(Debug, Clone, Copy)]
pub struct RegionRegistry {
    entries: &'static [Region],
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::new(PROVINCES)
    }
}

impl RegionRegistry {
    pub fn new(entries: &'static [Region]) -> Self {
        Self { entries }
    }

    /// Administrative code for a display name, if it can be drilled into
    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.code)
    }

    /// Display name for an administrative code
    pub fn name_of(&self, code: u32) -> Option<&'static str> {
        self.entries.iter().find(|r| r.code == code).map(|r| r.name)
    }

    pub fn all(&self) -> &'static [Region] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
