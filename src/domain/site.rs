/// A supported photo-of-the-day website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteId {
    NationalGeographic,
    Bing,
    WikimediaCommons,
    TheGuardian,
    Nasa,
    Smithsonian,
    ThirtyFivePhoto,
}

impl SiteId {
    /// Every site, in the order "all" mode visits them.
    pub const ALL: [SiteId; 7] = [
        SiteId::NationalGeographic,
        SiteId::Bing,
        SiteId::WikimediaCommons,
        SiteId::TheGuardian,
        SiteId::Nasa,
        SiteId::Smithsonian,
        SiteId::ThirtyFivePhoto,
    ];

    /// Short code used on the command line and in file names
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteId::NationalGeographic => "ng",
            SiteId::Bing => "bing",
            SiteId::WikimediaCommons => "wiki",
            SiteId::TheGuardian => "guardian",
            SiteId::Nasa => "nasa",
            SiteId::Smithsonian => "smith",
            SiteId::ThirtyFivePhoto => "35photo",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SiteId::NationalGeographic => "National Geographic",
            SiteId::Bing => "Bing",
            SiteId::WikimediaCommons => "Wikimedia Commons",
            SiteId::TheGuardian => "The Guardian",
            SiteId::Nasa => "NASA",
            SiteId::Smithsonian => "Smithsonian",
            SiteId::ThirtyFivePhoto => "35photo",
        }
    }

    /// Whether the site publishes more than one image per day
    pub fn supports_index(&self) -> bool {
        matches!(self, SiteId::TheGuardian)
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the user asked to download in one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteSelection {
    One(SiteId),
    Random,
    All,
}
