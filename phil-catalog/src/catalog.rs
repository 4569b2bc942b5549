//! The assembled built-in catalogs.
//!
//! All data here is static: loaded at process start, never mutated. The
//! application shell shares one `Arc<Catalog>` across every component.

use serde::{Deserialize, Serialize};

use crate::types::{Church, Sermon, SmallGroup};

/// Error types for catalog validation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two records share an id
    #[error("Duplicate id in catalog: {0}")]
    DuplicateId(String),

    /// A group references a church that does not exist
    #[error("Group {group_id} references unknown church {church_id}")]
    DanglingChurchRef { group_id: String, church_id: String },
}

/// Role of a seed transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedRole {
    User,
    Assistant,
}

/// A transcript entry the application may preload before any user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMessage {
    /// Stable id within the seed transcript
    pub id: String,
    /// Who authored the entry
    pub role: SeedRole,
    /// Message text
    pub content: String,
    /// How many seconds before "now" the entry was created
    pub age_secs: i64,
    /// Church tag, when the user sent it in a church context
    pub church_id: Option<String>,
    /// Ids of cited sermons
    pub citation_ids: Vec<String>,
}

/// The built-in content catalogs.
///
/// - `featured` churches seed the conversation sidebar and context
///   resolution.
/// - `directory` churches are the followable set shown in onboarding and
///   discovery.
/// - `groups` are scoped to directory churches.
#[derive(Debug, Clone)]
pub struct Catalog {
    featured: Vec<Church>,
    directory: Vec<Church>,
    groups: Vec<SmallGroup>,
    sermons: Vec<Sermon>,
    seed_transcript: Vec<SeedMessage>,
}

impl Catalog {
    /// Assemble the built-in catalogs.
    pub fn builtin() -> Self {
        Self {
            featured: featured_churches(),
            directory: directory_churches(),
            groups: small_groups(),
            sermons: sermons(),
            seed_transcript: seed_transcript(),
        }
    }

    /// Featured churches shown in the sidebar by default.
    pub fn featured(&self) -> &[Church] {
        &self.featured
    }

    /// The followable church directory.
    pub fn directory(&self) -> &[Church] {
        &self.directory
    }

    /// All small groups, across every directory church.
    pub fn groups(&self) -> &[SmallGroup] {
        &self.groups
    }

    /// All sermons.
    pub fn sermons(&self) -> &[Sermon] {
        &self.sermons
    }

    /// Transcript entries to preload before any user input.
    pub fn seed_transcript(&self) -> &[SeedMessage] {
        &self.seed_transcript
    }

    /// Look up a church by id, searching featured then directory.
    pub fn church(&self, id: &str) -> Option<&Church> {
        self.featured
            .iter()
            .chain(self.directory.iter())
            .find(|c| c.id == id)
    }

    /// Look up a small group by id.
    pub fn group(&self, id: &str) -> Option<&SmallGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Look up a sermon by id.
    pub fn sermon(&self, id: &str) -> Option<&Sermon> {
        self.sermons.iter().find(|s| s.id == id)
    }

    /// Look up a sermon by exact title.
    pub fn sermon_by_title(&self, title: &str) -> Option<&Sermon> {
        self.sermons.iter().find(|s| s.title == title)
    }

    /// Check id uniqueness and group-to-church referential integrity.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for id in self
            .featured
            .iter()
            .map(|c| &c.id)
            .chain(self.directory.iter().map(|c| &c.id))
        {
            if !seen.insert(id.clone()) {
                return Err(CatalogError::DuplicateId(id.clone()));
            }
        }

        let mut seen_groups = std::collections::HashSet::new();
        for group in &self.groups {
            if !seen_groups.insert(group.id.clone()) {
                return Err(CatalogError::DuplicateId(group.id.clone()));
            }
            if !self.directory.iter().any(|c| c.id == group.church_id) {
                return Err(CatalogError::DanglingChurchRef {
                    group_id: group.id.clone(),
                    church_id: group.church_id.clone(),
                });
            }
        }

        let mut seen_sermons = std::collections::HashSet::new();
        for sermon in &self.sermons {
            if !seen_sermons.insert(sermon.id.clone()) {
                return Err(CatalogError::DuplicateId(sermon.id.clone()));
            }
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn church(
    id: &str,
    name: &str,
    seed: &str,
    color: &str,
    last_sermon: &str,
    group_count: Option<u32>,
) -> Church {
    Church {
        id: id.to_string(),
        name: name.to_string(),
        logo: format!("https://picsum.photos/seed/{}/100/100", seed),
        color: color.to_string(),
        last_sermon: Some(last_sermon.to_string()),
        group_count,
    }
}

fn featured_churches() -> Vec<Church> {
    vec![
        church(
            "grace-community",
            "Grace Community",
            "grace",
            "#8B9D83",
            "The Weight of Glory",
            None,
        ),
        church(
            "st-jude",
            "St. Jude Cathedral",
            "stjude",
            "#C8956D",
            "Walking on Water",
            None,
        ),
        church(
            "city-light",
            "City Light Church",
            "citylight",
            "#6D89C8",
            "A City on a Hill",
            None,
        ),
    ]
}

fn directory_churches() -> Vec<Church> {
    vec![
        church(
            "v-decatur",
            "Victory Decatur",
            "decatur",
            "#8B9D83",
            "Pastor Dennis Rouse",
            Some(3),
        ),
        church(
            "v-duluth",
            "Victory Duluth",
            "duluth",
            "#C8956D",
            "Pastor Greg Oliver",
            Some(3),
        ),
        church(
            "v-stockbridge",
            "Victory Stockbridge",
            "stockbridge",
            "#6D89C8",
            "Pastor Joel Hodge",
            Some(0),
        ),
        church(
            "v-mcdonough",
            "Victory McDonough",
            "mcdonough",
            "#D4AF37",
            "Pastor Dion Hodge",
            Some(0),
        ),
        church(
            "v-college-park",
            "Victory College Park",
            "collegepark",
            "#9B6DC8",
            "Pastor Shawn Johnson",
            Some(0),
        ),
    ]
}

fn group(
    id: &str,
    name: &str,
    church_id: &str,
    meeting_time: &str,
    location: &str,
    focus: &[&str],
    members: u32,
    demographic: Option<&str>,
) -> SmallGroup {
    SmallGroup {
        id: id.to_string(),
        name: name.to_string(),
        church_id: church_id.to_string(),
        meeting_time: meeting_time.to_string(),
        location: location.to_string(),
        focus: focus.iter().map(|f| f.to_string()).collect(),
        members,
        demographic: demographic.map(|d| d.to_string()),
    }
}

fn small_groups() -> Vec<SmallGroup> {
    vec![
        group(
            "g-dec-1",
            "Young Professionals (25-35)",
            "v-decatur",
            "Wednesdays, 7pm",
            "Decatur, GA",
            &["Career", "Relationships", "Faith"],
            12,
            Some("Young Professionals"),
        ),
        group(
            "g-dec-2",
            "Men's Bible Study",
            "v-decatur",
            "Saturday mornings, 8am",
            "Coffee shop, Decatur",
            &["Accountability", "Scripture"],
            8,
            None,
        ),
        group(
            "g-dec-3",
            "Marriage & Parenting",
            "v-decatur",
            "Sundays, 5pm",
            "Church campus",
            &["Family", "Relationships"],
            6,
            Some("Couples"),
        ),
        group(
            "g-dul-1",
            "College & Career",
            "v-duluth",
            "Thursdays, 6:30pm",
            "Duluth, GA",
            &["Faith transitions", "Purpose"],
            15,
            None,
        ),
        group(
            "g-dul-2",
            "Women's Study",
            "v-duluth",
            "Tuesday mornings, 10am",
            "Host home",
            &["Prayer", "Scripture", "Community"],
            10,
            None,
        ),
        group(
            "g-dul-3",
            "Grief & Loss Support",
            "v-duluth",
            "Mondays, 7pm",
            "Church campus",
            &["Healing", "Support"],
            7,
            None,
        ),
    ]
}

fn sermons() -> Vec<Sermon> {
    vec![
        Sermon {
            id: "s1".to_string(),
            title: "The Weight of Glory".to_string(),
            date: "Oct 24, 2023".to_string(),
            speaker: "Rev. Sarah Jenkins".to_string(),
            church_name: "Grace Community".to_string(),
            summary: "An exploration of C.S. Lewis's themes on eternal significance and human worth."
                .to_string(),
        },
        Sermon {
            id: "s2".to_string(),
            title: "Living in the Paradox".to_string(),
            date: "Nov 12, 2023".to_string(),
            speaker: "Dr. Michael Chen".to_string(),
            church_name: "Grace Community".to_string(),
            summary: "Discussing the tension between faith and doubt in the modern age.".to_string(),
        },
    ]
}

fn seed_transcript() -> Vec<SeedMessage> {
    vec![
        SeedMessage {
            id: "1".to_string(),
            role: SeedRole::User,
            content: "I've been thinking about the sermon from last Sunday at Grace Community. \
                      How does the 'Weight of Glory' concept apply to our everyday interactions \
                      with people we don't necessarily like?"
                .to_string(),
            age_secs: 3600,
            church_id: Some("grace-community".to_string()),
            citation_ids: vec![],
        },
        SeedMessage {
            id: "2".to_string(),
            role: SeedRole::Assistant,
            content: "That's a profound question. In 'The Weight of Glory', the core idea is that \
                      there are no 'ordinary' people\u{2014}every person you meet is a 'soul that \
                      might be a god or goddess'. \n\nRev. Sarah Jenkins emphasized this in the \
                      sermon by suggesting that when we interact with someone difficult, we should \
                      try to see them through the lens of their eternal potential. It shifts the \
                      focus from their current flaws to their ultimate destination."
                .to_string(),
            age_secs: 3500,
            church_id: None,
            citation_ids: vec!["s1".to_string()],
        },
        SeedMessage {
            id: "3".to_string(),
            role: SeedRole::User,
            content: "That makes sense. Did she mention any specific verses to support that?"
                .to_string(),
            age_secs: 3400,
            church_id: None,
            citation_ids: vec![],
        },
    ]
}
