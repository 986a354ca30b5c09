//! Static project metadata shown in the detail modal.

use crate::config::BlankFeatures;
use crate::error::{PortfolioError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub features: &'static [&'static str],
    pub image: &'static str,
}

impl ProjectRecord {
    /// Feature rows to render under the given blank-entry policy.
    pub fn features(&self, policy: BlankFeatures) -> Vec<&'static str> {
        match policy {
            BlankFeatures::Preserve => self.features.to_vec(),
            BlankFeatures::Filter => self
                .features
                .iter()
                .copied()
                .filter(|f| !f.trim().is_empty())
                .collect(),
        }
    }
}

pub static PROJECTS: &[ProjectRecord] = &[
    ProjectRecord {
        id: "neon-racer",
        title: "Veil Of Vows",
        description: "story based game and rpg being worked on wiht many passionate devs including me.",
        technologies: &["Unity", "main scripter", "C#"],
        features: &[
            "setting up menus",
            "setting up general grid of the game",
            "comprehensible code for assistants",
        ],
        image: "https://cdn.discordapp.com/attachments/1415503480101273722/1423906152831389696/image.png?ex=696a76b1&is=69692531&hm=00d39b1d4b52ee97b97d8bd0e23cfe79cbe199616c6c956cdd2d2bf5a1016277&",
    },
    ProjectRecord {
        id: "cyber-glitch",
        title: "Miracle X",
        description: "An immersive hacking simulation game where players navigate through digital networks using realistic cybersecurity concepts.",
        technologies: &["Builder", "modeler", "luau"],
        features: &[
            "game ready assets",
            "lighting",
            "modeling and building paris",
            "behemoth map building",
        ],
        image: "https://encycolorpedia.com/f41840.png",
    },
    ProjectRecord {
        id: "neural-nexus",
        title: "Sonic Speed Simulator 2",
        description: "deleted due to supposed multiple violations of copyright and sega content.",
        technologies: &["Builder", "admin", "game manager", "co owner"],
        features: &["game management", "game moderation", "map building"],
        image: "https://media.discordapp.net/attachments/1018549168177942669/1463170505937915964/180DAY-2a5fb6516cb2af0716dd4232c8928f8c.png?ex=6970db39&is=696f89b9&hm=2ae0aa7918825219bac63f2a5848deafebb857a4099586a2087fdda403eb9c6d&animated=true",
    },
];

/// Look up a record by its `data-project` identifier. An unknown id is a
/// caller error and is reported instead of rendering an empty modal.
pub fn lookup(id: &str) -> Result<&'static ProjectRecord> {
    PROJECTS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| PortfolioError::UnknownProject(id.to_string()))
}
