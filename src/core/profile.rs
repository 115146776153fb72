//! # Learner Profile
//!
//! The learner's profile, exam course and subject branch, plus the league
//! leaderboard built around the learner's XP.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Course {
    Kpss,
    #[default]
    Tyt,
    Ayt,
}

impl Course {
    pub const ALL: [Course; 3] = [Course::Kpss, Course::Tyt, Course::Ayt];

    pub fn label(self) -> &'static str {
        match self {
            Course::Kpss => "KPSS",
            Course::Tyt => "TYT",
            Course::Ayt => "AYT",
        }
    }
}

/// A subject track with its own independent topic sequence.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    #[default]
    History,
    Geography,
}

impl Branch {
    pub const ALL: [Branch; 2] = [Branch::History, Branch::Geography];

    pub fn label(self) -> &'static str {
        match self {
            Branch::History => "Tarih",
            Branch::Geography => "Coğrafya",
        }
    }

    /// Heading of the first unit on the path view.
    pub fn unit_title(self) -> &'static str {
        match self {
            Branch::History => "Tarihe Giriş",
            Branch::Geography => "Doğal Sistemler",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub xp: u32,
    pub streak: u32,
    pub gems: u32,
    pub avatar: String,
    pub course: Course,
    pub branch: Branch,
    pub is_premium: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Öğrenci".to_string(),
            xp: 0,
            streak: 0,
            gems: 100,
            avatar: "https://picsum.photos/200".to_string(),
            course: Course::default(),
            branch: Branch::default(),
            is_premium: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub xp: u32,
    pub avatar: String,
    pub is_learner: bool,
}

const LEAGUE: [(&str, u32); 5] = [
    ("Ahmet Y.", 2450),
    ("Elif K.", 2320),
    ("Can B.", 2100),
    ("Selin D.", 1950),
    ("Mehmet O.", 1800),
];

/// Number of leading ranks promoted to the next league.
pub const PROMOTION_SLOTS: usize = 3;

/// Builds the league standings with the learner slotted in by XP.
///
/// Ties go to the league member already holding the rank.
pub fn leaderboard(profile: &UserProfile) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = LEAGUE
        .iter()
        .enumerate()
        .map(|(i, (name, xp))| LeaderboardEntry {
            rank: 0,
            name: (*name).to_string(),
            xp: *xp,
            avatar: format!("https://picsum.photos/50/50?random={}", i + 1),
            is_learner: false,
        })
        .collect();

    let slot = entries
        .iter()
        .position(|e| e.xp < profile.xp)
        .unwrap_or(entries.len());
    entries.insert(
        slot,
        LeaderboardEntry {
            rank: 0,
            name: profile.name.clone(),
            xp: profile.xp,
            avatar: profile.avatar.clone(),
            is_learner: true,
        },
    );

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_onboarding_defaults() {
        let profile = UserProfile::default();
        assert_eq!(profile.gems, 100);
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.course, Course::Tyt);
        assert_eq!(profile.branch, Branch::History);
        assert!(!profile.is_premium);
    }

    #[test]
    fn test_new_learner_ranks_last() {
        let board = leaderboard(&UserProfile::default());
        assert_eq!(board.len(), 6);
        assert!(board[5].is_learner);
        assert_eq!(board[5].rank, 6);
        assert_eq!(board[0].name, "Ahmet Y.");
    }

    #[test]
    fn test_learner_slots_in_by_xp() {
        let profile = UserProfile {
            xp: 2200,
            ..Default::default()
        };
        let board = leaderboard(&profile);
        let me = board.iter().find(|e| e.is_learner).unwrap();
        assert_eq!(me.rank, 3);
        assert!(me.rank <= PROMOTION_SLOTS);
    }

    #[test]
    fn test_tie_keeps_league_member_ahead() {
        let profile = UserProfile {
            xp: 2450,
            ..Default::default()
        };
        let board = leaderboard(&profile);
        assert_eq!(board[0].name, "Ahmet Y.");
        assert!(board[1].is_learner);
    }
}
