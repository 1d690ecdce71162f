//! Roster file loading.

use anyhow::{Context, bail};
use chrono::NaiveDate;
use matside::athlete::{AthleteProfile, Belt, Gender};
use serde::Deserialize;
use std::path::Path;

/// One competitor as written in the roster file
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub body_weight_kg: f64,
    pub belt: Belt,
    pub team_name: String,
}

/// Both competitors of the bout, side A first
#[derive(Debug, Clone, Deserialize)]
pub struct Roster {
    pub athletes: Vec<RosterEntry>,
}

impl Roster {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let roster: Roster = serde_json::from_str(json).context("Malformed roster JSON")?;
        if roster.athletes.len() != 2 {
            bail!(
                "A roster needs exactly two athletes, found {}",
                roster.athletes.len()
            );
        }
        Ok(roster)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster {}", path.display()))?;
        Self::parse(&json)
    }

    /// Completed profiles, ready for enrollment
    pub fn into_profiles(self) -> anyhow::Result<Vec<AthleteProfile>> {
        self.athletes
            .into_iter()
            .map(|entry| {
                let name = entry.full_name.clone();
                AthleteProfile::new(
                    entry.full_name,
                    entry.birth_date,
                    entry.gender,
                    entry.body_weight_kg,
                    entry.belt,
                    entry.team_name,
                )
                .complete()
                .with_context(|| format!("Incomplete profile for '{name}'"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &str = r#"{
        "athletes": [
            {"full_name": "Ana Souza", "birth_date": "1997-03-02", "gender": "female",
             "body_weight_kg": 57.9, "belt": "brown", "team_name": "Gracie Barra"},
            {"full_name": "Bia Lima", "birth_date": "1999-11-20", "gender": "female",
             "body_weight_kg": 58.2, "belt": "brown", "team_name": "Alliance"}
        ]
    }"#;

    #[test]
    fn test_parse_two_athletes() {
        let profiles = Roster::parse(TWO).unwrap().into_profiles().unwrap();
        assert_eq!(profiles.len(), 2);
        assert!(profiles.iter().all(|p| p.profile_locked));
        assert_eq!(profiles[1].belt, Belt::Brown);
    }

    #[test]
    fn test_rejects_wrong_count() {
        let err = Roster::parse(r#"{"athletes": []}"#).unwrap_err();
        assert!(err.to_string().contains("exactly two"));
    }

    #[test]
    fn test_rejects_incomplete_profile() {
        let json = TWO.replace("\"Alliance\"", "\"\"");
        let err = Roster::parse(&json).unwrap().into_profiles().unwrap_err();
        assert!(err.to_string().contains("Bia Lima"));
    }
}
